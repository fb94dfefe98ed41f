//! Text normalization — the sole place where text comparison is defined.
//!
//! Every keyword and every question passes through [`normalize`] before any
//! comparison. The function is idempotent, so normalizing already-normalized
//! text is harmless.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Canonicalize free text for comparison.
///
/// Lower-cases, decomposes accented characters (NFD) and strips the
/// combining diacritical marks, removes everything that is not an ASCII
/// word character or whitespace, and trims. `"Éléphant"` and `"elephant"`
/// normalize identically. Empty input yields an empty string.
pub fn normalize(s: &str) -> String {
    let folded: String = s
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();

    let cleaned: String = folded
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    cleaned.trim().to_string()
}
