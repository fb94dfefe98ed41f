//! `atlas domains` — list the available assistance domains.

use atlas_core::Domain;

pub fn run() {
    println!();
    for (i, domain) in Domain::ALL.iter().enumerate() {
        println!("  {}. {}", i + 1, domain.title());
        println!("     {}", domain.tagline());
    }
    println!();
}
