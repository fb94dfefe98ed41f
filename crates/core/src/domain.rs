//! Assistance domains.
//!
//! A domain selects which knowledge source grounds the conversation. The
//! set is closed: adding a domain means adding a variant here plus one
//! grounding handler — the ranking and assembly code is never touched.

use serde::{Deserialize, Serialize};

/// One of the fixed assistance topics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    /// Working-time rules: schedules, leave, reduced hours, overtime…
    WorkingTime,
    /// Professional training: personal training accounts, exams, skill reviews…
    Training,
    /// Remote-work charter: eligible days, allowances, conditions…
    RemoteWork,
}

impl Domain {
    /// All domains, in menu display order.
    pub const ALL: [Domain; 3] = [Domain::WorkingTime, Domain::Training, Domain::RemoteWork];

    /// French display title, as shown in the domain menu and chat header.
    pub fn title(&self) -> &'static str {
        match self {
            Domain::WorkingTime => "Règlement du Temps de Travail",
            Domain::Training => "Formation Professionnelle",
            Domain::RemoteWork => "Télétravail",
        }
    }

    /// Short menu tagline under the title.
    pub fn tagline(&self) -> &'static str {
        match self {
            Domain::WorkingTime => "Horaires, congés, ARTT, temps partiel, heures sup, absences…",
            Domain::Training => "CPF, congés formation, VAE, concours, bilans de compétences…",
            Domain::RemoteWork => "Charte, jours autorisés, indemnités, modalités…",
        }
    }

    /// The synthesized assistant greeting shown when this domain is chosen.
    pub fn greeting(&self) -> &'static str {
        match self {
            Domain::WorkingTime => {
                "Bonjour ! Je peux vous aider avec vos questions sur les horaires, congés, ARTT, \
                 temps partiel, heures supplémentaires, absences, etc."
            }
            Domain::Training => {
                "Bonjour ! Je peux vous renseigner sur le CPF, les congés de formation, la VAE, \
                 les concours, les bilans de compétences, etc. Quelle est votre question ?"
            }
            Domain::RemoteWork => {
                "Bonjour ! Je suis l'assistant spécialiste du télétravail. Posez-moi vos questions \
                 sur la charte, les jours autorisés, les indemnités, etc."
            }
        }
    }

    /// Parse a menu selection or flag value ("1"/"2"/"3" or a slug).
    pub fn parse(s: &str) -> Option<Domain> {
        match s.trim().to_lowercase().as_str() {
            "1" | "working_time" | "temps" | "temps_de_travail" => Some(Domain::WorkingTime),
            "2" | "training" | "formation" => Some(Domain::Training),
            "3" | "remote_work" | "teletravail" | "télétravail" => Some(Domain::RemoteWork),
            _ => None,
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}
