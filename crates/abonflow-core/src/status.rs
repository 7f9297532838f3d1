//! Payment Lifecycle Statuses
//!
//! A user's account moves between these states: registration starts at
//! `gratuit`, submitting a proof of payment moves to
//! `en_attente_validation`, and an admin decision lands on `payé`,
//! `annulé` or `preuve_supplémentaire`. No state is terminal.

use serde::{Deserialize, Serialize};

/// Account/payment lifecycle state of a user
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "gratuit")]
    Gratuit,
    #[serde(rename = "en_attente_validation")]
    EnAttenteValidation,
    #[serde(rename = "payé")]
    Paye,
    #[serde(rename = "annulé")]
    Annule,
    #[serde(rename = "preuve_supplémentaire")]
    PreuveSupplementaire,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Gratuit => "gratuit",
            Status::EnAttenteValidation => "en_attente_validation",
            Status::Paye => "payé",
            Status::Annule => "annulé",
            Status::PreuveSupplementaire => "preuve_supplémentaire",
        }
    }

    /// Parse from the stored value. Unknown values fall back to `gratuit`.
    pub fn from_str(s: &str) -> Self {
        match s {
            "en_attente_validation" => Status::EnAttenteValidation,
            "payé" => Status::Paye,
            "annulé" => Status::Annule,
            "preuve_supplémentaire" => Status::PreuveSupplementaire,
            _ => Status::Gratuit,
        }
    }

    /// Whether this user counts as an active, paying subscriber.
    pub fn is_paid(&self) -> bool {
        matches!(self, Status::Paye)
    }

    /// Whether a payment is waiting for an admin decision.
    pub fn is_pending(&self) -> bool {
        matches!(self, Status::EnAttenteValidation)
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::Gratuit
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            Status::Gratuit,
            Status::EnAttenteValidation,
            Status::Paye,
            Status::Annule,
            Status::PreuveSupplementaire,
        ] {
            assert_eq!(Status::from_str(status.as_str()), status);
        }
    }

    #[test]
    fn test_unknown_status_defaults() {
        assert_eq!(Status::from_str("suspendu"), Status::Gratuit);
    }

    #[test]
    fn test_predicates() {
        assert!(Status::Paye.is_paid());
        assert!(!Status::EnAttenteValidation.is_paid());
        assert!(Status::EnAttenteValidation.is_pending());
    }
}
