//! User Accounts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::plan::Plan;
use crate::status::Status;

/// A registered user account
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    /// Row id
    pub id: i64,

    /// Unique login email
    pub email: String,

    /// Argon2id PHC-string password hash
    pub password_hash: String,

    /// Payment lifecycle state
    pub status: Status,

    /// Subscribed plan tier
    pub plan: Plan,

    /// Registration timestamp
    pub registered_at: DateTime<Utc>,

    /// Admin flag (exactly one bootstrap admin account carries it)
    pub is_admin: bool,

    /// Proof of payment: uploaded file path or free-text reference
    pub payment_proof: Option<String>,

    /// Last message the admin left for this user
    pub admin_message: Option<String>,

    /// Negotiated monthly price in euros, for sur-mesure contracts
    pub custom_price: Option<i64>,
}

impl User {
    /// Monthly price this account contributes to revenue figures.
    ///
    /// Catalogue plans use the fixed price table; sur-mesure uses the
    /// negotiated price, or zero while none has been agreed yet.
    pub fn monthly_price(&self) -> i64 {
        match self.plan {
            Plan::SurMesure => self.custom_price.unwrap_or(0),
            plan => plan.monthly_price(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(plan: Plan, custom_price: Option<i64>) -> User {
        User {
            id: 1,
            email: "claire@exemple.fr".into(),
            password_hash: "$argon2id$stub".into(),
            status: Status::Paye,
            plan,
            registered_at: Utc::now(),
            is_admin: false,
            payment_proof: None,
            admin_message: None,
            custom_price,
        }
    }

    #[test]
    fn test_catalogue_price() {
        assert_eq!(user(Plan::Pro, None).monthly_price(), 3300);
        assert_eq!(user(Plan::Essentiel, None).monthly_price(), 1200);
    }

    #[test]
    fn test_negotiated_price() {
        assert_eq!(user(Plan::SurMesure, Some(4500)).monthly_price(), 4500);
        assert_eq!(user(Plan::SurMesure, None).monthly_price(), 0);
    }

    #[test]
    fn test_negotiated_price_ignored_for_catalogue_plans() {
        assert_eq!(user(Plan::Pro, Some(9999)).monthly_price(), 3300);
    }
}
