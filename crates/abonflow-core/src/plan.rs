//! Subscription Plans
//!
//! The three commercial tiers and their monthly pricing.

use serde::{Deserialize, Serialize};

/// Subscription plan tiers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Plan {
    #[serde(rename = "essentiel")]
    Essentiel,
    #[serde(rename = "pro")]
    Pro,
    #[serde(rename = "sur-mesure")]
    SurMesure,
}

impl Plan {
    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Essentiel => "essentiel",
            Plan::Pro => "pro",
            Plan::SurMesure => "sur-mesure",
        }
    }

    /// Parse from the stored/form value. Unknown values fall back to
    /// the entry-level plan.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "pro" => Plan::Pro,
            "sur-mesure" => Plan::SurMesure,
            _ => Plan::Essentiel,
        }
    }

    /// Catalogue price in euros per month.
    ///
    /// Sur-mesure contracts are negotiated individually and have no
    /// catalogue price; callers must use the per-user negotiated price
    /// instead (see [`crate::User::monthly_price`]).
    pub fn monthly_price(&self) -> i64 {
        match self {
            Plan::Essentiel => 1200,
            Plan::Pro => 3300,
            Plan::SurMesure => 0,
        }
    }

    /// All plans, in display order.
    pub fn all() -> [Plan; 3] {
        [Plan::Essentiel, Plan::Pro, Plan::SurMesure]
    }
}

impl Default for Plan {
    fn default() -> Self {
        Plan::Essentiel
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_pricing() {
        assert_eq!(Plan::Essentiel.monthly_price(), 1200);
        assert_eq!(Plan::Pro.monthly_price(), 3300);
        assert_eq!(Plan::SurMesure.monthly_price(), 0);
    }

    #[test]
    fn test_plan_round_trip() {
        for plan in Plan::all() {
            assert_eq!(Plan::from_str(plan.as_str()), plan);
        }
    }

    #[test]
    fn test_unknown_plan_defaults() {
        assert_eq!(Plan::from_str("platine"), Plan::Essentiel);
        assert_eq!(Plan::from_str(""), Plan::Essentiel);
    }
}
