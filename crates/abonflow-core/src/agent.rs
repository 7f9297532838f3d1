//! AI Agent Records
//!
//! An agent is a per-user configuration record for one of the fixed
//! automation kinds. This system stores and edits the configuration; it
//! never executes anything.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Kind of automation an agent record configures
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AgentKind {
    /// Outbound email automation
    Emailing,
    /// Accounting exports
    Comptable,
    /// Kind written by an older release or by hand; kept verbatim
    Other(String),
}

impl AgentKind {
    pub fn as_str(&self) -> &str {
        match self {
            AgentKind::Emailing => "emailing",
            AgentKind::Comptable => "comptable",
            AgentKind::Other(s) => s,
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "emailing" => AgentKind::Emailing,
            "comptable" => AgentKind::Comptable,
            other => AgentKind::Other(other.to_string()),
        }
    }

    /// Configuration keys this kind carries. Unrecognized kinds have no
    /// editable configuration.
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            AgentKind::Emailing => &["email", "subject", "template"],
            AgentKind::Comptable => &["software", "frequency", "notes"],
            AgentKind::Other(_) => &[],
        }
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for AgentKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AgentKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(AgentKind::from_str(&s))
    }
}

/// Opaque agent configuration: a flat mapping of string keys to string
/// values, persisted as a JSON object.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentConfig(BTreeMap<String, String>);

impl AgentConfig {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Parse a stored configuration blob. Empty or malformed blobs give
    /// an empty configuration; there is no schema validation.
    pub fn from_json(blob: &str) -> Self {
        if blob.trim().is_empty() {
            return Self::new();
        }
        serde_json::from_str(blob).unwrap_or_default()
    }

    /// Serialize back to the stored JSON object form.
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_else(|_| "{}".into())
    }

    /// Build a configuration for `kind` out of submitted form values,
    /// keeping only the keys the kind declares and defaulting missing
    /// ones to the empty string.
    pub fn for_kind<'a, F>(kind: &AgentKind, mut value_of: F) -> Self
    where
        F: FnMut(&str) -> Option<&'a str>,
    {
        let mut map = BTreeMap::new();
        for &field in kind.fields() {
            let value = value_of(field).unwrap_or_default();
            map.insert(field.to_string(), value.to_string());
        }
        Self(map)
    }

    pub fn get(&self, key: &str) -> &str {
        self.0.get(key).map_or("", String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Field/value pairs for `kind`, in declaration order, for form
    /// prefill and display.
    pub fn rows(&self, kind: &AgentKind) -> Vec<(&'static str, String)> {
        kind.fields()
            .iter()
            .map(|&field| (field, self.get(field).to_string()))
            .collect()
    }
}

/// A stored agent record
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Agent {
    /// Row id
    pub id: i64,

    /// Owning user
    pub user_id: i64,

    /// Automation kind
    pub kind: AgentKind,

    /// Display name chosen by the admin
    pub name: String,

    /// Opaque configuration record
    pub config: AgentConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        assert_eq!(AgentKind::from_str("emailing"), AgentKind::Emailing);
        assert_eq!(AgentKind::from_str("comptable"), AgentKind::Comptable);
        assert_eq!(
            AgentKind::from_str("juridique"),
            AgentKind::Other("juridique".into())
        );
    }

    #[test]
    fn test_config_shape_per_kind() {
        let config = AgentConfig::for_kind(&AgentKind::Emailing, |field| match field {
            "email" => Some("contact@exemple.fr"),
            "subject" => Some("Relance facture"),
            _ => None,
        });
        assert_eq!(config.get("email"), "contact@exemple.fr");
        assert_eq!(config.get("subject"), "Relance facture");
        // Missing fields are present as empty strings
        assert_eq!(config.get("template"), "");
        assert_eq!(config.rows(&AgentKind::Emailing).len(), 3);
    }

    #[test]
    fn test_unknown_kind_has_empty_config() {
        let config = AgentConfig::for_kind(&AgentKind::Other("juridique".into()), |_| {
            Some("ignored")
        });
        assert!(config.is_empty());
    }

    #[test]
    fn test_config_round_trip() {
        let config = AgentConfig::for_kind(&AgentKind::Comptable, |field| match field {
            "software" => Some("Sage"),
            "frequency" => Some("mensuel"),
            "notes" => Some("clôture le 5"),
            _ => None,
        });
        let reloaded = AgentConfig::from_json(&config.to_json());
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_malformed_blob_gives_empty_config() {
        assert!(AgentConfig::from_json("").is_empty());
        assert!(AgentConfig::from_json("not json").is_empty());
    }
}
