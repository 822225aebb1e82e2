//! Type-safe ID wrapper for stored leads.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier assigned to a lead when it is stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeadId(String);

impl LeadId {
    /// Creates a new random ID.
    pub fn new() -> Self {
        Self(format!("lead-{}", Uuid::new_v4()))
    }

    /// Creates an ID from an existing string (for path parameters and tests).
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Returns the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LeadId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LeadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for LeadId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for LeadId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lead_id_prefix() {
        let id = LeadId::new();
        assert!(id.as_str().starts_with("lead-"));
    }

    #[test]
    fn test_lead_ids_are_unique() {
        assert_ne!(LeadId::new(), LeadId::new());
    }

    #[test]
    fn test_id_serialization() {
        let id = LeadId::from_string("lead-test");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"lead-test\"");

        let parsed: LeadId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
