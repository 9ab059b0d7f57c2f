//! Search arguments dispatched to the host's search collaborator.
//!
//! The engine never fetches; a search gesture hands these arguments to the
//! registered hook, and the result comes back as a fresh record set via
//! `set_records`.

use std::collections::HashMap;

use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};

/// Archival state of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StorageState {
    Active,
    Archived,
}

/// Arguments for a record search.
///
/// `extra` carries backend-specific criteria the engine does not interpret.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchArgs {
    /// Free-text pattern.
    pub pattern: String,
    /// Lower bound on last modification time.
    pub modified_since: Option<DateTime<Utc>>,
    /// Storage states to include.
    pub states: Vec<StorageState>,
    /// Opaque extra criteria, passed through untouched.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub extra: HashMap<String, serde_json::Value>,
}

impl SearchArgs {
    /// Arguments matching only the given pattern.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            modified_since: None,
            states: Vec::new(),
            extra: HashMap::new(),
        }
    }

    /// The stock initial query: any pattern, active records modified within
    /// the last three months.
    pub fn recent() -> Self {
        Self {
            pattern: String::new(),
            modified_since: Utc::now().checked_sub_months(Months::new(3)),
            states: vec![StorageState::Active],
            extra: HashMap::new(),
        }
    }

    /// Set the free-text pattern.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Set the modification-time lower bound.
    pub fn modified_since(mut self, at: DateTime<Utc>) -> Self {
        self.modified_since = Some(at);
        self
    }

    /// Add a storage state to match.
    pub fn state(mut self, state: StorageState) -> Self {
        self.states.push(state);
        self
    }

    /// Attach an opaque extra criterion.
    pub fn extra(mut self, field: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(field.into(), value);
        self
    }
}

impl Default for SearchArgs {
    fn default() -> Self {
        Self::recent()
    }
}
