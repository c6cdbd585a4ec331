//! Agent domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A Carter agent the user can chat with.
///
/// Exactly one agent is expected to carry `is_selected` at a time; the
/// library store enforces this when an agent is selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    /// Unique agent identifier (UUID format)
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Carter API key used when talking to this agent
    #[serde(default)]
    pub key: String,
    /// Whether this is the current agent
    #[serde(default)]
    pub is_selected: bool,
    /// Creation timestamp
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

impl Agent {
    /// Creates a new, unselected agent with a fresh identifier.
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            key: key.into(),
            is_selected: false,
            created_at: Utc::now(),
        }
    }
}
