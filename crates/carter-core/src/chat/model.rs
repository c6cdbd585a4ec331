//! Chat domain model.
//!
//! A chat (conversation) belongs to exactly one agent and holds its
//! messages oldest first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single message in a chat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique message identifier (UUID format)
    #[serde(default)]
    pub id: String,
    /// Message text
    pub content: String,
    /// `true` when the agent authored the message, `false` for the user
    #[serde(default = "default_from_agent")]
    pub is_from_agent: bool,
    /// Creation timestamp
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

fn default_from_agent() -> bool {
    true
}

impl Message {
    /// Creates a message stamped with the current time.
    pub fn new(content: impl Into<String>, is_from_agent: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            is_from_agent,
            created_at: Utc::now(),
        }
    }
}

/// A chat with an agent.
///
/// The same shape serves as the list entry (summary) and the full record:
/// summaries carry at most the latest agent-authored message as a preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    /// Chat identifier, chosen by the client when the chat is created
    pub id: String,
    /// Human-readable title
    pub title: String,
    /// Owning agent
    #[serde(default)]
    pub agent_id: String,
    /// Creation timestamp
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    /// Messages, oldest first
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// List entry for a chat; see [`Chat::summary`].
pub type ChatSummary = Chat;

impl Chat {
    pub fn new(id: impl Into<String>, title: impl Into<String>, agent_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            agent_id: agent_id.into(),
            created_at: Utc::now(),
            messages: Vec::new(),
        }
    }

    /// Returns the most recent agent-authored message.
    pub fn latest_agent_message(&self) -> Option<&Message> {
        self.messages
            .iter()
            .filter(|message| message.is_from_agent)
            .max_by_key(|message| message.created_at)
    }

    /// Builds the list entry: same chat, messages reduced to the latest
    /// agent-authored one.
    pub fn summary(&self) -> ChatSummary {
        Chat {
            id: self.id.clone(),
            title: self.title.clone(),
            agent_id: self.agent_id.clone(),
            created_at: self.created_at,
            messages: self.latest_agent_message().cloned().into_iter().collect(),
        }
    }
}
