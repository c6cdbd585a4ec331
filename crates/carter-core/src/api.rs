//! Carter API: response types and the client trait.
//!
//! Field names follow the API's own snake_case JSON.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Text (and optional speech) produced by the agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarterOutput {
    pub text: String,
    #[serde(default)]
    pub audio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForcedBehaviour {
    pub name: String,
}

/// How the agent presents itself in a reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentProfile {
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// Reply to `api/chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub output: Option<CarterOutput>,
    pub input: Option<String>,
    pub forced_behaviours: Option<Vec<ForcedBehaviour>>,
    pub agent: Option<AgentProfile>,
}

/// Reply to `api/opener`: the agent's conversation starter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenerResponse {
    pub output: Option<CarterOutput>,
}

/// Reply to `api/personalise`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaliseResponse {
    pub output: CarterOutput,
}

/// A plugin installed on an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plugin {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

/// Conversation endpoints of the Carter API.
///
/// Every call is authenticated with the agent's `key`; `user_id` names the
/// conversation on the Carter side (the client uses the chat id).
#[async_trait]
pub trait CarterApi: Send + Sync {
    /// Sends the user's `text` and returns the agent's reply.
    async fn chat(&self, key: &str, user_id: &str, text: &str) -> Result<ChatResponse>;

    /// Asks the agent to open the conversation.
    async fn opener(&self, key: &str, user_id: &str) -> Result<OpenerResponse>;

    /// Sends `text` through the personalisation endpoint.
    async fn personalise(&self, key: &str, user_id: &str, text: &str)
    -> Result<PersonaliseResponse>;

    /// Lists the agent's plugins with their details.
    async fn plugins(&self, key: &str, user_id: &str) -> Result<Vec<Plugin>>;
}
