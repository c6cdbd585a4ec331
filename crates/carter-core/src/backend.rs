//! The backend capabilities the view loaders depend on.

use crate::error::Result;
use crate::record::{AgentRecord, ChatRecord};
use async_trait::async_trait;

/// Narrow view of the backend: one method per capability the loaders use.
///
/// Records come back as the backend sent them; the loaders pass them on
/// without decoding them into typed models. The production implementation
/// forwards each call over the invocation bridge; tests substitute a
/// recording fake.
#[async_trait]
pub trait Backend: Send + Sync {
    /// `is_db_ready`: whether the persistent store can answer queries.
    async fn is_db_ready(&self) -> Result<bool>;

    /// `list_agents`: all agents, or `None` when the backend reports no list.
    async fn list_agents(&self) -> Result<Option<Vec<AgentRecord>>>;

    /// `set_selected_agent`: selects `id` and returns the backend's record.
    async fn set_selected_agent(&self, id: &str) -> Result<AgentRecord>;

    /// `list_chats`: chat summaries scoped to one agent.
    async fn list_chats(&self, agent_id: &str) -> Result<Vec<ChatRecord>>;

    /// `get_chat`: the full record of one chat (`None` if unknown).
    async fn get_chat(&self, chat_id: &str) -> Result<Option<ChatRecord>>;
}
