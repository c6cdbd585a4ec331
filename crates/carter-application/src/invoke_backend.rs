//! `Backend` implementation that talks over the invocation bridge.

use async_trait::async_trait;
use carter_core::backend::Backend;
use carter_core::error::{CarterError, Result};
use carter_core::invoke::{Invoke, commands};
use carter_core::record::{AgentRecord, ChatRecord};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::Arc;

/// Calls backend commands by name with camelCase argument objects.
///
/// The `Backend` methods return the backend's records as they arrived;
/// only the envelope (list, optional) is checked.
pub struct InvokeBackend<I: ?Sized> {
    bridge: Arc<I>,
}

impl<I: ?Sized> Clone for InvokeBackend<I> {
    fn clone(&self) -> Self {
        Self {
            bridge: self.bridge.clone(),
        }
    }
}

impl<I: Invoke + ?Sized> InvokeBackend<I> {
    pub fn new(bridge: Arc<I>) -> Self {
        Self { bridge }
    }

    /// Invokes `command` and decodes the result as `T`.
    ///
    /// A result that does not match `T` is reported as a failure of that command.
    pub async fn invoke<T: DeserializeOwned>(&self, command: &str, args: Value) -> Result<T> {
        let value = self.bridge.invoke(command, args).await?;
        serde_json::from_value(value)
            .map_err(|e| CarterError::invoke(command, format!("unexpected response: {}", e)))
    }
}

#[async_trait]
impl<I: Invoke + ?Sized> Backend for InvokeBackend<I> {
    async fn is_db_ready(&self) -> Result<bool> {
        self.invoke(commands::IS_DB_READY, json!({})).await
    }

    async fn list_agents(&self) -> Result<Option<Vec<AgentRecord>>> {
        self.invoke(commands::LIST_AGENTS, json!({})).await
    }

    async fn set_selected_agent(&self, id: &str) -> Result<AgentRecord> {
        self.invoke(commands::SET_SELECTED_AGENT, json!({ "id": id }))
            .await
    }

    async fn list_chats(&self, agent_id: &str) -> Result<Vec<ChatRecord>> {
        self.invoke(commands::LIST_CHATS, json!({ "agentId": agent_id }))
            .await
    }

    async fn get_chat(&self, chat_id: &str) -> Result<Option<ChatRecord>> {
        self.invoke(commands::GET_CHAT, json!({ "chatId": chat_id }))
            .await
    }
}
