//! Invocation bridge: call a backend command by name with JSON arguments.

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Command names understood by the backend.
pub mod commands {
    pub const IS_DB_READY: &str = "is_db_ready";
    pub const LIST_AGENTS: &str = "list_agents";
    pub const SET_SELECTED_AGENT: &str = "set_selected_agent";
    pub const GET_SELECTED_AGENT: &str = "get_selected_agent";
    pub const CREATE_AGENT: &str = "create_agent";
    pub const UPDATE_AGENT: &str = "update_agent";
    pub const REMOVE_AGENT: &str = "remove_agent";
    pub const GET_CHAT: &str = "get_chat";
    pub const CREATE_CHAT: &str = "create_chat";
    pub const DELETE_CHAT: &str = "delete_chat";
    pub const LIST_CHATS: &str = "list_chats";
    pub const APPEND_MESSAGE: &str = "append_message";
    // Carter API
    pub const CHAT: &str = "chat";
    pub const OPENER: &str = "opener";
    pub const PERSONALISE: &str = "personalise";
    pub const LIST_PLUGINS: &str = "list_plugins";
}

/// Transport that executes a named backend command.
///
/// `args` is a JSON object with camelCase keys; the result is whatever JSON
/// the command produced. A failed command yields `CarterError::Invoke`.
#[async_trait]
pub trait Invoke: Send + Sync {
    async fn invoke(&self, command: &str, args: Value) -> Result<Value>;
}
