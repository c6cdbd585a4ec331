//! Backend commands and the router that dispatches them by name.
//!
//! Arguments arrive as a JSON object with camelCase keys; results are
//! returned as JSON. Handlers report failures as strings.

pub mod agent;
pub mod carter;
pub mod chat;

use std::sync::Arc;

use async_trait::async_trait;
use carter_core::CarterError;
use carter_core::invoke::{Invoke, commands};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::app::AppState;

pub async fn is_db_ready(state: &AppState) -> bool {
    state.is_library_ready().await
}

#[derive(Deserialize)]
struct IdArgs {
    id: String,
}

#[derive(Deserialize)]
struct CreateAgentArgs {
    name: String,
    key: String,
}

#[derive(Deserialize)]
struct UpdateAgentArgs {
    id: String,
    name: String,
    key: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChatIdArgs {
    chat_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AgentIdArgs {
    agent_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateChatArgs {
    title: String,
    id: String,
    agent_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppendMessageArgs {
    chat_id: String,
    content: String,
    #[serde(default)]
    is_from_agent: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChatTurnArgs {
    chat_id: String,
    agent_key: String,
    input: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AgentSessionArgs {
    chat_id: String,
    agent_key: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersonaliseArgs {
    chat_id: String,
    agent_key: String,
    text: String,
}

fn parse_args<T: DeserializeOwned>(command: &str, args: Value) -> Result<T, String> {
    let args = if args.is_null() {
        Value::Object(Default::default())
    } else {
        args
    };
    serde_json::from_value(args).map_err(|e| format!("Invalid arguments for '{}': {}", command, e))
}

fn respond<T: Serialize>(result: Result<T, String>) -> Result<Value, String> {
    result.and_then(|value| serde_json::to_value(value).map_err(|e| e.to_string()))
}

/// Dispatches named commands to their handlers.
pub struct CommandRouter {
    state: Arc<AppState>,
}

impl CommandRouter {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    pub async fn dispatch(&self, command: &str, args: Value) -> Result<Value, String> {
        let state = self.state.as_ref();
        tracing::debug!(command, "[Command] dispatch");

        match command {
            commands::IS_DB_READY => respond(Ok(is_db_ready(state).await)),
            // Agents
            commands::LIST_AGENTS => respond(agent::list_agents(state).await),
            commands::SET_SELECTED_AGENT => {
                let IdArgs { id } = parse_args(command, args)?;
                respond(agent::set_selected_agent(id, state).await)
            }
            commands::GET_SELECTED_AGENT => respond(agent::get_selected_agent(state).await),
            commands::CREATE_AGENT => {
                let CreateAgentArgs { name, key } = parse_args(command, args)?;
                respond(agent::create_agent(name, key, state).await)
            }
            commands::UPDATE_AGENT => {
                let UpdateAgentArgs { id, name, key } = parse_args(command, args)?;
                respond(agent::update_agent(id, name, key, state).await)
            }
            commands::REMOVE_AGENT => {
                let IdArgs { id } = parse_args(command, args)?;
                respond(agent::remove_agent(id, state).await)
            }
            // Chats
            commands::GET_CHAT => {
                let ChatIdArgs { chat_id } = parse_args(command, args)?;
                respond(chat::get_chat(chat_id, state).await)
            }
            commands::CREATE_CHAT => {
                let CreateChatArgs { title, id, agent_id } = parse_args(command, args)?;
                respond(chat::create_chat(title, id, agent_id, state).await)
            }
            commands::DELETE_CHAT => {
                let IdArgs { id } = parse_args(command, args)?;
                respond(chat::delete_chat(id, state).await)
            }
            commands::LIST_CHATS => {
                let AgentIdArgs { agent_id } = parse_args(command, args)?;
                respond(chat::list_chats(agent_id, state).await)
            }
            commands::APPEND_MESSAGE => {
                let AppendMessageArgs {
                    chat_id,
                    content,
                    is_from_agent,
                } = parse_args(command, args)?;
                respond(chat::append_message(chat_id, content, is_from_agent, state).await)
            }
            // Carter API
            commands::CHAT => {
                let ChatTurnArgs {
                    chat_id,
                    agent_key,
                    input,
                } = parse_args(command, args)?;
                respond(carter::chat(chat_id, agent_key, input, state).await)
            }
            commands::OPENER => {
                let AgentSessionArgs { chat_id, agent_key } = parse_args(command, args)?;
                respond(carter::opener(chat_id, agent_key, state).await)
            }
            commands::PERSONALISE => {
                let PersonaliseArgs {
                    chat_id,
                    agent_key,
                    text,
                } = parse_args(command, args)?;
                respond(carter::personalise(chat_id, agent_key, text, state).await)
            }
            commands::LIST_PLUGINS => {
                let AgentSessionArgs { chat_id, agent_key } = parse_args(command, args)?;
                respond(carter::list_plugins(chat_id, agent_key, state).await)
            }
            _ => Err(format!("Unknown command: {}", command)),
        }
    }
}

#[async_trait]
impl Invoke for CommandRouter {
    async fn invoke(&self, command: &str, args: Value) -> carter_core::Result<Value> {
        self.dispatch(command, args).await.map_err(|message| {
            tracing::warn!(command, "[Command] failed: {}", message);
            CarterError::invoke(command, message)
        })
    }
}
