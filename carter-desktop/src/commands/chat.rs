use carter_core::{Chat, ChatSummary, Message};

use crate::app::AppState;

/// Returns the chat with all of its messages, or `None` for an unknown id.
pub async fn get_chat(chat_id: String, state: &AppState) -> Result<Option<Chat>, String> {
    let library = state.library().await.map_err(|e| e.to_string())?;
    library
        .chats
        .get_chat(&chat_id)
        .await
        .map_err(|e| e.to_string())
}

pub async fn create_chat(
    title: String,
    id: String,
    agent_id: String,
    state: &AppState,
) -> Result<Chat, String> {
    let library = state.library().await.map_err(|e| e.to_string())?;
    library
        .chats
        .create_chat(&title, &id, &agent_id)
        .await
        .map_err(|e| e.to_string())
}

pub async fn delete_chat(id: String, state: &AppState) -> Result<Chat, String> {
    let library = state.library().await.map_err(|e| e.to_string())?;
    library
        .chats
        .delete_chat(&id)
        .await
        .map_err(|e| e.to_string())
}

/// Chats of one agent, each with its latest agent reply as preview.
pub async fn list_chats(agent_id: String, state: &AppState) -> Result<Vec<ChatSummary>, String> {
    let library = state.library().await.map_err(|e| e.to_string())?;
    library
        .chats
        .list_chats(&agent_id)
        .await
        .map_err(|e| e.to_string())
}

pub async fn append_message(
    chat_id: String,
    content: String,
    is_from_agent: bool,
    state: &AppState,
) -> Result<Message, String> {
    let library = state.library().await.map_err(|e| e.to_string())?;
    library
        .chats
        .append_message(&chat_id, &content, is_from_agent)
        .await
        .map_err(|e| e.to_string())
}
