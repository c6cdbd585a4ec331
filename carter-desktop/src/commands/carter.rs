//! Carter API commands. Conversation turns are recorded in the chat.

use carter_core::api::{ChatResponse, OpenerResponse, PersonaliseResponse, Plugin};
use carter_core::{CarterError, Message};

use crate::app::{AppState, Library};

async fn ensure_chat_exists(library: &Library, chat_id: &str) -> Result<(), String> {
    library
        .chats
        .get_chat(chat_id)
        .await
        .map_err(|e| e.to_string())?
        .map(|_| ())
        .ok_or_else(|| CarterError::not_found("chat", chat_id).to_string())
}

/// Sends `input` to the agent and stores the input and the reply.
///
/// Nothing is stored when the API call fails or the reply has no text.
pub async fn chat(
    chat_id: String,
    agent_key: String,
    input: String,
    state: &AppState,
) -> Result<ChatResponse, String> {
    let library = state.library().await.map_err(|e| e.to_string())?;
    ensure_chat_exists(&library, &chat_id).await?;

    let response = state
        .api()
        .chat(&agent_key, &chat_id, &input)
        .await
        .map_err(|e| e.to_string())?;
    let reply = response
        .output
        .as_ref()
        .map(|output| output.text.clone())
        .ok_or_else(|| CarterError::api("reply has no output").to_string())?;

    library
        .chats
        .append_messages(
            &chat_id,
            vec![Message::new(input, false), Message::new(reply, true)],
        )
        .await
        .map_err(|e| e.to_string())?;

    tracing::info!("[Command] Recorded exchange in chat {}", chat_id);
    Ok(response)
}

/// Asks the agent to open the conversation and stores its greeting.
pub async fn opener(
    chat_id: String,
    agent_key: String,
    state: &AppState,
) -> Result<OpenerResponse, String> {
    let library = state.library().await.map_err(|e| e.to_string())?;
    ensure_chat_exists(&library, &chat_id).await?;

    let response = state
        .api()
        .opener(&agent_key, &chat_id)
        .await
        .map_err(|e| e.to_string())?;
    let greeting = response
        .output
        .as_ref()
        .map(|output| output.text.clone())
        .ok_or_else(|| CarterError::api("opener has no output").to_string())?;

    library
        .chats
        .append_message(&chat_id, &greeting, true)
        .await
        .map_err(|e| e.to_string())?;

    Ok(response)
}

pub async fn personalise(
    chat_id: String,
    agent_key: String,
    text: String,
    state: &AppState,
) -> Result<PersonaliseResponse, String> {
    state
        .api()
        .personalise(&agent_key, &chat_id, &text)
        .await
        .map_err(|e| e.to_string())
}

pub async fn list_plugins(
    chat_id: String,
    agent_key: String,
    state: &AppState,
) -> Result<Vec<Plugin>, String> {
    state
        .api()
        .plugins(&agent_key, &chat_id)
        .await
        .map_err(|e| e.to_string())
}
