//! Chat-detail page loader.

use crate::error::{LoadError, call_failed};
use carter_core::backend::Backend;
use carter_core::invoke::commands;
use carter_core::record::ChatRecord;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatPageData {
    /// The backend's record for the requested id, unmodified
    pub chat: Option<ChatRecord>,
}

/// Fetches the full record of `chat_id`.
pub async fn load<B: Backend + ?Sized>(backend: &B, chat_id: &str) -> Result<ChatPageData, LoadError> {
    let chat = backend
        .get_chat(chat_id)
        .await
        .map_err(call_failed(commands::GET_CHAT))?;
    Ok(ChatPageData { chat })
}
