//! Chat repository trait.

use super::model::{Chat, ChatSummary, Message};
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for chats and their messages.
#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// Finds a chat with all of its messages.
    ///
    /// # Arguments
    ///
    /// * `chat_id` - The chat to look up
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Chat))`: Chat found
    /// - `Ok(None)`: Chat not found
    /// - `Err(_)`: Error occurred during retrieval
    async fn get_chat(&self, chat_id: &str) -> Result<Option<Chat>>;

    /// Creates an empty chat for an existing agent.
    ///
    /// # Arguments
    ///
    /// * `title` - Chat title
    /// * `id` - Caller-chosen chat id; must be unused
    /// * `agent_id` - Owning agent; must exist
    ///
    /// # Returns
    ///
    /// - `Ok(Chat)`: The new chat
    /// - `Err(CarterError::NotFound)`: Unknown agent
    /// - `Err(CarterError::AlreadyExists)`: A chat with `id` exists
    async fn create_chat(&self, title: &str, id: &str, agent_id: &str) -> Result<Chat>;

    /// Deletes a chat and returns the removed record.
    ///
    /// # Returns
    ///
    /// - `Ok(Chat)`: The removed chat with its messages
    /// - `Err(CarterError::NotFound)`: No chat with that id
    async fn delete_chat(&self, id: &str) -> Result<Chat>;

    /// Lists the chats of one agent as summaries (see [`Chat::summary`]).
    ///
    /// # Arguments
    ///
    /// * `agent_id` - Owning agent
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<ChatSummary>)`: Chats in creation order; empty for an unknown agent
    /// - `Err(CarterError)`: Error if retrieval fails
    async fn list_chats(&self, agent_id: &str) -> Result<Vec<ChatSummary>>;

    /// Appends a message to a chat.
    ///
    /// # Arguments
    ///
    /// * `chat_id` - The chat receiving the message
    /// * `content` - Message text
    /// * `is_from_agent` - `true` for agent replies, `false` for user input
    ///
    /// # Returns
    ///
    /// - `Ok(Message)`: The stored message
    /// - `Err(CarterError::NotFound)`: Unknown chat
    async fn append_message(&self, chat_id: &str, content: &str, is_from_agent: bool)
    -> Result<Message>;

    /// Appends several messages in one write.
    ///
    /// # Arguments
    ///
    /// * `chat_id` - The chat receiving the messages
    /// * `messages` - Messages in the order they should appear
    ///
    /// # Returns
    ///
    /// The stored messages. Either all of them are stored or, on error, none.
    async fn append_messages(&self, chat_id: &str, messages: Vec<Message>) -> Result<Vec<Message>>;
}
