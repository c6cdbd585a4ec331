//! Chats and messages.

pub mod model;
pub mod repository;

pub use model::{Chat, ChatSummary, Message};
pub use repository::ChatRepository;
