//! Domain layer for the Carter desktop client.
//!
//! Models (agents, chats), the shared error type, and the traits that
//! separate the view loaders and commands from storage and transport.

pub mod agent;
pub mod api;
pub mod backend;
pub mod chat;
pub mod error;
pub mod invoke;
pub mod record;

pub use agent::{Agent, AgentRepository};
pub use api::CarterApi;
pub use backend::Backend;
pub use chat::{Chat, ChatRepository, ChatSummary, Message};
pub use error::{CarterError, Result};
pub use invoke::Invoke;
pub use record::{AgentRecord, ChatRecord, Record};
