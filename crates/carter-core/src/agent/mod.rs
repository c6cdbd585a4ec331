//! Agents: the selectable Carter personas that scope chats.

pub mod model;
pub mod repository;

pub use model::Agent;
pub use repository::AgentRepository;
