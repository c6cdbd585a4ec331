//! Agent repository trait.
//!
//! Defines the interface for agent persistence operations.

use super::model::Agent;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for managing agents.
///
/// Decouples the command layer from the storage mechanism (TOML file,
/// database, remote API).
#[async_trait]
pub trait AgentRepository: Send + Sync {
    /// Lists all agents in insertion order.
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<Agent>)`: All stored agents (possibly empty)
    /// - `Err(CarterError)`: Error if retrieval fails
    async fn list_agents(&self) -> Result<Vec<Agent>>;

    /// Creates and stores a new, unselected agent.
    ///
    /// # Arguments
    ///
    /// * `name` - Display name
    /// * `key` - Carter API key used for this agent's conversations
    ///
    /// # Returns
    ///
    /// - `Ok(Agent)`: The stored agent with its generated id
    /// - `Err(CarterError)`: Error if the library could not be written
    async fn create_agent(&self, name: &str, key: &str) -> Result<Agent>;

    /// Updates the name and key of an existing agent.
    ///
    /// # Arguments
    ///
    /// * `id` - Agent to update
    /// * `name` - New display name
    /// * `key` - New Carter API key
    ///
    /// # Returns
    ///
    /// - `Ok(Agent)`: The updated agent; its selection flag is unchanged
    /// - `Err(CarterError::NotFound)`: No agent with that id
    async fn update_agent(&self, id: &str, name: &str, key: &str) -> Result<Agent>;

    /// Removes an agent together with its chats.
    ///
    /// # Arguments
    ///
    /// * `id` - Agent to remove
    ///
    /// # Returns
    ///
    /// - `Ok(Agent)`: The removed record
    /// - `Err(CarterError::NotFound)`: No agent with that id
    async fn remove_agent(&self, id: &str) -> Result<Agent>;

    /// Marks `id` as the selected agent and clears every other selection.
    ///
    /// # Returns
    ///
    /// - `Ok(Agent)`: The newly selected agent
    /// - `Err(CarterError::NotFound)`: No agent with that id
    async fn set_selected_agent(&self, id: &str) -> Result<Agent>;

    /// Returns the selected agent, if one is flagged.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Agent))`: The first agent whose selection flag is set
    /// - `Ok(None)`: No agent is selected
    /// - `Err(CarterError)`: Error if retrieval fails
    async fn get_selected_agent(&self) -> Result<Option<Agent>>;
}
