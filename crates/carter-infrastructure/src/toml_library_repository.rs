//! TOML-backed library: agents, chats and messages in one document.
//!
//! File layout:
//! ```text
//! data_dir/
//! └── library.toml
//!     ├── [[agents]]
//!     └── [[chats]]
//!         └── [[chats.messages]]
//! ```
//!
//! Every mutation is a locked read-modify-write of the whole document,
//! executed on the blocking pool.

use crate::storage::AtomicTomlFile;
use async_trait::async_trait;
use carter_core::agent::{Agent, AgentRepository};
use carter_core::chat::{Chat, ChatRepository, ChatSummary, Message};
use carter_core::error::{CarterError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct LibraryDocument {
    #[serde(default)]
    agents: Vec<Agent>,
    #[serde(default)]
    chats: Vec<Chat>,
}

impl LibraryDocument {
    fn agent_mut(&mut self, id: &str) -> Result<&mut Agent> {
        self.agents
            .iter_mut()
            .find(|agent| agent.id == id)
            .ok_or_else(|| CarterError::not_found("agent", id))
    }

    fn chat_mut(&mut self, id: &str) -> Result<&mut Chat> {
        self.chats
            .iter_mut()
            .find(|chat| chat.id == id)
            .ok_or_else(|| CarterError::not_found("chat", id))
    }
}

/// Library repository persisted in a single TOML file.
#[derive(Debug, Clone)]
pub struct TomlLibraryRepository {
    file: Arc<AtomicTomlFile<LibraryDocument>>,
}

impl TomlLibraryRepository {
    /// Opens the library at `path`, creating an empty one if the file is missing.
    ///
    /// # Arguments
    ///
    /// * `path` - Location of `library.toml`
    ///
    /// # Returns
    ///
    /// - `Ok(Self)`: Repository over the opened library
    /// - `Err(CarterError)`: An existing file could not be parsed
    pub async fn open(path: PathBuf) -> Result<Self> {
        let file = Arc::new(AtomicTomlFile::<LibraryDocument>::new(path));
        let repo = Self { file };

        let created = repo
            .run_blocking(|file| match file.load()? {
                Some(_) => Ok(false),
                None => {
                    file.save(&LibraryDocument::default())?;
                    Ok(true)
                }
            })
            .await?;

        if created {
            tracing::info!("[Library] Created empty library at {:?}", repo.file.path());
        } else {
            tracing::debug!("[Library] Opened library at {:?}", repo.file.path());
        }

        Ok(repo)
    }

    async fn run_blocking<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&AtomicTomlFile<LibraryDocument>) -> Result<R> + Send + 'static,
        R: Send + 'static,
    {
        let file = self.file.clone();
        tokio::task::spawn_blocking(move || f(&file))
            .await
            .map_err(|e| CarterError::internal(format!("Failed to join task: {}", e)))?
    }

    async fn read<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(LibraryDocument) -> Result<R> + Send + 'static,
        R: Send + 'static,
    {
        self.run_blocking(move |file| f(file.load()?.unwrap_or_default()))
            .await
    }

    async fn write<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut LibraryDocument) -> Result<R> + Send + 'static,
        R: Send + 'static,
    {
        self.run_blocking(move |file| file.update(LibraryDocument::default(), f))
            .await
    }
}

#[async_trait]
impl AgentRepository for TomlLibraryRepository {
    async fn list_agents(&self) -> Result<Vec<Agent>> {
        self.read(|doc| Ok(doc.agents)).await
    }

    async fn create_agent(&self, name: &str, key: &str) -> Result<Agent> {
        let agent = Agent::new(name, key);
        let stored = agent.clone();
        self.write(move |doc| {
            doc.agents.push(stored);
            Ok(())
        })
        .await?;
        tracing::info!("[Library] Created agent {} ({})", agent.name, agent.id);
        Ok(agent)
    }

    async fn update_agent(&self, id: &str, name: &str, key: &str) -> Result<Agent> {
        let (id, name, key) = (id.to_string(), name.to_string(), key.to_string());
        self.write(move |doc| {
            let agent = doc.agent_mut(&id)?;
            agent.name = name;
            agent.key = key;
            Ok(agent.clone())
        })
        .await
    }

    async fn remove_agent(&self, id: &str) -> Result<Agent> {
        let id = id.to_string();
        let removed = self
            .write(move |doc| {
                let index = doc
                    .agents
                    .iter()
                    .position(|agent| agent.id == id)
                    .ok_or_else(|| CarterError::not_found("agent", &id))?;
                doc.chats.retain(|chat| chat.agent_id != id);
                Ok(doc.agents.remove(index))
            })
            .await?;
        tracing::info!("[Library] Removed agent {}", removed.id);
        Ok(removed)
    }

    async fn set_selected_agent(&self, id: &str) -> Result<Agent> {
        let id = id.to_string();
        self.write(move |doc| {
            doc.agent_mut(&id)?;
            for agent in doc.agents.iter_mut() {
                agent.is_selected = agent.id == id;
            }
            doc.agent_mut(&id).map(|agent| agent.clone())
        })
        .await
    }

    async fn get_selected_agent(&self) -> Result<Option<Agent>> {
        self.read(|doc| Ok(doc.agents.into_iter().find(|agent| agent.is_selected)))
            .await
    }
}

#[async_trait]
impl ChatRepository for TomlLibraryRepository {
    async fn get_chat(&self, chat_id: &str) -> Result<Option<Chat>> {
        let chat_id = chat_id.to_string();
        self.read(move |doc| Ok(doc.chats.into_iter().find(|chat| chat.id == chat_id)))
            .await
    }

    async fn create_chat(&self, title: &str, id: &str, agent_id: &str) -> Result<Chat> {
        let chat = Chat::new(id, title, agent_id);
        let stored = chat.clone();
        self.write(move |doc| {
            if !doc.agents.iter().any(|agent| agent.id == stored.agent_id) {
                return Err(CarterError::not_found("agent", &stored.agent_id));
            }
            if doc.chats.iter().any(|existing| existing.id == stored.id) {
                return Err(CarterError::already_exists("chat", &stored.id));
            }
            doc.chats.push(stored);
            Ok(())
        })
        .await?;
        Ok(chat)
    }

    async fn delete_chat(&self, id: &str) -> Result<Chat> {
        let id = id.to_string();
        self.write(move |doc| {
            let index = doc
                .chats
                .iter()
                .position(|chat| chat.id == id)
                .ok_or_else(|| CarterError::not_found("chat", &id))?;
            Ok(doc.chats.remove(index))
        })
        .await
    }

    async fn list_chats(&self, agent_id: &str) -> Result<Vec<ChatSummary>> {
        let agent_id = agent_id.to_string();
        self.read(move |doc| {
            Ok(doc
                .chats
                .iter()
                .filter(|chat| chat.agent_id == agent_id)
                .map(Chat::summary)
                .collect())
        })
        .await
    }

    async fn append_message(
        &self,
        chat_id: &str,
        content: &str,
        is_from_agent: bool,
    ) -> Result<Message> {
        let chat_id = chat_id.to_string();
        let message = Message::new(content, is_from_agent);
        let stored = message.clone();
        self.write(move |doc| {
            doc.chat_mut(&chat_id)?.messages.push(stored);
            Ok(())
        })
        .await?;
        Ok(message)
    }

    async fn append_messages(&self, chat_id: &str, messages: Vec<Message>) -> Result<Vec<Message>> {
        let chat_id = chat_id.to_string();
        let stored = messages.clone();
        self.write(move |doc| {
            doc.chat_mut(&chat_id)?.messages.extend(stored);
            Ok(())
        })
        .await?;
        Ok(messages)
    }
}
