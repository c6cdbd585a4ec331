//! Recording substitute for the backend.

#![allow(dead_code)]

use async_trait::async_trait;
use carter_core::agent::Agent;
use carter_core::backend::Backend;
use carter_core::chat::{Chat, Message};
use carter_core::error::{CarterError, Result};
use carter_core::record::{AgentRecord, ChatRecord, Record};
use std::collections::HashSet;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    IsDbReady,
    ListAgents,
    SetSelectedAgent { id: String },
    ListChats { agent_id: String },
    GetChat { chat_id: String },
}

/// Backend answering from fixed data and recording every call in order.
///
/// Data is held as typed models and handed out as the records the bridge
/// would carry.
pub struct RecordingBackend {
    pub ready: bool,
    pub agents: Option<Vec<Agent>>,
    /// Record returned by `set_selected_agent`; defaults to the requested agent flagged selected
    pub selection_override: Option<Agent>,
    pub chats: Vec<Chat>,
    pub failing: HashSet<&'static str>,
    pub calls: Mutex<Vec<Call>>,
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self {
            ready: true,
            agents: Some(Vec::new()),
            selection_override: None,
            chats: Vec::new(),
            failing: HashSet::new(),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl RecordingBackend {
    pub fn with_agents(agents: Vec<Agent>) -> Self {
        Self {
            agents: Some(agents),
            ..Self::default()
        }
    }

    pub fn failing_on(mut self, operation: &'static str) -> Self {
        self.failing.insert(operation);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, operation: &'static str, call: Call) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if self.failing.contains(operation) {
            return Err(CarterError::invoke(operation, "rejected"));
        }
        Ok(())
    }
}

#[async_trait]
impl Backend for RecordingBackend {
    async fn is_db_ready(&self) -> Result<bool> {
        self.record("is_db_ready", Call::IsDbReady)?;
        Ok(self.ready)
    }

    async fn list_agents(&self) -> Result<Option<Vec<AgentRecord>>> {
        self.record("list_agents", Call::ListAgents)?;
        self.agents.as_deref().map(records).transpose()
    }

    async fn set_selected_agent(&self, id: &str) -> Result<AgentRecord> {
        self.record("set_selected_agent", Call::SetSelectedAgent { id: id.to_string() })?;
        if let Some(agent) = &self.selection_override {
            return Record::from_model(agent);
        }
        let mut agent = self
            .agents
            .iter()
            .flatten()
            .find(|agent| agent.id == id)
            .cloned()
            .ok_or_else(|| CarterError::not_found("agent", id))?;
        agent.is_selected = true;
        Record::from_model(&agent)
    }

    async fn list_chats(&self, agent_id: &str) -> Result<Vec<ChatRecord>> {
        self.record(
            "list_chats",
            Call::ListChats {
                agent_id: agent_id.to_string(),
            },
        )?;
        self.chats
            .iter()
            .filter(|chat| chat.agent_id == agent_id)
            .map(|chat| Record::from_model(&chat.summary()))
            .collect()
    }

    async fn get_chat(&self, chat_id: &str) -> Result<Option<ChatRecord>> {
        self.record(
            "get_chat",
            Call::GetChat {
                chat_id: chat_id.to_string(),
            },
        )?;
        self.chats
            .iter()
            .find(|chat| chat.id == chat_id)
            .map(Record::from_model)
            .transpose()
    }
}

pub fn records<T: serde::Serialize>(models: &[T]) -> Result<Vec<Record>> {
    models.iter().map(Record::from_model).collect()
}

pub fn record<T: serde::Serialize>(model: &T) -> Record {
    Record::from_model(model).unwrap()
}

pub fn agent(id: &str, selected: bool) -> Agent {
    let mut agent = Agent::new(format!("Agent {}", id), "key");
    agent.id = id.to_string();
    agent.is_selected = selected;
    agent
}

pub fn chat(id: &str, agent_id: &str, replies: &[&str]) -> Chat {
    let mut chat = Chat::new(id, format!("Chat {}", id), agent_id);
    chat.messages = replies.iter().map(|text| Message::new(*text, true)).collect();
    chat
}
