//! Backend records as they travel over the invocation bridge.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One record exactly as the backend returned it.
///
/// The view loaders only read the few fields they need to sequence their
/// calls (`id`, `isSelected`); everything else, including fields this
/// client does not know about, is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Value);

/// An agent record from `list_agents` or `set_selected_agent`.
pub type AgentRecord = Record;

/// A chat record from `list_chats` or `get_chat`.
pub type ChatRecord = Record;

impl Record {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Serializes a typed model into a record.
    pub fn from_model<T: Serialize>(model: &T) -> Result<Self> {
        Ok(Self(serde_json::to_value(model)?))
    }

    /// The record's `id`, when it is a string.
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    /// Whether the record carries `isSelected: true`.
    pub fn is_selected(&self) -> bool {
        self.0.get("isSelected").and_then(Value::as_bool) == Some(true)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for Record {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Returns the first record flagged as selected.
pub fn find_selected(records: &[Record]) -> Option<&Record> {
    records.iter().find(|record| record.is_selected())
}
