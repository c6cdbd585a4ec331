//! Root layout loader.
//!
//! Runs for every view except the landing page. It gates on the store being
//! ready, resolves the current agent (selecting the first agent when none is
//! flagged) and fetches that agent's chats.

use crate::error::{LoadError, call_failed};
use crate::route::LoadEvent;
use carter_core::backend::Backend;
use carter_core::error::CarterError;
use carter_core::invoke::commands;
use carter_core::record::{AgentRecord, ChatRecord, find_selected};
use serde::Serialize;

/// Dependency tag declared by the layout; invalidating it reloads agents and chats.
pub const DATA_DEPENDENCY: &str = "data";

/// Data shared by every view below the root layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutData {
    /// The agent that scopes `chats`; absent when there are no agents
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_agent: Option<AgentRecord>,
    /// All agents as returned by the backend; `None` if it returned no list
    pub agents: Option<Vec<AgentRecord>>,
    /// Chat summaries of `current_agent`, verbatim
    pub chats: Vec<ChatRecord>,
}

/// Loads [`LayoutData`] for `event`.
///
/// Returns `Ok(None)` without further calls on the landing route or when the
/// store is not ready. Calls are made strictly in sequence and the first
/// failure aborts the load.
pub async fn load<B: Backend + ?Sized>(
    backend: &B,
    event: &mut LoadEvent,
) -> Result<Option<LayoutData>, LoadError> {
    event.depends(DATA_DEPENDENCY);
    tracing::debug!(route = event.route().id(), "[Loader] layout");

    if event.route().is_landing() {
        return Ok(None);
    }

    let ready = backend
        .is_db_ready()
        .await
        .map_err(call_failed(commands::IS_DB_READY))?;
    if !ready {
        tracing::debug!("[Loader] Database not ready, skipping layout data");
        return Ok(None);
    }

    tracing::debug!("[Loader] Loading data...");
    let agents = backend
        .list_agents()
        .await
        .map_err(call_failed(commands::LIST_AGENTS))?;

    let listed = agents.as_deref().unwrap_or_default();
    let current_agent = match (find_selected(listed), listed.first()) {
        (Some(selected), _) => Some(selected.clone()),
        (None, Some(first)) => {
            let first_id = record_id(first, commands::SET_SELECTED_AGENT)?;
            tracing::info!("[Loader] No agent selected, selecting {}", first_id);
            let selected = backend
                .set_selected_agent(first_id)
                .await
                .map_err(call_failed(commands::SET_SELECTED_AGENT))?;
            if selected.id() != Some(first_id) {
                tracing::warn!(
                    "[Loader] Backend selected {:?} instead of {}",
                    selected.id(),
                    first_id
                );
            }
            Some(selected)
        }
        (None, None) => None,
    };

    let chats = match &current_agent {
        Some(agent) => backend
            .list_chats(record_id(agent, commands::LIST_CHATS)?)
            .await
            .map_err(call_failed(commands::LIST_CHATS))?,
        None => Vec::new(),
    };

    Ok(Some(LayoutData {
        current_agent,
        agents,
        chats,
    }))
}

/// The agent id the next call is keyed on; a record without one cannot be
/// passed to `operation`.
fn record_id<'a>(agent: &'a AgentRecord, operation: &'static str) -> Result<&'a str, LoadError> {
    agent.id().ok_or_else(|| {
        call_failed(operation)(CarterError::invoke(operation, "agent record has no id"))
    })
}
