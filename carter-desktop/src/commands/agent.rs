use carter_core::Agent;

use crate::app::AppState;

pub async fn list_agents(state: &AppState) -> Result<Vec<Agent>, String> {
    let library = state.library().await.map_err(|e| e.to_string())?;
    library.agents.list_agents().await.map_err(|e| e.to_string())
}

/// Selects an agent and clears the previous selection.
pub async fn set_selected_agent(id: String, state: &AppState) -> Result<Agent, String> {
    let library = state.library().await.map_err(|e| e.to_string())?;
    let agent = library
        .agents
        .set_selected_agent(&id)
        .await
        .map_err(|e| e.to_string())?;

    tracing::info!("[Command] Selected agent {}", agent.id);
    Ok(agent)
}

pub async fn get_selected_agent(state: &AppState) -> Result<Option<Agent>, String> {
    let library = state.library().await.map_err(|e| e.to_string())?;
    library
        .agents
        .get_selected_agent()
        .await
        .map_err(|e| e.to_string())
}

pub async fn create_agent(name: String, key: String, state: &AppState) -> Result<Agent, String> {
    let library = state.library().await.map_err(|e| e.to_string())?;
    library
        .agents
        .create_agent(&name, &key)
        .await
        .map_err(|e| e.to_string())
}

pub async fn update_agent(
    id: String,
    name: String,
    key: String,
    state: &AppState,
) -> Result<Agent, String> {
    let library = state.library().await.map_err(|e| e.to_string())?;
    library
        .agents
        .update_agent(&id, &name, &key)
        .await
        .map_err(|e| e.to_string())
}

/// Removes an agent and every chat it owns.
pub async fn remove_agent(id: String, state: &AppState) -> Result<Agent, String> {
    let library = state.library().await.map_err(|e| e.to_string())?;
    library
        .agents
        .remove_agent(&id)
        .await
        .map_err(|e| e.to_string())
}
