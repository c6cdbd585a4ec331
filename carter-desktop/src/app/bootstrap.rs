use std::sync::Arc;

use anyhow::{Context, Result};
use carter_core::CarterApi;
use carter_infrastructure::{CarterPaths, TomlLibraryRepository};

use crate::app::{AppState, Library};
use crate::commands::CommandRouter;

pub struct AppBootstrap {
    pub app_state: Arc<AppState>,
    pub router: Arc<CommandRouter>,
}

/// Composition root: builds the state and command router, then opens the
/// library store and attaches it.
///
/// # Arguments
///
/// * `paths` - Where the library file lives
/// * `api` - Client used by the Carter API commands
pub async fn bootstrap(paths: &CarterPaths, api: Arc<dyn CarterApi>) -> Result<AppBootstrap> {
    let app_state = Arc::new(AppState::new(api));
    let router = Arc::new(CommandRouter::new(app_state.clone()));

    let library_file = paths
        .library_file()
        .context("Failed to resolve library path")?;
    tracing::info!("[Bootstrap] Opening library at {:?}", library_file);

    let repository = Arc::new(
        TomlLibraryRepository::open(library_file.clone())
            .await
            .with_context(|| format!("Failed to open library at {:?}", library_file))?,
    );
    app_state
        .attach_library(Library::new(repository.clone(), repository))
        .await;

    tracing::info!("[Bootstrap] Library ready");
    Ok(AppBootstrap { app_state, router })
}
