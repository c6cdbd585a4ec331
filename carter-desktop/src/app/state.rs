use std::sync::Arc;

use carter_core::{AgentRepository, CarterApi, CarterError, ChatRepository};
use tokio::sync::RwLock;

/// Repositories backed by the opened library store.
#[derive(Clone)]
pub struct Library {
    pub agents: Arc<dyn AgentRepository>,
    pub chats: Arc<dyn ChatRepository>,
}

impl Library {
    pub fn new(agents: Arc<dyn AgentRepository>, chats: Arc<dyn ChatRepository>) -> Self {
        Self { agents, chats }
    }
}

/// Application state shared across commands.
///
/// The library is attached once bootstrap has opened it; until then the
/// store reports not ready and every store command fails. The Carter API
/// client is available from the start.
pub struct AppState {
    library: RwLock<Option<Library>>,
    api: Arc<dyn CarterApi>,
}

impl AppState {
    pub fn new(api: Arc<dyn CarterApi>) -> Self {
        Self {
            library: RwLock::new(None),
            api,
        }
    }

    pub fn api(&self) -> &dyn CarterApi {
        self.api.as_ref()
    }

    pub async fn attach_library(&self, library: Library) {
        *self.library.write().await = Some(library);
    }

    pub async fn is_library_ready(&self) -> bool {
        self.library.read().await.is_some()
    }

    /// Returns the attached library or `CarterError::NotReady`.
    pub async fn library(&self) -> Result<Library, CarterError> {
        self.library.read().await.clone().ok_or(CarterError::NotReady)
    }
}
