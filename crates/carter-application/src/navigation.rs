//! Navigation host: runs the loaders for a route and re-runs them on
//! invalidation.
//!
//! Each navigation takes a generation number. When a newer navigation starts
//! before an older one finishes, the older result is discarded.

use crate::error::LoadError;
use crate::loaders::{ChatPageData, LayoutData, chat_page, layout};
use crate::route::{Dependencies, LoadEvent, Route};
use carter_core::backend::Backend;
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, watch};

/// Everything loaded for one view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageData {
    pub route: Route,
    /// Root layout data; `None` on the landing view or before the store is ready
    pub layout: Option<LayoutData>,
    /// Page-specific data; only the chat view has any
    pub page: Option<ChatPageData>,
}

/// Outcome of a navigation.
#[derive(Debug, Clone, PartialEq)]
pub enum Navigation {
    Loaded(PageData),
    /// A newer navigation started while this one was loading
    Superseded,
}

#[derive(Debug)]
struct CurrentPage {
    route: Route,
    dependencies: Dependencies,
}

pub struct Navigator<B: ?Sized> {
    backend: Arc<B>,
    generation: AtomicU64,
    current: Mutex<Option<CurrentPage>>,
    invalidations: watch::Sender<u64>,
}

impl<B: Backend + ?Sized> Navigator<B> {
    pub fn new(backend: Arc<B>) -> Self {
        let (invalidations, _) = watch::channel(0);
        Self {
            backend,
            generation: AtomicU64::new(0),
            current: Mutex::new(None),
            invalidations,
        }
    }

    /// Navigates to `path` and loads its data.
    pub async fn navigate(&self, path: &str) -> Result<Navigation, LoadError> {
        self.load_route(Route::resolve(path)).await
    }

    /// Re-runs the current navigation if its loaders declared `tag`.
    ///
    /// Returns `Ok(None)` when nothing depends on `tag`.
    pub async fn invalidate(&self, tag: &str) -> Result<Option<Navigation>, LoadError> {
        let route = {
            let current = self.current.lock().await;
            match current.as_ref() {
                Some(page) if page.dependencies.contains(tag) => page.route.clone(),
                _ => return Ok(None),
            }
        };

        self.invalidations.send_modify(|count| *count += 1);
        tracing::debug!(tag, route = route.id(), "[Navigator] Invalidated");

        self.load_route(route).await.map(Some)
    }

    /// Invalidation counter; changes every time a reload is triggered.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.invalidations.subscribe()
    }

    /// Route of the last navigation that completed.
    pub async fn current_route(&self) -> Option<Route> {
        self.current.lock().await.as_ref().map(|page| page.route.clone())
    }

    async fn load_route(&self, route: Route) -> Result<Navigation, LoadError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let mut event = LoadEvent::new(route.clone());
        let layout = layout::load(self.backend.as_ref(), &mut event).await?;
        let page = match &route {
            Route::Chat { id } => Some(chat_page::load(self.backend.as_ref(), id).await?),
            _ => None,
        };

        let mut current = self.current.lock().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(route = route.id(), "[Navigator] Discarding superseded load");
            return Ok(Navigation::Superseded);
        }
        *current = Some(CurrentPage {
            route: route.clone(),
            dependencies: event.into_dependencies(),
        });

        Ok(Navigation::Loaded(PageData {
            route,
            layout,
            page,
        }))
    }
}
