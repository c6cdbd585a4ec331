//! Routes, load events and dependency tags.

use serde::Serialize;
use std::collections::BTreeSet;

/// Route id of the landing view.
pub const LANDING_ROUTE_ID: &str = "/";
/// Route id of the chat-detail view.
pub const CHAT_ROUTE_ID: &str = "/chat/[id]";

/// A navigation target resolved from a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Route {
    /// `/`
    Landing,
    /// `/chat/<id>`
    Chat { id: String },
    /// Any other path; the normalized path is its route id.
    Other { path: String },
}

impl Route {
    /// Resolves a path such as `/chat/C42` or `/settings/`.
    pub fn resolve(path: &str) -> Self {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Landing,
            ["chat", id] => Route::Chat { id: id.to_string() },
            _ => Route::Other {
                path: format!("/{}", segments.join("/")),
            },
        }
    }

    /// The route id (pattern) this route matched.
    pub fn id(&self) -> &str {
        match self {
            Route::Landing => LANDING_ROUTE_ID,
            Route::Chat { .. } => CHAT_ROUTE_ID,
            Route::Other { path } => path,
        }
    }

    pub fn is_landing(&self) -> bool {
        matches!(self, Route::Landing)
    }
}

/// Dependency tags a loader declared; invalidating one re-runs the load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dependencies {
    tags: BTreeSet<String>,
}

impl Dependencies {
    pub fn insert(&mut self, tag: impl Into<String>) {
        self.tags.insert(tag.into());
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }
}

/// Input handed to a loader for one navigation.
#[derive(Debug, Clone)]
pub struct LoadEvent {
    route: Route,
    dependencies: Dependencies,
}

impl LoadEvent {
    pub fn new(route: Route) -> Self {
        Self {
            route,
            dependencies: Dependencies::default(),
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Declares that the load result depends on `tag`.
    pub fn depends(&mut self, tag: impl Into<String>) {
        self.dependencies.insert(tag);
    }

    pub fn dependencies(&self) -> &Dependencies {
        &self.dependencies
    }

    pub fn into_dependencies(self) -> Dependencies {
        self.dependencies
    }
}
