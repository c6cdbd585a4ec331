//! Rendering and packaging posture of the client.
//!
//! The client renders entirely in the webview against the local backend:
//! no server-side rendering, pages prerendered where possible, and the build
//! emitted as static assets with a single fallback page for client routing.

use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Prerender {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RenderOptions {
    pub prerender: Prerender,
    pub ssr: bool,
}

/// Options declared by the root layout.
pub const LAYOUT_RENDER_OPTIONS: RenderOptions = RenderOptions {
    prerender: Prerender::Auto,
    ssr: false,
};

/// Static-asset packaging of the build output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StaticAdapter {
    pub pages: &'static str,
    pub assets: &'static str,
    pub fallback: Option<&'static str>,
}

pub const STATIC_ADAPTER: StaticAdapter = StaticAdapter {
    pages: "build",
    assets: "build",
    fallback: Some("index.html"),
};

impl StaticAdapter {
    /// Path of the fallback entry page under `root`, if one is configured.
    pub fn fallback_page(&self, root: &Path) -> Option<PathBuf> {
        self.fallback.map(|page| root.join(self.pages).join(page))
    }
}

/// Everything the packaging step needs, as one serializable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuildPosture {
    pub render: RenderOptions,
    pub adapter: StaticAdapter,
}

pub fn build_posture() -> BuildPosture {
    BuildPosture {
        render: LAYOUT_RENDER_OPTIONS,
        adapter: STATIC_ADAPTER,
    }
}
