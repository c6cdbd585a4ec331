//! Application layer for the Carter client.
//!
//! View loaders, the bridge-backed `Backend`, routing and the navigation
//! host that ties them together.

pub mod error;
pub mod invoke_backend;
pub mod loaders;
pub mod navigation;
pub mod render;
pub mod route;

pub use error::LoadError;
pub use invoke_backend::InvokeBackend;
pub use loaders::{ChatPageData, DATA_DEPENDENCY, LayoutData};
pub use navigation::{Navigation, Navigator, PageData};
pub use route::{LoadEvent, Route};
