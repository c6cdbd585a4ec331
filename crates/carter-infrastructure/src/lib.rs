//! Infrastructure layer: paths, configuration, TOML persistence and the
//! Carter API client.

pub mod carter_client;
pub mod config_service;
pub mod paths;
pub mod storage;
pub mod toml_library_repository;

pub use crate::carter_client::{CarterClient, DEFAULT_CARTER_URL};
pub use crate::config_service::{ClientConfig, ConfigService};
pub use crate::paths::CarterPaths;
pub use crate::toml_library_repository::TomlLibraryRepository;
