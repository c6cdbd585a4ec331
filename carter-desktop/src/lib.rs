//! Carter desktop: application state, backend commands and the CLI host.

pub mod app;
pub mod cli;
pub mod commands;
pub mod logging;
