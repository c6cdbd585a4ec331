//! View loaders: fetch what a view needs before it is shown.

pub mod chat_page;
pub mod layout;

pub use chat_page::ChatPageData;
pub use layout::{DATA_DEPENDENCY, LayoutData};
