pub mod auth;
pub mod config;
pub mod error;
pub mod model;
pub mod view;

// Re-export common error type
pub use error::{FolioError, Result};
