//! Shared state and configuration for the aadgraph tools.
//!
//! This crate owns the persisted token file and the configuration layer used
//! by the `aadgraph` CLI.

pub mod config;
pub mod dotenv;
pub mod token;

// Re-export commonly used types
pub use config::Config;
pub use dotenv::DotenvFile;
pub use token::{StoredToken, read_token, remove_token, token_path, write_token};
