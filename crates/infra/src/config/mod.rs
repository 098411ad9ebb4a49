//! Configuration loading
//!
//! Resolves the server configuration from environment variables, config
//! files or built-in defaults.

pub mod loader;

pub use loader::{load, load_from_env, load_from_file, probe_config_paths};
