//! Utility functions
//!
//! Provides environment variable handling and configuration loading.

pub mod env;

pub use env::{load_env, settings_from_env};
