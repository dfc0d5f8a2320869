//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - `types`: Config struct definitions, loading and compilation
//! - [`validation`]: Checks run before patterns are compiled

mod types;
pub mod validation;

pub use types::{Config, ConfigError, ParamConfig, PatternConfig, ResponseConfig};
pub use validation::ValidationError;
