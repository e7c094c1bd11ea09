//! Configuration module for raindrop-images-dl.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Configuration validation

pub mod loader;
pub mod validation;

pub use loader::{AccountConfig, ApiConfig, Config, OptionsConfig};
pub use validation::{parse_collection_id, validate_config};
