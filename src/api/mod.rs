//! Raindrop API module.
//!
//! This module provides:
//! - The `RaindropClient` abstraction used by the downloader
//! - HTTP client for the Raindrop REST API
//! - API response types

pub mod client;
pub mod types;

pub use client::{ApiSettings, RaindropApi, RaindropClient, DEFAULT_BASE_URL};
pub use types::*;
