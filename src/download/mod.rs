//! Download module for collection downloading.
//!
//! This module provides:
//! - Collection traversal (`Downloader`)
//! - Asset file downloading
//! - Metadata sidecar files
//! - Run statistics

pub mod asset;
pub mod collection;
pub mod sidecar;
pub mod state;

pub use asset::{extension_for_content_type, AssetDownloader, AssetOutcome};
pub use collection::{Downloader, DownloaderConfig};
pub use sidecar::{write_info_file, InfoFile, SidecarOutcome};
pub use state::RunReport;
