//! Raindrop Images DL - download image bookmarks from Raindrop.io collections.
//!
//! The library walks a collection page by page, downloads each bookmark's cover
//! image into `<output>/<collection title>/` and optionally writes a
//! `.info.json` metadata file next to it.
//!
//! # Features
//!
//! - Paginated retrieval of image drops (50 per page)
//! - File extension chosen from the response content type
//! - Idempotent: existing images and metadata files are never overwritten
//! - A failing item is logged and skipped, the run continues
//! - Cancellation of in-flight requests
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use raindrop_images_dl::{AssetDownloader, Config, Downloader, RaindropApi};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(Path::new("config.toml"))?;
//!     let api = RaindropApi::new(&config.api_settings())?;
//!     let assets = AssetDownloader::new(&config.api.user_agent, config.timeout(), true)?;
//!     let downloader = Downloader::new(api, assets, config.downloader_config()?);
//!
//!     let report = downloader.run(&CancellationToken::new()).await?;
//!     println!("{} images downloaded", report.assets_downloaded);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fs;
pub mod output;

// Re-exports for convenience
pub use api::{Raindrop, RaindropApi, RaindropClient};
pub use config::Config;
pub use download::{AssetDownloader, Downloader, DownloaderConfig, RunReport};
pub use error::{Error, Result};
