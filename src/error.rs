//! Error types for the raindrop-images-dl application.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    #[error("Collection ID not set")]
    CollectionIdNotSet,

    #[error("Output directory not set")]
    OutputDirNotSet,

    #[error("Output directory does not exist: {}", .0.display())]
    OutputDirNotFound(PathBuf),

    // API errors
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unexpected status code {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Failed to get collection with id {collection_id}: {source}")]
    CollectionFetch {
        collection_id: i64,
        #[source]
        source: Box<Error>,
    },

    #[error("Failed to get page {page} of collection {collection_id}: {source}")]
    PageFetch {
        collection_id: i64,
        page: u32,
        #[source]
        source: Box<Error>,
    },

    // Download errors
    #[error("Failed to download {url}: HTTP {status}")]
    Transfer { status: u16, url: String },

    #[error("Unsupported content type: '{0}'")]
    UnsupportedContentType(String),

    #[error("Bookmark has no asset URL")]
    EmptyAssetUrl,

    #[error("Download failed: {0}")]
    Download(String),

    // File system errors
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("Operation cancelled")]
    Cancelled,

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    // URL parsing errors
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl Error {
    /// Whether this error (or the error it wraps) is a cancellation.
    pub fn is_cancelled(&self) -> bool {
        match self {
            Error::Cancelled => true,
            Error::CollectionFetch { source, .. } | Error::PageFetch { source, .. } => {
                source.is_cancelled()
            }
            _ => false,
        }
    }

    /// Whether this is a configuration problem detected before any I/O.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Error::Config(_)
                | Error::ConfigValidation { .. }
                | Error::MissingConfig(_)
                | Error::CollectionIdNotSet
                | Error::OutputDirNotSet
                | Error::OutputDirNotFound(_)
        )
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const ABORT: i32 = 1;
    pub const API_ERROR: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
    pub const UNEXPECTED_ERROR: i32 = 5;
}
