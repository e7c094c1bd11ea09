//! Metadata sidecar (`.info.json`) files.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::Raindrop;
use crate::error::Result;
use crate::fs::paths::with_suffix;

/// Suffix appended to a file stem to name its sidecar.
pub const INFO_FILE_SUFFIX: &str = ".info.json";

/// Metadata stored next to a downloaded asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoFile {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub original_url: String,
}

impl From<&Raindrop> for InfoFile {
    fn from(raindrop: &Raindrop) -> Self {
        Self {
            title: raindrop.title.clone(),
            description: raindrop.description().to_string(),
            tags: raindrop.tags.clone(),
            created_at: raindrop.created,
            original_url: raindrop.link.clone(),
        }
    }
}

/// Result of a successful sidecar write call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidecarOutcome {
    Written(PathBuf),
    AlreadyExists(PathBuf),
}

/// Path of the sidecar for a file stem.
pub fn info_file_path(stem: &Path) -> PathBuf {
    with_suffix(stem, INFO_FILE_SUFFIX)
}

/// Write the sidecar for `raindrop` unless one already exists.
///
/// The JSON goes to a temporary file in the same directory first and is then
/// renamed into place, so readers never see a half-written sidecar.
pub async fn write_info_file(stem: &Path, raindrop: &Raindrop) -> Result<SidecarOutcome> {
    let path = info_file_path(stem);

    if path.exists() {
        tracing::info!("Info file already exists, skipping: {}", path.display());
        return Ok(SidecarOutcome::AlreadyExists(path));
    }

    let mut content = serde_json::to_vec_pretty(&InfoFile::from(raindrop))?;
    content.push(b'\n');

    let tmp_path = with_suffix(&path, &format!(".{}.tmp", uuid::Uuid::new_v4()));
    if let Err(e) = tokio::fs::write(&tmp_path, &content).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(e.into());
    }
    tokio::fs::rename(&tmp_path, &path).await?;

    Ok(SidecarOutcome::Written(path))
}
