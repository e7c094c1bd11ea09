//! Run statistics.

use std::path::PathBuf;

use crate::error::Error;

/// Outcome of a collection run.
///
/// A run that resolved its collection always produces a report, even when
/// every item failed or pagination stopped early.
#[derive(Debug, Default)]
pub struct RunReport {
    pub collection_id: i64,
    pub collection_title: String,
    pub target_dir: PathBuf,

    // Statistics
    pub pages_fetched: u32,
    pub assets_downloaded: u64,
    pub assets_existing: u64,
    pub info_files_written: u64,
    pub info_files_existing: u64,
    pub info_files_failed: u64,
    pub items_without_asset: u64,
    pub items_failed: u64,

    /// Error that ended pagination before the last page, if any.
    pub stopped: Option<Error>,
}

impl RunReport {
    /// Create an empty report for a resolved collection.
    pub fn new(collection_id: i64, collection_title: String, target_dir: PathBuf) -> Self {
        Self {
            collection_id,
            collection_title,
            target_dir,
            ..Default::default()
        }
    }

    /// Total items seen across all fetched pages.
    pub fn items_seen(&self) -> u64 {
        self.assets_downloaded + self.assets_existing + self.items_without_asset + self.items_failed
    }

    /// Whether pagination ran to the last page.
    pub fn completed(&self) -> bool {
        self.stopped.is_none()
    }

    /// Whether the run was stopped by cancellation.
    pub fn cancelled(&self) -> bool {
        self.stopped.as_ref().is_some_and(Error::is_cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_items_seen_and_completion() {
        let mut report = RunReport::new(1, "c".into(), PathBuf::from("/tmp/c"));
        report.assets_downloaded = 2;
        report.assets_existing = 1;
        report.items_failed = 1;
        report.items_without_asset = 1;
        report.info_files_written = 2;

        assert_eq!(report.items_seen(), 5);
        assert!(report.completed());
        assert!(!report.cancelled());

        report.stopped = Some(Error::Cancelled);
        assert!(!report.completed());
        assert!(report.cancelled());
    }
}
