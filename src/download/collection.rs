//! Collection download logic.

use std::future::Future;
use std::path::{Path, PathBuf};

use tokio_util::sync::CancellationToken;

use crate::api::{Raindrop, RaindropClient};
use crate::download::asset::{AssetDownloader, AssetOutcome};
use crate::download::sidecar::{write_info_file, SidecarOutcome};
use crate::download::state::RunReport;
use crate::error::{Error, Result};
use crate::fs::{collection_folder_name, dir_exists, ensure_dir};

/// What to download and where.
#[derive(Debug, Clone)]
pub struct DownloaderConfig {
    pub collection_id: i64,
    pub output_dir: PathBuf,
    /// Write a `.info.json` sidecar next to each asset.
    pub write_info_json: bool,
}

impl DownloaderConfig {
    /// Check the configuration before any network call is made.
    pub fn validate(&self) -> Result<()> {
        if self.collection_id == 0 {
            return Err(Error::CollectionIdNotSet);
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(Error::OutputDirNotSet);
        }

        if !dir_exists(&self.output_dir) {
            return Err(Error::OutputDirNotFound(self.output_dir.clone()));
        }

        Ok(())
    }
}

/// How a single bookmark was handled.
#[derive(Debug)]
enum ItemOutcome {
    NoAsset,
    Processed {
        asset: AssetOutcome,
        info: Option<Result<SidecarOutcome>>,
    },
}

/// Walks a collection page by page and downloads every image bookmark.
pub struct Downloader<C> {
    client: C,
    assets: AssetDownloader,
    config: DownloaderConfig,
}

impl<C: RaindropClient> Downloader<C> {
    pub fn new(client: C, assets: AssetDownloader, config: DownloaderConfig) -> Self {
        Self {
            client,
            assets,
            config,
        }
    }

    pub fn config(&self) -> &DownloaderConfig {
        &self.config
    }

    /// Download the configured collection.
    ///
    /// Fails only on invalid configuration or when the collection cannot be
    /// resolved. A page fetch failure or cancellation ends pagination and is
    /// recorded in [`RunReport::stopped`]; item failures are logged and counted.
    pub async fn run(&self, cancel: &CancellationToken) -> Result<RunReport> {
        self.config.validate()?;

        let collection_id = self.config.collection_id;
        let collection = cancellable(cancel, self.client.get_collection(collection_id))
            .await
            .map_err(|e| Error::CollectionFetch {
                collection_id,
                source: Box::new(e),
            })?;

        tracing::info!("Downloading collection: {}", collection.title);

        let target_dir = self
            .config
            .output_dir
            .join(collection_folder_name(&collection.title, collection.id));
        let mut report = RunReport::new(collection_id, collection.title, target_dir.clone());

        let mut page = 0u32;
        'pages: loop {
            tracing::info!(page, "Processing page");

            let fetch = self.client.get_image_drops(collection_id, page);
            let drops = match cancellable(cancel, fetch).await {
                Ok(drops) => drops,
                Err(e) => {
                    let err = Error::PageFetch {
                        collection_id,
                        page,
                        source: Box::new(e),
                    };
                    tracing::error!("Failed to get images from collection: {}", err);
                    report.stopped = Some(err);
                    break;
                }
            };
            report.pages_fetched += 1;

            for raindrop in &drops.items {
                if cancel.is_cancelled() {
                    report.stopped = Some(Error::Cancelled);
                    break 'pages;
                }

                tracing::info!(id = raindrop.id, "Downloading item: {}", raindrop.title);

                match self.process_item(raindrop, &target_dir, cancel).await {
                    Ok(outcome) => record(&mut report, raindrop, outcome),
                    Err(e) if e.is_cancelled() => {
                        tracing::warn!("Cancelled while downloading {}", raindrop.title);
                        report.stopped = Some(e);
                        break 'pages;
                    }
                    Err(e) => {
                        tracing::error!(
                            id = raindrop.id,
                            "Failed to download item {}: {}",
                            raindrop.title,
                            e
                        );
                        report.items_failed += 1;
                    }
                }
            }

            if !drops.has_more {
                break;
            }
            page += 1;
        }

        tracing::info!(
            "Collection download complete: {} downloaded, {} already present, {} failed",
            report.assets_downloaded,
            report.assets_existing,
            report.items_failed
        );

        Ok(report)
    }

    /// Download one bookmark and, if enabled, its sidecar.
    async fn process_item(
        &self,
        raindrop: &Raindrop,
        target_dir: &Path,
        cancel: &CancellationToken,
    ) -> Result<ItemOutcome> {
        ensure_dir(target_dir).await.map_err(|e| {
            Error::Download(format!(
                "failed to create directory {}: {}",
                target_dir.display(),
                e
            ))
        })?;

        let url = raindrop.file_link();
        if url.is_empty() {
            return Ok(ItemOutcome::NoAsset);
        }

        let stem = target_dir.join(raindrop.file_stem());
        let asset = cancellable(cancel, self.assets.download(url, &stem)).await?;

        let info = if self.config.write_info_json {
            Some(write_info_file(&stem, raindrop).await)
        } else {
            None
        };

        Ok(ItemOutcome::Processed { asset, info })
    }
}

fn record(report: &mut RunReport, raindrop: &Raindrop, outcome: ItemOutcome) {
    match outcome {
        ItemOutcome::NoAsset => {
            tracing::warn!(id = raindrop.id, "Bookmark has no cover URL: {}", raindrop.title);
            report.items_without_asset += 1;
        }
        ItemOutcome::Processed { asset, info } => {
            match asset {
                AssetOutcome::Downloaded(path) => {
                    tracing::info!("Downloaded: {}", path.display());
                    report.assets_downloaded += 1;
                }
                AssetOutcome::AlreadyExists(_) => report.assets_existing += 1,
            }

            match info {
                Some(Ok(SidecarOutcome::Written(_))) => report.info_files_written += 1,
                Some(Ok(SidecarOutcome::AlreadyExists(_))) => report.info_files_existing += 1,
                Some(Err(e)) => {
                    tracing::error!(
                        id = raindrop.id,
                        "Failed to create info file for {}: {}",
                        raindrop.title,
                        e
                    );
                    report.info_files_failed += 1;
                }
                None => {}
            }
        }
    }
}

/// Race a future against the cancellation token, dropping it if the token fires.
async fn cancellable<T>(
    cancel: &CancellationToken,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(Error::Cancelled),
        result = fut => result,
    }
}
