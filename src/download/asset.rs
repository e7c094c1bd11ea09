//! Asset file downloading.

use std::path::{Path, PathBuf};
use std::time::Duration;

use futures::StreamExt;
use reqwest::{header, Client, Response};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::error::{Error, Result};
use crate::fs::paths::with_suffix;
use crate::output::create_download_bar;

/// Minimum file size to show progress bar (20 MB).
const PROGRESS_THRESHOLD: u64 = 20 * 1024 * 1024;

/// Suffix of the in-progress file a body is streamed into before the rename.
const PARTIAL_SUFFIX: &str = ".part";

/// Content types the downloader accepts, with the extension used on disk.
pub const CONTENT_TYPE_EXTENSIONS: &[(&str, &str)] = &[
    ("image/jpeg", ".jpg"),
    ("image/png", ".png"),
    ("image/gif", ".gif"),
    ("image/bmp", ".bmp"),
    ("image/webp", ".webp"),
    ("image/svg+xml", ".svg"),
    ("application/pdf", ".pdf"),
    ("text/plain", ".txt"),
    ("application/octet-stream", ".bin"),
];

/// Map a `Content-Type` header value to a file extension.
///
/// Parameters such as `; charset=utf-8` are ignored. Unknown types are rejected.
pub fn extension_for_content_type(content_type: &str) -> Result<&'static str> {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    CONTENT_TYPE_EXTENSIONS
        .iter()
        .find(|(mime, _)| *mime == essence)
        .map(|(_, ext)| *ext)
        .ok_or_else(|| Error::UnsupportedContentType(content_type.to_string()))
}

/// Find a file previously downloaded for `stem`, whatever its extension.
pub fn find_existing_asset(stem: &Path) -> Option<PathBuf> {
    CONTENT_TYPE_EXTENSIONS
        .iter()
        .map(|(_, ext)| with_suffix(stem, ext))
        .find(|path| path.exists())
}

/// Result of a successful download call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetOutcome {
    /// The body was fetched and written to this path.
    Downloaded(PathBuf),
    /// A file was already present at this path and was left untouched.
    AlreadyExists(PathBuf),
}

impl AssetOutcome {
    /// Path of the asset on disk.
    pub fn path(&self) -> &Path {
        match self {
            AssetOutcome::Downloaded(path) | AssetOutcome::AlreadyExists(path) => path,
        }
    }
}

/// Downloads asset URLs to disk, one GET per call.
#[derive(Debug, Clone)]
pub struct AssetDownloader {
    client: Client,
    show_progress: bool,
}

impl AssetDownloader {
    /// Create a downloader with its own HTTP client.
    pub fn new(user_agent: &str, timeout: Duration, show_progress: bool) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_client(client, show_progress))
    }

    /// Create a downloader around an existing HTTP client.
    pub fn with_client(client: Client, show_progress: bool) -> Self {
        Self {
            client,
            show_progress,
        }
    }

    /// Download `url` to `stem` plus the extension matching the response content type.
    ///
    /// Existing files are never overwritten. If any file for `stem` is already on
    /// disk no request is made at all.
    pub async fn download(&self, url: &str, stem: &Path) -> Result<AssetOutcome> {
        if url.is_empty() {
            return Err(Error::EmptyAssetUrl);
        }

        if let Some(existing) = find_existing_asset(stem) {
            tracing::info!("File already exists, skipping: {}", existing.display());
            return Ok(AssetOutcome::AlreadyExists(existing));
        }

        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Transfer {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let extension = extension_for_content_type(&content_type)?;

        let output_path = with_suffix(stem, extension);
        if output_path.exists() {
            tracing::info!("File already exists, skipping: {}", output_path.display());
            return Ok(AssetOutcome::AlreadyExists(output_path));
        }

        let partial_path = with_suffix(&output_path, PARTIAL_SUFFIX);
        if let Err(e) = self.write_body(response, &partial_path).await {
            let _ = tokio::fs::remove_file(&partial_path).await;
            return Err(e);
        }
        tokio::fs::rename(&partial_path, &output_path).await?;

        Ok(AssetOutcome::Downloaded(output_path))
    }

    /// Stream a response body into a file.
    async fn write_body(&self, response: Response, path: &Path) -> Result<()> {
        let content_length = response.content_length();
        let progress = (self.show_progress
            && content_length.is_some_and(|l| l > PROGRESS_THRESHOLD))
        .then(|| create_download_bar(content_length.unwrap_or(0)));

        let mut file = File::create(path).await?;
        let mut stream = response.bytes_stream();
        let mut downloaded: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| Error::Download(format!("Stream error: {}", e)))?;
            file.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;

            if let Some(ref pb) = progress {
                pb.set_position(downloaded);
            }
        }

        file.flush().await?;

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake-image-data";

    fn downloader() -> AssetDownloader {
        AssetDownloader::new("raindrop-images-dl-tests", Duration::from_secs(5), false).unwrap()
    }

    #[test]
    fn test_content_type_table() {
        let expected = [
            ("image/jpeg", ".jpg"),
            ("image/png", ".png"),
            ("image/gif", ".gif"),
            ("image/bmp", ".bmp"),
            ("image/webp", ".webp"),
            ("image/svg+xml", ".svg"),
            ("application/pdf", ".pdf"),
            ("text/plain", ".txt"),
            ("application/octet-stream", ".bin"),
        ];
        for (mime, ext) in expected {
            assert_eq!(extension_for_content_type(mime).unwrap(), ext, "{mime}");
        }
    }

    #[test]
    fn test_content_type_parameters_and_case() {
        assert_eq!(
            extension_for_content_type("text/plain; charset=utf-8").unwrap(),
            ".txt"
        );
        assert_eq!(extension_for_content_type("Image/PNG").unwrap(), ".png");
    }

    #[test]
    fn test_unsupported_content_type_fails_closed() {
        for mime in ["text/html", "", "image/avif", "video/mp4"] {
            assert!(matches!(
                extension_for_content_type(mime),
                Err(Error::UnsupportedContentType(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_download_writes_file_with_content_type_extension() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/image1"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(PNG_BYTES, "image/png"))
            .expect(1)
            .mount(&server)
            .await;

        let tmp = tempfile::tempdir().unwrap();
        let stem = tmp.path().join("Image_1");

        let outcome = downloader()
            .download(&format!("{}/image1", server.uri()), &stem)
            .await
            .unwrap();

        let expected = tmp.path().join("Image_1.png");
        assert_eq!(outcome, AssetOutcome::Downloaded(expected.clone()));
        assert_eq!(std::fs::read(&expected).unwrap(), PNG_BYTES);
        assert!(!tmp.path().join("Image_1.png.part").exists());
    }

    #[tokio::test]
    async fn test_download_twice_never_overwrites() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/image1"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(PNG_BYTES, "image/png"))
            .expect(1)
            .mount(&server)
            .await;

        let tmp = tempfile::tempdir().unwrap();
        let stem = tmp.path().join("Image_1");
        let url = format!("{}/image1", server.uri());
        let dl = downloader();

        dl.download(&url, &stem).await.unwrap();

        // Mark the file so an overwrite would be visible
        let path = tmp.path().join("Image_1.png");
        std::fs::write(&path, b"local edits").unwrap();

        let second = dl.download(&url, &stem).await.unwrap();
        assert_eq!(second, AssetOutcome::AlreadyExists(path.clone()));
        assert_eq!(std::fs::read(&path).unwrap(), b"local edits");
    }

    #[tokio::test]
    async fn test_existing_file_skips_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(PNG_BYTES, "image/png"))
            .expect(0)
            .mount(&server)
            .await;

        let tmp = tempfile::tempdir().unwrap();
        let existing = tmp.path().join("photo.jpg");
        std::fs::write(&existing, b"old").unwrap();

        let outcome = downloader()
            .download(&format!("{}/photo", server.uri()), &tmp.path().join("photo"))
            .await
            .unwrap();

        assert_eq!(outcome, AssetOutcome::AlreadyExists(existing));
    }

    #[tokio::test]
    async fn test_unsupported_content_type_writes_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw("<html></html>", "text/html"),
            )
            .mount(&server)
            .await;

        let tmp = tempfile::tempdir().unwrap();
        let err = downloader()
            .download(&format!("{}/page", server.uri()), &tmp.path().join("page"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::UnsupportedContentType(ref t) if t == "text/html"));
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_non_success_status_is_transfer_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let tmp = tempfile::tempdir().unwrap();
        let err = downloader()
            .download(&format!("{}/gone", server.uri()), &tmp.path().join("gone"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Transfer { status: 404, .. }));
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_empty_url_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let err = downloader()
            .download("", &tmp.path().join("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::EmptyAssetUrl));
    }
}
