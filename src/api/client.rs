//! Raindrop REST API HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::types::*;
use crate::error::{Error, Result};

/// Raindrop API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.raindrop.io/rest/v1";

/// Upper bound on how much of an error body is kept in error messages.
const MAX_ERROR_BODY: usize = 500;

/// Read operations the collection downloader needs from the service.
#[async_trait]
pub trait RaindropClient: Send + Sync {
    /// Fetch a collection by ID.
    async fn get_collection(&self, collection_id: i64) -> Result<CollectionItem>;

    /// Fetch one page (zero-based) of image drops from a collection.
    async fn get_image_drops(&self, collection_id: i64, page: u32) -> Result<ImageDrops>;
}

/// Settings used to build a [`RaindropApi`].
#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub api_key: String,
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

/// Raindrop API client authenticated with a bearer token.
pub struct RaindropApi {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl RaindropApi {
    /// Create a new API client.
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        if settings.api_key.trim().is_empty() {
            return Err(Error::MissingConfig("api_key".to_string()));
        }

        let base_url = parse_base_url(&settings.base_url)?;

        let client = Client::builder()
            .user_agent(&settings.user_agent)
            .timeout(settings.timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: settings.api_key.clone(),
            base_url,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    /// Make an authenticated GET request and check the status.
    async fn get(&self, path: &str, query: &[(&str, String)], what: &str) -> Result<Response> {
        let url = self.endpoint(path);
        tracing::debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .header(header::ACCEPT, "application/json")
            .query(query)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(what.to_string()));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::UnexpectedStatus {
                status: status.as_u16(),
                body: truncate(&body, MAX_ERROR_BODY).to_string(),
            });
        }

        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            Error::Decode(format!(
                "{}: {} - Response: {}",
                what,
                e,
                truncate(&text, MAX_ERROR_BODY)
            ))
        })
    }
}

#[async_trait]
impl RaindropClient for RaindropApi {
    async fn get_collection(&self, collection_id: i64) -> Result<CollectionItem> {
        let what = format!("collection {}", collection_id);
        let response = self
            .get(&format!("/collection/{}", collection_id), &[], &what)
            .await?;

        let collection: CollectionResponse = Self::decode(response, &what).await?;
        if !collection.result {
            tracing::debug!("Collection response for {} has result=false", collection_id);
        }

        Ok(collection.item)
    }

    async fn get_image_drops(&self, collection_id: i64, page: u32) -> Result<ImageDrops> {
        let what = format!("drops of collection {} (page {})", collection_id, page);
        let query = [
            ("perpage", PER_PAGE.to_string()),
            ("page", page.to_string()),
            ("search", "type:image".to_string()),
        ];

        let response = self
            .get(&format!("/raindrops/{}", collection_id), &query, &what)
            .await?;

        let drops: RaindropsResponse = Self::decode(response, &what).await?;
        tracing::debug!(
            "Page {} returned {} drops ({} total)",
            page,
            drops.items.len(),
            drops.count
        );

        Ok(ImageDrops {
            has_more: has_more_pages(drops.count, page),
            items: drops.items,
        })
    }
}

/// Parse and check an API base URL.
pub fn parse_base_url(input: &str) -> Result<Url> {
    let url = Url::parse(input)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::ConfigValidation {
            field: "base_url".to_string(),
            message: format!("Unsupported URL scheme '{}'", other),
        }),
    }
}

fn truncate(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
