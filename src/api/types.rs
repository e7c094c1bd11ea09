//! API response type definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::fs::naming::drop_file_stem;

/// Number of drops requested per page. 50 is the maximum the API accepts.
pub const PER_PAGE: u32 = 50;

/// Response of `GET /raindrops/{collectionId}`.
#[derive(Debug, Deserialize)]
pub struct RaindropsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub result: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<Raindrop>,
    /// Total number of drops matching the query, across all pages.
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u64,
}

/// Response of `GET /collection/{id}`.
#[derive(Debug, Deserialize)]
pub struct CollectionResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub result: bool,
    pub item: CollectionItem,
}

/// A single bookmark ("raindrop").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Raindrop {
    #[serde(rename = "_id")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub link: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub excerpt: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub note: String,
    #[serde(default, deserialize_with = "null_as_default", rename = "type")]
    pub kind: String,
    /// Cover image URL; this is the asset that gets downloaded.
    #[serde(default, deserialize_with = "null_as_default")]
    pub cover: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub last_update: Option<DateTime<Utc>>,
    #[serde(default)]
    pub collection_id: Option<i64>,
}

impl Raindrop {
    /// URL of the downloadable asset, empty when there is none.
    pub fn file_link(&self) -> &str {
        &self.cover
    }

    /// Filename stem derived from the title.
    pub fn file_stem(&self) -> String {
        drop_file_stem(&self.title, self.id)
    }

    /// Free-text description written to the sidecar.
    pub fn description(&self) -> &str {
        &self.note
    }
}

/// Collection record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionItem {
    #[serde(rename = "_id")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub public: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cover: Vec<String>,
}

/// Treat an explicit JSON `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One page of image drops.
#[derive(Debug, Clone, Default)]
pub struct ImageDrops {
    pub items: Vec<Raindrop>,
    pub has_more: bool,
}

/// Whether drops remain after page `page` (zero-based) given the server's total.
pub fn has_more_pages(total: u64, page: u32) -> bool {
    total > (u64::from(page) + 1) * u64::from(PER_PAGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_more_pages_boundaries() {
        assert!(!has_more_pages(0, 0));
        assert!(!has_more_pages(50, 0));
        assert!(has_more_pages(51, 0));
        assert!(!has_more_pages(100, 1));
        assert!(has_more_pages(101, 1));
        assert!(!has_more_pages(20, 3));
    }

    #[test]
    fn test_drop_deserializes_api_shape() {
        let json = r#"{
            "_id": 42,
            "link": "https://example.com/page",
            "title": "My Image",
            "excerpt": "",
            "note": "a note",
            "type": "image",
            "cover": "https://cdn.example.com/a.png",
            "tags": ["cats", "art"],
            "created": "2024-03-01T10:00:00.000Z",
            "lastUpdate": "2024-03-02T10:00:00.000Z",
            "collectionId": 123,
            "collection": {"$ref": "collections", "$id": 123, "oid": 123}
        }"#;

        let raindrop: Raindrop = serde_json::from_str(json).unwrap();
        assert_eq!(raindrop.id, 42);
        assert_eq!(raindrop.kind, "image");
        assert_eq!(raindrop.file_link(), "https://cdn.example.com/a.png");
        assert_eq!(raindrop.description(), "a note");
        assert_eq!(raindrop.tags, vec!["cats", "art"]);
        assert_eq!(raindrop.collection_id, Some(123));
        assert_eq!(raindrop.file_stem(), "My_Image");
    }

    #[test]
    fn test_drop_tolerates_missing_fields() {
        let raindrop: Raindrop = serde_json::from_str(r#"{"_id": 7}"#).unwrap();
        assert!(raindrop.file_link().is_empty());
        assert!(raindrop.tags.is_empty());
    }

    #[test]
    fn test_page_with_null_fields_still_decodes() {
        let json = r#"{
            "result": true,
            "items": [
                {"_id": 1, "title": "First", "cover": "https://cdn.example.com/1.png"},
                {"_id": 2, "title": null, "cover": null, "note": null, "tags": null}
            ],
            "count": 2
        }"#;
        let response: RaindropsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.items.len(), 2);

        let second = &response.items[1];
        assert!(second.file_link().is_empty());
        assert!(second.description().is_empty());
        assert!(second.tags.is_empty());
        assert_eq!(second.file_stem(), "drop_2");
    }

    #[test]
    fn test_collection_response() {
        let json = r#"{
            "result": true,
            "item": {"_id": 123, "title": "Wallpapers", "count": 3, "user": {"$id": 1}}
        }"#;
        let response: CollectionResponse = serde_json::from_str(json).unwrap();
        assert!(response.result);
        assert_eq!(response.item.title, "Wallpapers");
        assert_eq!(response.item.count, 3);
    }
}
