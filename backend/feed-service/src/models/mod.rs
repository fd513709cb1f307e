use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Read-only projection of a poem for feed display.
///
/// Constructed fresh from gateway responses for each request; never persisted
/// by this service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Sole ordering key for the feed (ties broken by `id`).
    pub created_at: DateTime<Utc>,
}

/// One page of poems returned by a poem-source query, newest first.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoemBatch {
    pub items: Vec<FeedItem>,
    pub has_more: bool,
}

/// Feed response model returned to the transport layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedResponse {
    pub poems: Vec<FeedItem>,
    pub has_more: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}
