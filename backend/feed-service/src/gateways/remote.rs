//! reqwest-backed gateway clients for the social-service and content-service
//! internal HTTP APIs.
//!
//! These clients own the transport policy (timeouts, connection pooling via
//! the shared `reqwest::Client`); the merge engine only sees [`GatewayError`].

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{GatewayError, PoemSourceGateway, SocialGraphGateway};
use crate::cursor::FeedCursor;
use crate::models::PoemBatch;

fn map_send_error(err: reqwest::Error) -> GatewayError {
    GatewayError::Unavailable(format!("request failed: {}", err))
}

async fn check_status(
    resp: reqwest::Response,
    subject: &str,
) -> Result<reqwest::Response, GatewayError> {
    match resp.status() {
        StatusCode::NOT_FOUND => Err(GatewayError::NotFound(subject.to_string())),
        status if status.is_success() => Ok(resp),
        status => {
            let body = resp.text().await.unwrap_or_default();
            Err(GatewayError::Unavailable(format!(
                "upstream returned {}: {}",
                status, body
            )))
        }
    }
}

/// Wire form of the cursor position passed to poem-source queries.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BeforeParam {
    created_at: DateTime<Utc>,
    poem_id: i64,
}

impl From<FeedCursor> for BeforeParam {
    fn from(cursor: FeedCursor) -> Self {
        Self {
            created_at: cursor.created_at,
            poem_id: cursor.poem_id,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserIdsResponse {
    user_ids: Vec<i64>,
}

/// Social graph client: follow and block lookups.
#[derive(Clone)]
pub struct SocialGraphClient {
    client: Client,
    base_url: String,
}

impl SocialGraphClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, anyhow::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn fetch_ids(&self, user_id: i64, relation: &str) -> Result<HashSet<i64>, GatewayError> {
        let url = format!(
            "{}/internal/v1/users/{}/{}",
            self.base_url, user_id, relation
        );
        debug!("social-graph lookup: {}", url);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(map_send_error)?;
        let resp = check_status(resp, &format!("user {}", user_id)).await?;

        let body: UserIdsResponse = resp
            .json()
            .await
            .map_err(|e| GatewayError::Unavailable(format!("bad response body: {}", e)))?;
        Ok(body.user_ids.into_iter().collect())
    }
}

#[async_trait]
impl SocialGraphGateway for SocialGraphClient {
    async fn followed_user_ids(&self, user_id: i64) -> Result<HashSet<i64>, GatewayError> {
        self.fetch_ids(user_id, "following-ids").await
    }

    async fn blocked_user_ids(&self, user_id: i64) -> Result<HashSet<i64>, GatewayError> {
        self.fetch_ids(user_id, "blocked-ids").await
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PoemsByAuthorsRequest {
    author_ids: Vec<i64>,
    limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    before: Option<BeforeParam>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PublicPoemsRequest {
    limit: u32,
    exclude_author_ids: Vec<i64>,
    exclude_poem_ids: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    before: Option<BeforeParam>,
}

/// Poem source client: followed-author and public-pool queries.
#[derive(Clone)]
pub struct PoemSourceClient {
    client: Client,
    base_url: String,
}

impl PoemSourceClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, anyhow::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn post_query<B: Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<PoemBatch, GatewayError> {
        let url = format!("{}/internal/v1/poems/{}", self.base_url, endpoint);
        debug!("poem-source query: {}", url);

        let resp = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(map_send_error)?;
        let resp = check_status(resp, endpoint).await?;

        resp.json::<PoemBatch>()
            .await
            .map_err(|e| GatewayError::Unavailable(format!("bad response body: {}", e)))
    }
}

#[async_trait]
impl PoemSourceGateway for PoemSourceClient {
    async fn poems_by_authors(
        &self,
        author_ids: HashSet<i64>,
        limit: u32,
        before: Option<FeedCursor>,
    ) -> Result<PoemBatch, GatewayError> {
        let mut ids: Vec<i64> = author_ids.into_iter().collect();
        ids.sort_unstable();
        self.post_query(
            "by-authors",
            &PoemsByAuthorsRequest {
                author_ids: ids,
                limit,
                before: before.map(BeforeParam::from),
            },
        )
        .await
    }

    async fn public_poems(
        &self,
        limit: u32,
        exclude_author_ids: HashSet<i64>,
        exclude_poem_ids: HashSet<i64>,
        before: Option<FeedCursor>,
    ) -> Result<PoemBatch, GatewayError> {
        let mut authors: Vec<i64> = exclude_author_ids.into_iter().collect();
        authors.sort_unstable();
        let mut poems: Vec<i64> = exclude_poem_ids.into_iter().collect();
        poems.sort_unstable();
        self.post_query(
            "public",
            &PublicPoemsRequest {
                limit,
                exclude_author_ids: authors,
                exclude_poem_ids: poems,
                before: before.map(BeforeParam::from),
            },
        )
        .await
    }
}
