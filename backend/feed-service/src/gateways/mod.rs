//! Upstream gateway contracts.
//!
//! Feed-service orchestrates data from the social-service relationship graph
//! and the content-service poem store to generate personalized feeds without
//! direct database queries. The engine depends only on these traits; the
//! concrete reqwest-backed clients live in [`remote`].

use std::collections::HashSet;

use async_trait::async_trait;
use thiserror::Error;

use crate::cursor::FeedCursor;
use crate::error::AppError;
use crate::models::PoemBatch;

pub mod remote;

pub use remote::{PoemSourceClient, SocialGraphClient};

/// Failure at the gateway boundary. Retry/backoff policy belongs to the
/// gateway implementation, never to the merge engine.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("upstream unavailable: {0}")]
    Unavailable(String),
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::NotFound(msg) => AppError::NotFound(msg),
            GatewayError::Unavailable(msg) => AppError::Upstream(msg),
        }
    }
}

/// Follow/block lookups for a requester.
///
/// Both calls fail with [`GatewayError::NotFound`] when the requester does
/// not exist or is deleted. Relationships can change between requests, so
/// results are read fresh each call and never cached process-wide.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SocialGraphGateway: Send + Sync {
    async fn followed_user_ids(&self, user_id: i64) -> Result<HashSet<i64>, GatewayError>;

    /// Users blocking or blocked by the requester (symmetric exclusion).
    async fn blocked_user_ids(&self, user_id: i64) -> Result<HashSet<i64>, GatewayError>;
}

/// Cursor-paginated poem queries, newest first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PoemSourceGateway: Send + Sync {
    /// Poems authored by any of `author_ids`, strictly older than `before`
    /// in the `(created_at desc, id desc)` total order when present.
    async fn poems_by_authors(
        &self,
        author_ids: HashSet<i64>,
        limit: u32,
        before: Option<FeedCursor>,
    ) -> Result<PoemBatch, GatewayError>;

    /// Public-pool poems, same ordering and cursor semantics, excluding the
    /// given authors and poem ids.
    async fn public_poems(
        &self,
        limit: u32,
        exclude_author_ids: HashSet<i64>,
        exclude_poem_ids: HashSet<i64>,
        before: Option<FeedCursor>,
    ) -> Result<PoemBatch, GatewayError>;
}
