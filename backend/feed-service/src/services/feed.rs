//! Feed merge engine.
//!
//! Composes two independently paged upstream queries — poems by followed
//! authors and the public pool — into one recency-ordered, deduplicated,
//! privacy-filtered page. Each call is a fresh, read-only composition; the
//! engine holds no state across requests.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cursor::FeedCursor;
use crate::error::{AppError, Result};
use crate::gateways::{PoemSourceGateway, SocialGraphGateway};
use crate::models::{FeedItem, FeedResponse, PoemBatch};

pub struct FeedService {
    graph: Arc<dyn SocialGraphGateway>,
    poems: Arc<dyn PoemSourceGateway>,
}

impl FeedService {
    pub fn new(graph: Arc<dyn SocialGraphGateway>, poems: Arc<dyn PoemSourceGateway>) -> Self {
        Self { graph, poems }
    }

    /// Produce one feed page for `user_id`.
    ///
    /// `limit` must be positive; the transport layer clamps it to the
    /// service maximum before calling. `cursor` is the opaque token from the
    /// previous page, absent for the first page. Any upstream failure fails
    /// the whole call; no partial page is returned.
    pub async fn get_feed(
        &self,
        user_id: i64,
        limit: i64,
        cursor: Option<&str>,
    ) -> Result<FeedResponse> {
        if limit <= 0 {
            return Err(AppError::InvalidArgument(format!(
                "limit must be positive, got {}",
                limit
            )));
        }
        let limit = limit as u32;

        let before = FeedCursor::decode_opt(cursor)?;

        debug!(
            "building feed: user={} limit={} before={:?}",
            user_id, limit, before
        );

        // Follow and block lookups are independent reads of the social graph.
        let (followed, blocked) = tokio::try_join!(
            self.graph.followed_user_ids(user_id),
            self.graph.blocked_user_ids(user_id),
        )?;

        // Blocked always wins over followed.
        let eligible: HashSet<i64> = followed.difference(&blocked).copied().collect();

        // The public pool is fetched alongside the followed-author query
        // rather than sized to the shortfall: a newer public poem must be able
        // to outrank followed poems even when the followed set alone could
        // fill the page. Overlap between the two results is resolved at merge
        // time, so no poem-id exclusions are sent here.
        let followed_query = async {
            if eligible.is_empty() {
                Ok(PoemBatch::default())
            } else {
                self.poems
                    .poems_by_authors(eligible.clone(), limit, before)
                    .await
            }
        };
        let public_query = self
            .poems
            .public_poems(limit, blocked.clone(), HashSet::new(), before);

        let (followed_batch, public_batch) = tokio::try_join!(followed_query, public_query)?;

        // The eligible set and the exclusion list already keep blocked
        // authors out upstream; filtering again here makes the no-blocked-leak
        // guarantee hold even against a misbehaving gateway.
        let followed_items = drop_blocked(followed_batch.items, &blocked);
        let public_items = drop_blocked(public_batch.items, &blocked);

        let merged = merge_by_recency(followed_items, public_items);
        let merged_len = merged.len();

        let mut poems = merged;
        poems.truncate(limit as usize);

        let mut has_more =
            followed_batch.has_more || public_batch.has_more || merged_len > poems.len();

        if poems.is_empty() && has_more {
            // A page with no items cannot carry a continuation cursor, and
            // re-submitting the same cursor would loop forever.
            warn!(
                "upstream reported more items but returned none: user={}",
                user_id
            );
            has_more = false;
        }

        let next_cursor = if has_more {
            poems
                .last()
                .map(|item| FeedCursor::new(item.created_at, item.id).encode())
        } else {
            None
        };

        info!(
            "feed page built: user={} followed={} poems={} has_more={}",
            user_id,
            eligible.len(),
            poems.len(),
            has_more
        );

        Ok(FeedResponse {
            poems,
            has_more,
            next_cursor,
        })
    }
}

fn drop_blocked(items: Vec<FeedItem>, blocked: &HashSet<i64>) -> Vec<FeedItem> {
    items
        .into_iter()
        .filter(|item| !blocked.contains(&item.author_id))
        .collect()
}

/// Total-order key for the feed: newest first, ties broken by higher id
/// (ids are assigned monotonically, so the higher id is the later poem).
fn sort_key(item: &FeedItem) -> (i64, i64) {
    (item.created_at.timestamp_micros(), item.id)
}

/// Two-way merge of newest-first sequences, deduplicated by poem id with
/// primary-source priority (a followed author's poem that also appears in the
/// public pool is kept from the followed source).
fn merge_by_recency(primary: Vec<FeedItem>, secondary: Vec<FeedItem>) -> Vec<FeedItem> {
    let mut seen: HashSet<i64> = primary.iter().map(|item| item.id).collect();

    let mut merged = Vec::with_capacity(primary.len() + secondary.len());
    let mut left = primary.into_iter().peekable();
    let mut right = secondary.into_iter().peekable();

    loop {
        match (left.peek(), right.peek()) {
            (Some(a), Some(b)) => {
                if sort_key(a) >= sort_key(b) {
                    let item = left.next().unwrap();
                    merged.push(item);
                } else {
                    let item = right.next().unwrap();
                    if seen.insert(item.id) {
                        merged.push(item);
                    }
                }
            }
            (Some(_), None) => merged.push(left.next().unwrap()),
            (None, Some(_)) => {
                let item = right.next().unwrap();
                if seen.insert(item.id) {
                    merged.push(item);
                }
            }
            (None, None) => break,
        }
    }

    merged
}
