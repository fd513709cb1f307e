//! In-memory gateway fixtures shared by the integration tests.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use feed_service::cursor::FeedCursor;
use feed_service::gateways::{GatewayError, PoemSourceGateway, SocialGraphGateway};
use feed_service::models::{FeedItem, PoemBatch};

pub fn poem(id: i64, author_id: i64, secs: i64) -> FeedItem {
    FeedItem {
        id,
        author_id,
        title: format!("poem {}", id),
        content: "so much depends upon a red wheel barrow".to_string(),
        tags: vec!["imagism".to_string()],
        created_at: Utc.timestamp_opt(secs, 0).unwrap(),
    }
}

/// Social graph held in maps. `blocked` is stored as the already-symmetric
/// exclusion set for each user (blocking and blocked-by collapsed together,
/// as the upstream reports it).
#[derive(Default, Clone)]
pub struct InMemorySocialGraph {
    pub users: HashSet<i64>,
    pub follows: HashMap<i64, HashSet<i64>>,
    pub blocked: HashMap<i64, HashSet<i64>>,
}

impl InMemorySocialGraph {
    pub fn with_user(mut self, user_id: i64) -> Self {
        self.users.insert(user_id);
        self
    }

    pub fn following(mut self, user_id: i64, followed: &[i64]) -> Self {
        self.users.insert(user_id);
        self.follows
            .entry(user_id)
            .or_default()
            .extend(followed.iter().copied());
        self
    }

    pub fn blocking(mut self, user_id: i64, blocked: &[i64]) -> Self {
        self.users.insert(user_id);
        let entry = self.blocked.entry(user_id).or_default();
        entry.extend(blocked.iter().copied());
        // Symmetric: the other side excludes this user too.
        for other in blocked {
            self.blocked.entry(*other).or_default().insert(user_id);
        }
        self
    }
}

#[async_trait]
impl SocialGraphGateway for InMemorySocialGraph {
    async fn followed_user_ids(&self, user_id: i64) -> Result<HashSet<i64>, GatewayError> {
        if !self.users.contains(&user_id) {
            return Err(GatewayError::NotFound(format!("user {}", user_id)));
        }
        Ok(self.follows.get(&user_id).cloned().unwrap_or_default())
    }

    async fn blocked_user_ids(&self, user_id: i64) -> Result<HashSet<i64>, GatewayError> {
        if !self.users.contains(&user_id) {
            return Err(GatewayError::NotFound(format!("user {}", user_id)));
        }
        Ok(self.blocked.get(&user_id).cloned().unwrap_or_default())
    }
}

/// Poem store with a flat list of poems and a set marking which of them are
/// in the public pool. Queries reproduce the upstream contract: newest first,
/// strictly older than the cursor position, `has_more` when items remain.
#[derive(Default, Clone)]
pub struct InMemoryPoemSource {
    pub poems: Vec<FeedItem>,
    pub public_ids: HashSet<i64>,
}

impl InMemoryPoemSource {
    pub fn with_poem(mut self, item: FeedItem, public: bool) -> Self {
        if public {
            self.public_ids.insert(item.id);
        }
        self.poems.push(item);
        self
    }

    fn page<F>(&self, predicate: F, limit: u32, before: Option<FeedCursor>) -> PoemBatch
    where
        F: Fn(&FeedItem) -> bool,
    {
        let mut matches: Vec<FeedItem> = self
            .poems
            .iter()
            .filter(|item| predicate(item))
            .filter(|item| match before {
                Some(cursor) => {
                    (item.created_at.timestamp_micros(), item.id)
                        < (cursor.created_at.timestamp_micros(), cursor.poem_id)
                }
                None => true,
            })
            .cloned()
            .collect();

        matches.sort_by_key(|item| {
            std::cmp::Reverse((item.created_at.timestamp_micros(), item.id))
        });

        let has_more = matches.len() > limit as usize;
        matches.truncate(limit as usize);
        PoemBatch {
            items: matches,
            has_more,
        }
    }
}

#[async_trait]
impl PoemSourceGateway for InMemoryPoemSource {
    async fn poems_by_authors(
        &self,
        author_ids: HashSet<i64>,
        limit: u32,
        before: Option<FeedCursor>,
    ) -> Result<PoemBatch, GatewayError> {
        Ok(self.page(|item| author_ids.contains(&item.author_id), limit, before))
    }

    async fn public_poems(
        &self,
        limit: u32,
        exclude_author_ids: HashSet<i64>,
        exclude_poem_ids: HashSet<i64>,
        before: Option<FeedCursor>,
    ) -> Result<PoemBatch, GatewayError> {
        Ok(self.page(
            |item| {
                self.public_ids.contains(&item.id)
                    && !exclude_author_ids.contains(&item.author_id)
                    && !exclude_poem_ids.contains(&item.id)
            },
            limit,
            before,
        ))
    }
}

/// Gateway that always fails, for upstream-failure propagation tests.
#[derive(Default, Clone)]
pub struct BrokenPoemSource;

#[async_trait]
impl PoemSourceGateway for BrokenPoemSource {
    async fn poems_by_authors(
        &self,
        _author_ids: HashSet<i64>,
        _limit: u32,
        _before: Option<FeedCursor>,
    ) -> Result<PoemBatch, GatewayError> {
        Err(GatewayError::Unavailable("poem source is down".to_string()))
    }

    async fn public_poems(
        &self,
        _limit: u32,
        _exclude_author_ids: HashSet<i64>,
        _exclude_poem_ids: HashSet<i64>,
        _before: Option<FeedCursor>,
    ) -> Result<PoemBatch, GatewayError> {
        Err(GatewayError::Unavailable("poem source is down".to_string()))
    }
}
