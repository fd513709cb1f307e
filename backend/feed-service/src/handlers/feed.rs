use actix_web::{get, web, HttpRequest, HttpResponse};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::services::FeedService;

/// Hard cap on page size; larger requests are clamped, not rejected.
pub const MAX_PAGE_SIZE: i64 = 200;

#[derive(Debug, Deserialize)]
pub struct FeedQueryParams {
    #[serde(default = "default_limit")]
    pub limit: i64,
    pub cursor: Option<String>,
}

fn default_limit() -> i64 {
    20
}

pub struct FeedHandlerState {
    pub feed: Arc<FeedService>,
}

/// Requester identity, injected by the edge auth layer.
fn requester_id(req: &HttpRequest) -> Result<i64> {
    req.headers()
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<i64>().ok())
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::InvalidArgument("missing or invalid x-user-id header".to_string()))
}

#[get("")]
pub async fn get_feed(
    query: web::Query<FeedQueryParams>,
    http_req: HttpRequest,
    state: web::Data<FeedHandlerState>,
) -> Result<HttpResponse> {
    let user_id = requester_id(&http_req)?;
    let limit = query.limit.min(MAX_PAGE_SIZE);

    debug!(
        "feed request: user={} limit={} cursor={:?}",
        user_id, limit, query.cursor
    );

    let page = state
        .feed
        .get_feed(user_id, limit, query.cursor.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(page))
}

#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}
