//! Opaque pagination cursor for the feed.
//!
//! Encodes the `(created_at, id)` pair of the last emitted item as
//! base64("{created_at_micros}:{poem_id}"). Decoding is strict: a token that
//! does not decode to exactly that shape is rejected with `InvalidCursor`
//! rather than silently treated as "first page", so a manipulated cursor can
//! never skip or replay content undetected.

use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, TimeZone, Utc};

use crate::error::AppError;

/// Decoded cursor position: the total-order key `(created_at, id)` of the
/// last item emitted on the previous page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedCursor {
    pub created_at: DateTime<Utc>,
    pub poem_id: i64,
}

impl FeedCursor {
    pub fn new(created_at: DateTime<Utc>, poem_id: i64) -> Self {
        Self {
            created_at,
            poem_id,
        }
    }

    /// Encode as an opaque token exchanged with callers.
    pub fn encode(&self) -> String {
        let raw = format!("{}:{}", self.created_at.timestamp_micros(), self.poem_id);
        general_purpose::STANDARD.encode(raw)
    }

    /// Decode a token. Every malformation is an `InvalidCursor` error.
    pub fn decode(token: &str) -> Result<Self, AppError> {
        if token.is_empty() {
            return Err(AppError::InvalidCursor("empty cursor".to_string()));
        }

        let decoded = general_purpose::STANDARD
            .decode(token)
            .map_err(|_| AppError::InvalidCursor("cursor is not valid base64".to_string()))?;
        let raw = String::from_utf8(decoded)
            .map_err(|_| AppError::InvalidCursor("cursor is not valid utf-8".to_string()))?;

        let (ts_str, id_str) = raw
            .split_once(':')
            .ok_or_else(|| AppError::InvalidCursor("cursor is missing separator".to_string()))?;

        let micros = ts_str
            .parse::<i64>()
            .map_err(|_| AppError::InvalidCursor("cursor timestamp is not numeric".to_string()))?;
        let poem_id = id_str
            .parse::<i64>()
            .map_err(|_| AppError::InvalidCursor("cursor id is not numeric".to_string()))?;
        if poem_id <= 0 {
            return Err(AppError::InvalidCursor(
                "cursor id must be positive".to_string(),
            ));
        }

        let created_at = Utc
            .timestamp_micros(micros)
            .single()
            .ok_or_else(|| AppError::InvalidCursor("cursor timestamp out of range".to_string()))?;

        Ok(Self {
            created_at,
            poem_id,
        })
    }

    /// Decode an optional token; `None` means "first page".
    pub fn decode_opt(token: Option<&str>) -> Result<Option<Self>, AppError> {
        token.map(Self::decode).transpose()
    }
}
