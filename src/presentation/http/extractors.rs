//! Custom Extractors
//!
//! Axum extractors for request parsing.

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;

use crate::shared::error::AppError;

/// Identity of a websocket connection, taken from the query string.
///
/// Rejects the request before the upgrade when `userId` is missing or blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectParams {
    pub user_id: String,
    /// `None` when the connection only listens to school-wide traffic
    pub room_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConnectParams {
    user_id: Option<String>,
    room_id: Option<String>,
}

impl<S> FromRequestParts<S> for ConnectParams
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(raw) = Query::<RawConnectParams>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::BadRequest("Invalid query string".into()))?;

        let user_id = raw
            .user_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::BadRequest("User ID is required".into()))?;

        let room_id = raw
            .room_id
            .map(|room| room.trim().to_string())
            .filter(|room| !room.is_empty());

        Ok(ConnectParams { user_id, room_id })
    }
}
