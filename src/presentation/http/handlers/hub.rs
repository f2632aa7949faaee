//! Hub Handlers

use axum::{
    extract::{Extension, State},
    Json,
};

use crate::application::dto::HubStatsResponse;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Current connection and room counts
pub async fn get_stats(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<HubStatsResponse>, AppError> {
    if !auth.role.is_administrative() {
        return Err(AppError::Forbidden("Insufficient permissions".into()));
    }

    let snapshot = state
        .hub
        .snapshot()
        .await
        .ok_or_else(|| AppError::Unavailable("Hub is not running".into()))?;

    Ok(Json(snapshot.into()))
}
