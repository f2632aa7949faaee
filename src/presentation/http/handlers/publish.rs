//! Publish Handlers
//!
//! Room messages, announcements and school-wide notices. Every publish is
//! fire-and-forget: a 2xx means the payload reached the hub, not that any
//! client received it.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::{
    AnnouncementRequest, MessageObject, NoticeResponse, SendMessageRequest, SystemNoticeRequest,
};
use crate::application::services::{
    Author, BroadcastError, BroadcastService, BroadcastServiceImpl,
};
use crate::infrastructure::realtime::Hub;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::shared::validation::validate;
use crate::startup::AppState;

fn broadcast_service(state: &AppState) -> BroadcastServiceImpl<Hub> {
    BroadcastServiceImpl::new(Arc::new(state.hub.clone()))
}

fn map_broadcast_error(error: BroadcastError) -> AppError {
    match error {
        BroadcastError::InvalidRoom => AppError::BadRequest("Room ID is required".into()),
        BroadcastError::Forbidden => AppError::Forbidden("Insufficient permissions".into()),
        e => AppError::Internal(e.to_string()),
    }
}

/// Post a message to a room
pub async fn send_message(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(room_id): Path<String>,
    Json(body): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<MessageObject>), AppError> {
    validate(&body)?;

    let message = broadcast_service(&state)
        .send_message(&room_id, &Author::from(&auth), body)
        .map_err(map_broadcast_error)?;

    Ok((StatusCode::CREATED, Json(message)))
}

/// Post an announcement to a room
pub async fn send_announcement(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(room_id): Path<String>,
    Json(body): Json<AnnouncementRequest>,
) -> Result<(StatusCode, Json<MessageObject>), AppError> {
    validate(&body)?;

    let message = broadcast_service(&state)
        .send_announcement(&room_id, &Author::from(&auth), body)
        .map_err(map_broadcast_error)?;

    Ok((StatusCode::CREATED, Json(message)))
}

/// Send a notice to every connected client
pub async fn send_notice(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<SystemNoticeRequest>,
) -> Result<(StatusCode, Json<NoticeResponse>), AppError> {
    validate(&body)?;

    let notice = broadcast_service(&state)
        .send_notice(&Author::from(&auth), body)
        .map_err(map_broadcast_error)?;

    Ok((StatusCode::ACCEPTED, Json(NoticeResponse { notice })))
}
