//! Broadcast Service
//!
//! Publish entry points used by the REST layer: build the domain object,
//! wrap it in an envelope, and hand the serialized payload to the hub.

use std::sync::Arc;

use crate::application::dto::{
    AnnouncementRequest, HubEnvelope, MessageObject, NoticeObject, SenderObject,
    SendMessageRequest, SystemNoticeRequest,
};
use crate::domain::{Broadcaster, ChatMessage, Role, SystemNotice};

/// Authenticated publisher of a message or notice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub user_id: String,
    pub role: Role,
    pub full_name: Option<String>,
}

impl Author {
    fn as_sender(&self) -> SenderObject {
        SenderObject {
            id: self.user_id.clone(),
            role: self.role,
            full_name: self.full_name.clone(),
        }
    }
}

/// Broadcast service trait
pub trait BroadcastService: Send + Sync {
    /// Post a regular message to a room
    fn send_message(
        &self,
        room_id: &str,
        author: &Author,
        request: SendMessageRequest,
    ) -> Result<MessageObject, BroadcastError>;

    /// Post an announcement to a room (teachers and above)
    fn send_announcement(
        &self,
        room_id: &str,
        author: &Author,
        request: AnnouncementRequest,
    ) -> Result<MessageObject, BroadcastError>;

    /// Send a notice to every connected client (principals and admins)
    fn send_notice(
        &self,
        author: &Author,
        request: SystemNoticeRequest,
    ) -> Result<NoticeObject, BroadcastError>;
}

/// Broadcast service errors
#[derive(Debug, thiserror::Error)]
pub enum BroadcastError {
    #[error("Room ID is required")]
    InvalidRoom,

    #[error("Insufficient permissions")]
    Forbidden,

    #[error("Failed to encode envelope: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Broadcast service implementation
pub struct BroadcastServiceImpl<B: Broadcaster> {
    broadcaster: Arc<B>,
}

impl<B: Broadcaster> BroadcastServiceImpl<B> {
    pub fn new(broadcaster: Arc<B>) -> Self {
        Self { broadcaster }
    }

    fn publish_to_room(
        &self,
        room_id: &str,
        message: ChatMessage,
        author: &Author,
    ) -> Result<MessageObject, BroadcastError> {
        let object = MessageObject::from_message(message, Some(author.as_sender()));
        let envelope = HubEnvelope::for_message(object.clone());
        let payload = envelope.to_payload()?;

        self.broadcaster.broadcast_to_room(room_id, payload);

        tracing::debug!(
            room_id = %room_id,
            message_id = %object.id,
            event = envelope.event_name(),
            "Message published"
        );
        Ok(object)
    }
}

impl<B: Broadcaster> BroadcastService for BroadcastServiceImpl<B> {
    fn send_message(
        &self,
        room_id: &str,
        author: &Author,
        request: SendMessageRequest,
    ) -> Result<MessageObject, BroadcastError> {
        let room_id = checked_room(room_id)?;
        let message = ChatMessage::regular(room_id, &author.user_id, request.content);
        self.publish_to_room(room_id, message, author)
    }

    fn send_announcement(
        &self,
        room_id: &str,
        author: &Author,
        request: AnnouncementRequest,
    ) -> Result<MessageObject, BroadcastError> {
        if !author.role.can_announce() {
            return Err(BroadcastError::Forbidden);
        }
        let room_id = checked_room(room_id)?;
        let message =
            ChatMessage::announcement(room_id, &author.user_id, request.title, request.content);
        self.publish_to_room(room_id, message, author)
    }

    fn send_notice(
        &self,
        author: &Author,
        request: SystemNoticeRequest,
    ) -> Result<NoticeObject, BroadcastError> {
        if !author.role.is_administrative() {
            return Err(BroadcastError::Forbidden);
        }

        let notice: NoticeObject =
            SystemNotice::new(&author.user_id, request.level, request.content).into();
        let payload = HubEnvelope::SystemNotice {
            notice: notice.clone(),
        }
        .to_payload()?;

        self.broadcaster.broadcast_all(payload);

        tracing::info!(
            notice_id = %notice.id,
            sender_id = %author.user_id,
            "System notice published"
        );
        Ok(notice)
    }
}

fn checked_room(room_id: &str) -> Result<&str, BroadcastError> {
    let room_id = room_id.trim();
    if room_id.is_empty() {
        return Err(BroadcastError::InvalidRoom);
    }
    Ok(room_id)
}
