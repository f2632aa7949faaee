//! Websocket envelopes.
//!
//! The tagged JSON documents clients receive. The hub never looks inside
//! them; they are serialized here and travel as opaque bytes.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{ChatMessage, NoticeLevel, Role, SystemNotice};

/// Envelope pushed to websocket clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HubEnvelope {
    NewMessage { message: MessageObject },
    Announcement { message: MessageObject },
    SystemNotice { notice: NoticeObject },
}

impl HubEnvelope {
    /// Wrap a chat message in the envelope matching its kind
    pub fn for_message(message: MessageObject) -> Self {
        if message.kind == "announcement" {
            HubEnvelope::Announcement { message }
        } else {
            HubEnvelope::NewMessage { message }
        }
    }

    /// Get the event name for dispatch
    pub fn event_name(&self) -> &'static str {
        match self {
            HubEnvelope::NewMessage { .. } => "new_message",
            HubEnvelope::Announcement { .. } => "announcement",
            HubEnvelope::SystemNotice { .. } => "system_notice",
        }
    }

    /// Serialize into the opaque payload handed to the hub
    pub fn to_payload(&self) -> Result<Bytes, serde_json::Error> {
        serde_json::to_vec(self).map(Bytes::from)
    }
}

/// Message as rendered to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageObject {
    pub id: String,
    pub content: String,
    pub group_id: String,
    pub sender_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub read_by: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<SenderObject>,
}

/// Sender metadata rendered alongside a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderObject {
    pub id: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// Notice as rendered to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeObject {
    pub id: String,
    pub level: NoticeLevel,
    pub content: String,
    pub sender_id: String,
    pub created_at: DateTime<Utc>,
}

impl MessageObject {
    pub fn from_message(message: ChatMessage, sender: Option<SenderObject>) -> Self {
        Self {
            id: message.id.to_string(),
            kind: message.kind.as_str().to_string(),
            content: message.content,
            group_id: message.group_id,
            sender_id: message.sender_id,
            title: message.title,
            created_at: message.created_at,
            updated_at: message.updated_at,
            read_by: message.read_by,
            sender,
        }
    }
}

impl From<SystemNotice> for NoticeObject {
    fn from(notice: SystemNotice) -> Self {
        Self {
            id: notice.id.to_string(),
            level: notice.level,
            content: notice.content,
            sender_id: notice.sender_id,
            created_at: notice.created_at,
        }
    }
}
