//! System notice entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Severity of a system notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    #[default]
    Info,
    Warning,
    Critical,
}

/// A notice delivered to every connected client regardless of room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemNotice {
    pub id: Uuid,
    pub sender_id: String,
    pub level: NoticeLevel,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl SystemNotice {
    pub fn new(sender_id: impl Into<String>, level: NoticeLevel, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            sender_id: sender_id.into(),
            level,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}
