//! Chat message entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of a group message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// A regular member message
    #[default]
    Regular,
    /// A titled announcement from staff
    Announcement,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Announcement => "announcement",
        }
    }
}

/// A message posted to a group room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Time-ordered message ID (UUID v7)
    pub id: Uuid,
    /// Group (room) the message was posted to
    pub group_id: String,
    /// Author user ID
    pub sender_id: String,
    pub kind: MessageKind,
    /// Announcement title; absent for regular messages
    pub title: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// User IDs that have read the message
    pub read_by: Vec<String>,
}

impl ChatMessage {
    /// Create a regular message. The author has implicitly read it.
    pub fn regular(
        group_id: impl Into<String>,
        sender_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let sender_id = sender_id.into();
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            group_id: group_id.into(),
            read_by: vec![sender_id.clone()],
            sender_id,
            kind: MessageKind::Regular,
            title: None,
            content: content.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create an announcement. Nobody has read it yet, not even its author.
    pub fn announcement(
        group_id: impl Into<String>,
        sender_id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            group_id: group_id.into(),
            sender_id: sender_id.into(),
            kind: MessageKind::Announcement,
            title: Some(title.into()),
            content: content.into(),
            created_at: now,
            updated_at: now,
            read_by: Vec::new(),
        }
    }

    pub fn is_announcement(&self) -> bool {
        self.kind == MessageKind::Announcement
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_message_is_read_by_sender() {
        let message = ChatMessage::regular("grade-5", "u1", "hi");
        assert_eq!(message.kind, MessageKind::Regular);
        assert_eq!(message.read_by, vec!["u1".to_string()]);
        assert!(message.title.is_none());
        assert_eq!(message.created_at, message.updated_at);
    }

    #[test]
    fn test_announcement_starts_unread() {
        let message = ChatMessage::announcement("grade-5", "t1", "Trip", "Bring lunch");
        assert!(message.is_announcement());
        assert!(message.read_by.is_empty());
        assert_eq!(message.title.as_deref(), Some("Trip"));
    }

    #[test]
    fn test_ids_are_time_ordered() {
        let first = ChatMessage::regular("g", "u", "a");
        let second = ChatMessage::regular("g", "u", "b");
        assert!(first.id < second.id);
    }
}
