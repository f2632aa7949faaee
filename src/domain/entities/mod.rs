//! # Domain Entities
//!
//! - **ChatMessage**: A regular message or announcement posted to a group room
//! - **SystemNotice**: A school-wide notice delivered to every connected client

mod message;
mod notice;

pub use message::{ChatMessage, MessageKind};
pub use notice::{NoticeLevel, SystemNotice};
