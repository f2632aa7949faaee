//! Data Transfer Objects
//!
//! DTOs for API request/response serialization and the envelopes pushed to
//! websocket clients.

pub mod envelope;
pub mod request;
pub mod response;

pub use envelope::{HubEnvelope, MessageObject, NoticeObject, SenderObject};
pub use request::{AnnouncementRequest, SendMessageRequest, SystemNoticeRequest};
pub use response::{HubStatsResponse, NoticeResponse, RoomStats};
