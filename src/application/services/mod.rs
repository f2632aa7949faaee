//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **BroadcastService**: Builds chat envelopes and publishes them to rooms
//!   or to every connected client

pub mod broadcast_service;

// Re-export broadcast service types
pub use broadcast_service::{Author, BroadcastError, BroadcastService, BroadcastServiceImpl};
