//! WebSocket Transport
//!
//! Turns upgraded connections into hub endpoints.

pub mod handler;

pub use handler::ws_handler;
