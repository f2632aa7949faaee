//! Presentation Layer
//!
//! HTTP routes and the WebSocket transport.

pub mod http;
pub mod middleware;
pub mod websocket;
