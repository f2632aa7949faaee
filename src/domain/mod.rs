//! # Domain Layer
//!
//! Chat messages, member roles and the broadcasting contract the realtime
//! hub fulfils. Independent of transport and runtime concerns.
//!
//! ## Structure
//!
//! - **entities**: Chat messages and notices fanned out to connected clients
//! - **value_objects**: Member roles and their publishing rights
//! - **broadcaster**: Contract for fire-and-forget fan-out of opaque payloads

pub mod broadcaster;
pub mod entities;
pub mod value_objects;

// Re-export commonly used types
pub use broadcaster::Broadcaster;
pub use entities::*;
pub use value_objects::*;
