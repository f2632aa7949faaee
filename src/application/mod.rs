//! Application Layer
//!
//! Publish use cases that turn requests into serialized envelopes and hand
//! them to the broadcast hub.

pub mod dto;
pub mod services;
