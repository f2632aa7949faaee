//! HTTP Layer
//!
//! Routes, handlers and extractors for the publish API and probes.

pub mod extractors;
pub mod handlers;
pub mod routes;

pub use routes::create_router;
