//! # School Chat Hub
//!
//! Realtime fan-out for a school chat backend:
//! - WebSocket endpoint that registers each connection with a broadcast hub
//! - REST publish API for room messages, announcements and school-wide notices
//! - Evict-on-full backpressure so one slow client never stalls the rest
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Chat messages, roles and the broadcasting contract
//! - **Application Layer**: Publish services and DTOs
//! - **Infrastructure Layer**: The hub actor, connection pumps and metrics
//! - **Presentation Layer**: HTTP handlers and the WebSocket transport
//!
//! ## Module Structure
//!
//! ```text
//! school_chat_hub/
//! +-- config/         Configuration management
//! +-- domain/         Entities, value objects and the Broadcaster trait
//! +-- application/    Broadcast service and DTOs
//! +-- infrastructure/ Realtime hub and Prometheus metrics
//! +-- presentation/   HTTP routes, middleware and WebSocket handler
//! +-- shared/         Common utilities (errors, validation)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP and WebSocket handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
