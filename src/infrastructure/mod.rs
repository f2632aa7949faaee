//! Infrastructure Layer
//!
//! Contains implementations for runtime services including:
//! - The realtime broadcast hub and its connection pumps
//! - Prometheus metrics collection

pub mod metrics;
pub mod realtime;
