//! # Domain Value Objects
//!
//! - **Role**: School member role carried in access tokens

mod role;

pub use role::*;
