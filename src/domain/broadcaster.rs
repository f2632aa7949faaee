//! Broadcasting contract.
//!
//! Implemented by the realtime hub in the infrastructure layer. Payloads are
//! opaque bytes; content typing is the publisher's concern.

use bytes::Bytes;

/// Fire-and-forget fan-out to connected clients.
///
/// Neither operation reports delivery failures: consumers that cannot keep up
/// are dropped by the implementation instead.
#[cfg_attr(test, mockall::automock)]
pub trait Broadcaster: Send + Sync {
    /// Deliver to every connected client
    fn broadcast_all(&self, payload: Bytes);

    /// Deliver to the members of one room; an empty room is not an error
    fn broadcast_to_room(&self, room: &str, payload: Bytes);
}
