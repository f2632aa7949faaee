//! Connection Endpoint
//!
//! One live duplex connection as seen by the hub: an identity, an optional
//! room, and the writing half of a bounded outbound mailbox. The reading half
//! ([`Mailbox`]) stays with the connection's outbound pump.

use std::fmt;

use bytes::Bytes;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Default number of payloads a mailbox can hold before the hub evicts it
pub const DEFAULT_MAILBOX_CAPACITY: usize = 256;

/// Unique identifier of a registered endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EndpointId(Uuid);

impl EndpointId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EndpointId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EndpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Outcome of a non-blocking enqueue into a mailbox
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enqueue {
    Accepted,
    /// The mailbox is at capacity; the consumer is too slow
    Full,
    /// The outbound pump is gone and dropped its mailbox
    Closed,
}

/// Hub-side view of a connection.
///
/// Deliberately not `Clone`: the mailbox sender lives in exactly one place,
/// and dropping the endpoint is what closes the mailbox.
pub struct Endpoint {
    id: EndpointId,
    subscriber_id: String,
    room: Option<String>,
    sender: mpsc::Sender<Bytes>,
}

impl Endpoint {
    /// Create an endpoint and its mailbox.
    ///
    /// An empty `room` means the endpoint only receives unscoped broadcasts.
    pub fn new(
        subscriber_id: impl Into<String>,
        room: impl Into<String>,
        capacity: usize,
    ) -> (Self, Mailbox) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let room = room.into();

        let endpoint = Self {
            id: EndpointId::new(),
            subscriber_id: subscriber_id.into(),
            room: (!room.is_empty()).then_some(room),
            sender,
        };

        (endpoint, Mailbox { receiver })
    }

    pub fn id(&self) -> EndpointId {
        self.id
    }

    pub fn subscriber_id(&self) -> &str {
        &self.subscriber_id
    }

    pub fn room(&self) -> Option<&str> {
        self.room.as_deref()
    }

    /// Try to place a payload in the mailbox without waiting
    pub(crate) fn try_enqueue(&self, payload: Bytes) -> Enqueue {
        match self.sender.try_send(payload) {
            Ok(()) => Enqueue::Accepted,
            Err(mpsc::error::TrySendError::Full(_)) => Enqueue::Full,
            Err(mpsc::error::TrySendError::Closed(_)) => Enqueue::Closed,
        }
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("id", &self.id)
            .field("subscriber_id", &self.subscriber_id)
            .field("room", &self.room)
            .finish()
    }
}

/// Receiving half of an endpoint's outbound queue, drained by the outbound pump
#[derive(Debug)]
pub struct Mailbox {
    receiver: mpsc::Receiver<Bytes>,
}

impl Mailbox {
    /// Next payload in enqueue order, or `None` once the hub has closed the
    /// mailbox and everything already queued has been taken.
    pub async fn recv(&mut self) -> Option<Bytes> {
        self.receiver.recv().await
    }

    /// Take the next payload if one is already queued
    pub fn try_recv(&mut self) -> Option<Bytes> {
        self.receiver.try_recv().ok()
    }

    /// Number of payloads waiting to be written
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}
