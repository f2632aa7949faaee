//! Realtime Broadcast Hub
//!
//! Tracks live websocket connections, groups them into rooms and fans
//! payloads out to them. A mailbox that cannot keep up is evicted instead of
//! slowing down delivery to everyone else.
//!
//! ```text
//! publisher --broadcast--> Hub actor --try_send--> Mailbox --outbound pump--> socket
//!                             ^                                                 |
//!                             +----------- unregister <-- inbound pump <--------+
//! ```

pub mod endpoint;
pub mod hub;
pub mod pump;
pub mod registry;

pub use endpoint::{Endpoint, EndpointId, Mailbox, DEFAULT_MAILBOX_CAPACITY};
pub use hub::{Hub, HubSnapshot};
pub use pump::{inbound_pump, outbound_pump, InboundExit, OutboundExit, PumpTiming};
pub use registry::{EvictionReason, Registry};
