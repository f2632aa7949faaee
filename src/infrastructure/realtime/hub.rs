//! Broadcast Hub
//!
//! Single serialized owner of the registry. Every registration, removal and
//! broadcast is a command on one queue consumed by one actor task, so registry
//! mutations never interleave. Submitting a command never waits: the queue is
//! unbounded and mailbox writes inside the actor use `try_send`.
//!
//! Only the per-endpoint mailboxes are bounded. The command queue itself is
//! not, so publishers that outpace the actor grow it without limit; its depth
//! is exported as `school_chat_hub_command_queue_depth`.

use std::collections::BTreeMap;

use bytes::Bytes;
use serde::Serialize;
use tokio::sync::{mpsc, oneshot};

use super::endpoint::{Endpoint, EndpointId};
use super::registry::{Delivery, Registry};
use crate::domain::Broadcaster;
use crate::infrastructure::metrics;

/// Commands processed by the hub actor, in submission order
#[derive(Debug)]
enum HubCommand {
    Register(Endpoint),
    Unregister(EndpointId),
    BroadcastAll(Bytes),
    BroadcastToRoom { room: String, payload: Bytes },
    Snapshot(oneshot::Sender<HubSnapshot>),
}

/// Point-in-time view of the registry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HubSnapshot {
    pub clients: usize,
    pub rooms: BTreeMap<String, usize>,
}

impl HubSnapshot {
    pub fn room_size(&self, room: &str) -> usize {
        self.rooms.get(room).copied().unwrap_or(0)
    }
}

/// Handle to the hub actor. Cheap to clone; the actor stops once every handle
/// is dropped, closing all remaining mailboxes.
#[derive(Debug, Clone)]
pub struct Hub {
    commands: mpsc::UnboundedSender<HubCommand>,
}

impl Hub {
    /// Start the hub actor on the current tokio runtime
    pub fn spawn() -> Self {
        let (commands, receiver) = mpsc::unbounded_channel();
        tokio::spawn(run(receiver));
        Self { commands }
    }

    /// Admit an endpoint into the global set and its room, if it has one
    pub fn register(&self, endpoint: Endpoint) {
        self.submit(HubCommand::Register(endpoint));
    }

    /// Remove an endpoint and close its mailbox. Unknown or already removed
    /// endpoints are ignored.
    pub fn unregister(&self, id: EndpointId) {
        self.submit(HubCommand::Unregister(id));
    }

    /// Deliver `payload` to every registered endpoint
    pub fn broadcast_all(&self, payload: impl Into<Bytes>) {
        self.submit(HubCommand::BroadcastAll(payload.into()));
    }

    /// Deliver `payload` to the members of `room`; a room without members is a no-op
    pub fn broadcast_to_room(&self, room: impl Into<String>, payload: impl Into<Bytes>) {
        self.submit(HubCommand::BroadcastToRoom {
            room: room.into(),
            payload: payload.into(),
        });
    }

    /// Registry view reflecting every command submitted before this call.
    ///
    /// Returns `None` if the actor is no longer running.
    pub async fn snapshot(&self) -> Option<HubSnapshot> {
        let (reply, response) = oneshot::channel();
        self.commands.send(HubCommand::Snapshot(reply)).ok()?;
        response.await.ok()
    }

    pub fn is_running(&self) -> bool {
        !self.commands.is_closed()
    }

    fn submit(&self, command: HubCommand) {
        if self.commands.send(command).is_err() {
            tracing::warn!("Hub is not running, command dropped");
        }
    }
}

impl Broadcaster for Hub {
    fn broadcast_all(&self, payload: Bytes) {
        Hub::broadcast_all(self, payload);
    }

    fn broadcast_to_room(&self, room: &str, payload: Bytes) {
        Hub::broadcast_to_room(self, room, payload);
    }
}

/// Actor loop. Owns the registry for its whole lifetime.
async fn run(mut commands: mpsc::UnboundedReceiver<HubCommand>) {
    let mut registry = Registry::new();
    tracing::info!("Hub started");

    while let Some(command) = commands.recv().await {
        match command {
            HubCommand::Register(endpoint) => {
                tracing::info!(
                    endpoint_id = %endpoint.id(),
                    subscriber_id = %endpoint.subscriber_id(),
                    room = endpoint.room().unwrap_or(""),
                    "Endpoint registered"
                );
                registry.insert(endpoint);
            }
            HubCommand::Unregister(id) => {
                if let Some(endpoint) = registry.remove(id) {
                    tracing::info!(
                        endpoint_id = %id,
                        subscriber_id = %endpoint.subscriber_id(),
                        "Endpoint unregistered"
                    );
                }
            }
            HubCommand::BroadcastAll(payload) => {
                let delivery = registry.deliver_all(&payload);
                settle(delivery, "all");
            }
            HubCommand::BroadcastToRoom { room, payload } => {
                let delivery = registry.deliver_to_room(&room, &payload);
                settle(delivery, "room");
            }
            HubCommand::Snapshot(reply) => {
                let _ = reply.send(HubSnapshot {
                    clients: registry.client_count(),
                    rooms: registry.room_sizes(),
                });
            }
        }

        metrics::set_hub_population(registry.client_count(), registry.room_count());
        metrics::set_hub_queue_depth(commands.len());
    }

    tracing::info!(
        remaining = registry.client_count(),
        "Hub stopped, closing remaining mailboxes"
    );
}

/// Record a delivery and drop evicted endpoints, which closes their mailboxes
fn settle(delivery: Delivery, scope: &str) {
    metrics::record_broadcast(scope, delivery.delivered);

    for (endpoint, reason) in delivery.evicted {
        tracing::warn!(
            endpoint_id = %endpoint.id(),
            subscriber_id = %endpoint.subscriber_id(),
            reason = reason.as_str(),
            "Endpoint evicted"
        );
        metrics::record_eviction(reason.as_str());
    }
}
