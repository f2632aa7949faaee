//! Room Registry
//!
//! The global client set plus the room -> members index. Plain data with no
//! synchronization of its own; only the hub actor touches it.

use std::collections::{BTreeMap, HashMap, HashSet};

use bytes::Bytes;

use super::endpoint::{Endpoint, EndpointId, Enqueue};

/// Why an endpoint was forcibly removed during delivery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvictionReason {
    /// Mailbox at capacity
    SlowConsumer,
    /// Outbound pump already gone
    Disconnected,
}

impl EvictionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvictionReason::SlowConsumer => "slow_consumer",
            EvictionReason::Disconnected => "disconnected",
        }
    }
}

/// Result of fanning one payload out to a set of endpoints
#[derive(Debug, Default)]
pub struct Delivery {
    /// Number of mailboxes that accepted the payload
    pub delivered: usize,
    /// Endpoints removed from the registry while delivering
    pub evicted: Vec<(Endpoint, EvictionReason)>,
}

#[derive(Debug, Default)]
pub struct Registry {
    clients: HashMap<EndpointId, Endpoint>,
    rooms: HashMap<String, HashSet<EndpointId>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit an endpoint into the global set and, if it names one, its room
    pub fn insert(&mut self, endpoint: Endpoint) {
        let id = endpoint.id();
        if let Some(room) = endpoint.room() {
            self.rooms.entry(room.to_owned()).or_default().insert(id);
        }
        self.clients.insert(id, endpoint);
    }

    /// Remove an endpoint from every set it belongs to.
    ///
    /// Returns the endpoint so the caller decides when its mailbox closes
    /// (on drop). Unknown ids are a no-op.
    pub fn remove(&mut self, id: EndpointId) -> Option<Endpoint> {
        let endpoint = self.clients.remove(&id)?;

        if let Some(room) = endpoint.room() {
            if let Some(members) = self.rooms.get_mut(room) {
                members.remove(&id);
                if members.is_empty() {
                    self.rooms.remove(room);
                }
            }
        }

        Some(endpoint)
    }

    /// Enqueue `payload` into every registered endpoint
    pub fn deliver_all(&mut self, payload: &Bytes) -> Delivery {
        let targets: Vec<EndpointId> = self.clients.keys().copied().collect();
        self.deliver(targets, payload)
    }

    /// Enqueue `payload` into every member of `room`; unknown rooms deliver nothing
    pub fn deliver_to_room(&mut self, room: &str, payload: &Bytes) -> Delivery {
        let targets: Vec<EndpointId> = match self.rooms.get(room) {
            Some(members) => members.iter().copied().collect(),
            None => return Delivery::default(),
        };
        self.deliver(targets, payload)
    }

    fn deliver(&mut self, targets: Vec<EndpointId>, payload: &Bytes) -> Delivery {
        let mut delivery = Delivery::default();
        let mut failed = Vec::new();

        for id in targets {
            let Some(endpoint) = self.clients.get(&id) else {
                continue;
            };
            match endpoint.try_enqueue(payload.clone()) {
                Enqueue::Accepted => delivery.delivered += 1,
                Enqueue::Full => failed.push((id, EvictionReason::SlowConsumer)),
                Enqueue::Closed => failed.push((id, EvictionReason::Disconnected)),
            }
        }

        for (id, reason) in failed {
            if let Some(endpoint) = self.remove(id) {
                delivery.evicted.push((endpoint, reason));
            }
        }

        delivery
    }

    pub fn contains(&self, id: EndpointId) -> bool {
        self.clients.contains_key(&id)
    }

    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn room_size(&self, room: &str) -> usize {
        self.rooms.get(room).map(HashSet::len).unwrap_or(0)
    }

    /// Member count per room, ordered by room id
    pub fn room_sizes(&self) -> BTreeMap<String, usize> {
        self.rooms
            .iter()
            .map(|(room, members)| (room.clone(), members.len()))
            .collect()
    }
}
