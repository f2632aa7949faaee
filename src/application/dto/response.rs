//! Response DTOs
//!
//! Data structures for API response bodies. Published messages are returned
//! as the same [`MessageObject`](super::MessageObject) clients receive.

use serde::Serialize;

use super::envelope::NoticeObject;
use crate::infrastructure::realtime::HubSnapshot;

/// Accepted system notice
#[derive(Debug, Serialize)]
pub struct NoticeResponse {
    pub notice: NoticeObject,
}

/// Member count of one room
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomStats {
    pub room_id: String,
    pub members: usize,
}

/// Current hub population
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HubStatsResponse {
    pub connected_clients: usize,
    pub active_rooms: usize,
    pub rooms: Vec<RoomStats>,
}

impl From<HubSnapshot> for HubStatsResponse {
    fn from(snapshot: HubSnapshot) -> Self {
        let rooms: Vec<RoomStats> = snapshot
            .rooms
            .into_iter()
            .map(|(room_id, members)| RoomStats { room_id, members })
            .collect();

        Self {
            connected_clients: snapshot.clients,
            active_rooms: rooms.len(),
            rooms,
        }
    }
}
