use std::time::{Duration, Instant};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use parley_core::random::generate_random;
use parley_core::room::{Room, RoomError};

/// Length of generated client identifiers.
const CLIENT_ID_LENGTH: usize = 8;

/// Outcome of a join attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    Joined(Joined),
    /// The room already holds two occupants; nothing was modified.
    Full,
}

/// Identity and buffered messages handed to a freshly admitted occupant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Joined {
    pub client_id: String,
    pub is_initiator: bool,
    /// Payloads buffered for this slot before the occupant arrived, in
    /// arrival order. Drained from the room, so they are delivered once.
    pub messages: Vec<String>,
}

struct RoomEntry {
    room: Room,
    last_activity: Instant,
}

impl RoomEntry {
    fn new() -> Self {
        Self {
            room: Room::new(),
            last_activity: Instant::now(),
        }
    }
}

/// Owns every active room. Mutations on one room are serialized by the map's
/// per-entry locking; operations on distinct rooms do not contend. Handlers
/// perform a fresh lookup per request and never hold references across calls.
#[derive(Default)]
pub struct RoomRegistry {
    rooms: DashMap<String, RoomEntry>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
        }
    }

    /// Admit a client into `room_id`, creating the room if it does not exist.
    /// The first occupant of a room instance becomes the initiator; the
    /// second receives every payload buffered since the room was created.
    pub fn join(&self, room_id: &str) -> JoinOutcome {
        let mut entry = self
            .rooms
            .entry(room_id.to_string())
            .or_insert_with(RoomEntry::new);

        let client_id = fresh_client_id(&entry.room);
        let Ok(is_initiator) = entry.room.admit(client_id.clone()) else {
            tracing::info!(room = room_id, "Join rejected, room is full");
            return JoinOutcome::Full;
        };
        let messages = entry.room.take_pending();
        entry.last_activity = Instant::now();

        tracing::info!(
            room = room_id,
            client = %client_id,
            initiator = is_initiator,
            buffered = messages.len(),
            "Client joined room"
        );
        JoinOutcome::Joined(Joined {
            client_id,
            is_initiator,
            messages,
        })
    }

    /// Accept a signaling payload from `client_id`. While the sender is alone
    /// in the room the payload is buffered for the future second occupant;
    /// once both peers are present they exchange data over their own
    /// transport and the server only acknowledges.
    pub fn send_message(
        &self,
        room_id: &str,
        client_id: &str,
        payload: String,
    ) -> Result<(), RoomError> {
        let mut entry = self.rooms.get_mut(room_id).ok_or(RoomError::UnknownRoom)?;
        if !entry.room.has_client(client_id) {
            return Err(RoomError::UnknownClient);
        }
        entry.last_activity = Instant::now();

        if entry.room.occupancy() == 1 {
            entry.room.buffer_message(payload);
            tracing::info!(
                room = room_id,
                client = client_id,
                pending = entry.room.pending_len(),
                "Buffered message for vacant peer slot"
            );
        } else {
            tracing::debug!(
                room = room_id,
                client = client_id,
                "Peer already present, payload not buffered"
            );
        }
        Ok(())
    }

    /// Remove `client_id` from `room_id`. Idempotent: unknown rooms and
    /// unknown clients are ignored. A room whose last occupant leaves is
    /// deleted outright, buffered messages included.
    pub fn leave(&self, room_id: &str, client_id: &str) {
        if let Entry::Occupied(mut occupied) = self.rooms.entry(room_id.to_string()) {
            let removed = occupied.get_mut().room.remove_occupant(client_id);
            if removed {
                tracing::info!(room = room_id, client = client_id, "Client left room");
            }
            if occupied.get().room.is_empty() {
                occupied.remove();
                tracing::info!(room = room_id, "Last occupant left, room deleted");
            } else if removed {
                occupied.get_mut().last_activity = Instant::now();
            }
        }
    }

    /// (active rooms, total occupants) for the health endpoint.
    pub fn stats(&self) -> (usize, usize) {
        let mut rooms = 0;
        let mut occupants = 0;
        for entry in self.rooms.iter() {
            rooms += 1;
            occupants += entry.room.occupancy();
        }
        (rooms, occupants)
    }

    /// Remove rooms that have been idle for longer than `max_idle`.
    /// Returns the number of rooms removed.
    pub fn cleanup_idle_rooms(&self, max_idle: Duration) -> usize {
        let before = self.rooms.len();
        self.rooms
            .retain(|_, entry| entry.last_activity.elapsed() < max_idle);
        before - self.rooms.len()
    }

    #[cfg(test)]
    pub fn room_exists(&self, room_id: &str) -> bool {
        self.rooms.contains_key(room_id)
    }
}

/// Generate a client id not already present in the room. Collisions are
/// astronomically unlikely but cheap to rule out while the entry is locked.
fn fresh_client_id(room: &Room) -> String {
    loop {
        let id = generate_random(CLIENT_ID_LENGTH);
        if !room.has_client(&id) {
            return id;
        }
    }
}
