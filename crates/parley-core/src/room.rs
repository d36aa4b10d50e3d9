/// Maximum number of occupants in a room. Sessions are strictly pairwise.
pub const ROOM_CAPACITY: usize = 2;

/// Errors surfaced by room operations. All of these are client errors; none
/// of them leaves the room in a partially mutated state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomError {
    Full,
    UnknownRoom,
    UnknownClient,
}

impl std::fmt::Display for RoomError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Full => write!(f, "room is full"),
            Self::UnknownRoom => write!(f, "unknown room"),
            Self::UnknownClient => write!(f, "unknown client"),
        }
    }
}

impl std::error::Error for RoomError {}

/// A participant's membership record within a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occupant {
    pub client_id: String,
    /// True iff this occupant was the first to join the current room
    /// instance. Never recomputed while the occupant stays in the room.
    pub is_initiator: bool,
}

/// A named rendezvous point for at most two participants.
///
/// `pending` holds payloads addressed to the vacant callee slot, in arrival
/// order, until a second occupant joins and drains them.
#[derive(Debug, Default)]
pub struct Room {
    occupants: Vec<Occupant>,
    pending: Vec<String>,
}

impl Room {
    pub fn new() -> Self {
        Self {
            occupants: Vec::with_capacity(ROOM_CAPACITY),
            pending: Vec::new(),
        }
    }

    pub fn occupancy(&self) -> usize {
        self.occupants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.occupants.len() >= ROOM_CAPACITY
    }

    pub fn has_client(&self, client_id: &str) -> bool {
        self.occupants.iter().any(|o| o.client_id == client_id)
    }

    pub fn occupants(&self) -> &[Occupant] {
        &self.occupants
    }

    /// Admit a new occupant. The first occupant of a room instance becomes
    /// the initiator. Fails without mutating when the room is full.
    /// Returns whether the admitted occupant is the initiator.
    pub fn admit(&mut self, client_id: String) -> Result<bool, RoomError> {
        if self.is_full() {
            return Err(RoomError::Full);
        }
        let is_initiator = self.occupants.is_empty();
        self.occupants.push(Occupant {
            client_id,
            is_initiator,
        });
        Ok(is_initiator)
    }

    /// Remove the occupant matching `client_id`. Returns whether anything was
    /// removed. The remaining occupant's role flag is left untouched.
    pub fn remove_occupant(&mut self, client_id: &str) -> bool {
        let before = self.occupants.len();
        self.occupants.retain(|o| o.client_id != client_id);
        self.occupants.len() != before
    }

    /// Append a payload to the buffer for the vacant callee slot.
    pub fn buffer_message(&mut self, payload: String) {
        self.pending.push(payload);
    }

    /// Drain the buffered payloads, in arrival order. The buffer is cleared,
    /// so a second drain yields nothing.
    pub fn take_pending(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
