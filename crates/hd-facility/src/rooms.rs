//! The room table and its three-state machine.
//!
//! ```text
//!   VacantClean ──assign──▶ Occupied ──check_out──▶ VacantDirty
//!        ▲                                              │
//!        └─────────────────finish_cleaning──────────────┘
//! ```
//!
//! Every other transition is rejected with [`RoomError::IllegalTransition`].
//! Clean rooms are also indexed in a `BTreeSet`, so "lowest-id clean room" is
//! the set's first element.

use std::collections::BTreeSet;

use hd_core::{GuestId, RoomId};

use crate::RoomError;

/// Cleanliness / occupancy state of one room.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoomState {
    VacantClean,
    VacantDirty,
    Occupied,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Room {
    pub id:       RoomId,
    pub state:    RoomState,
    /// `Some` exactly when `state == Occupied`.
    pub occupant: Option<GuestId>,
}

/// Per-state room counts.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomCounts {
    pub clean:    u32,
    pub dirty:    u32,
    pub occupied: u32,
}

impl RoomCounts {
    #[inline]
    pub fn total(&self) -> u32 {
        self.clean + self.dirty + self.occupied
    }
}

/// Fixed-size room table, indexed by `RoomId`.
pub struct RoomInventory {
    rooms:  Vec<Room>,
    clean:  BTreeSet<RoomId>,
    counts: RoomCounts,
}

impl RoomInventory {
    /// `room_count` rooms, all vacant and clean, ids `0..room_count`.
    pub fn new(room_count: u32) -> Self {
        let rooms: Vec<Room> = (0..room_count)
            .map(|i| Room { id: RoomId(i), state: RoomState::VacantClean, occupant: None })
            .collect();
        let clean = rooms.iter().map(|r| r.id).collect();
        Self {
            rooms,
            clean,
            counts: RoomCounts { clean: room_count, dirty: 0, occupied: 0 },
        }
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn get(&self, room: RoomId) -> Result<&Room, RoomError> {
        self.rooms.get(room.index()).ok_or(RoomError::UnknownRoom(room))
    }

    pub fn state(&self, room: RoomId) -> Result<RoomState, RoomError> {
        self.get(room).map(|r| r.state)
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Lowest-id vacant clean room, if any.
    #[inline]
    pub fn first_clean(&self) -> Option<RoomId> {
        self.clean.first().copied()
    }

    #[inline]
    pub fn counts(&self) -> RoomCounts {
        self.counts
    }

    #[inline]
    pub fn occupied_count(&self) -> u32 {
        self.counts.occupied
    }

    /// `true` when the per-state counts add up to the room count.
    pub fn is_conserved(&self) -> bool {
        self.counts.total() as usize == self.rooms.len()
            && self.clean.len() == self.counts.clean as usize
    }

    /// VC → O, recording `guest` as the occupant.
    pub fn assign(&mut self, room: RoomId, guest: GuestId) -> Result<(), RoomError> {
        self.transition(room, RoomState::VacantClean, RoomState::Occupied)?;
        self.rooms[room.index()].occupant = Some(guest);
        self.clean.remove(&room);
        self.counts.clean -= 1;
        self.counts.occupied += 1;
        Ok(())
    }

    /// Assign the lowest-id clean room to `guest`.  `Ok(None)` when no room
    /// is clean.
    pub fn assign_first_clean(&mut self, guest: GuestId) -> Result<Option<RoomId>, RoomError> {
        let Some(room) = self.first_clean() else {
            return Ok(None);
        };
        self.assign(room, guest)?;
        Ok(Some(room))
    }

    /// O → VD.  `guest` must be the recorded occupant.
    pub fn check_out(&mut self, room: RoomId, guest: GuestId) -> Result<(), RoomError> {
        let occupant = self.get(room)?.occupant;
        if occupant != Some(guest) {
            return Err(RoomError::OccupantMismatch { room, guest, occupant });
        }
        self.transition(room, RoomState::Occupied, RoomState::VacantDirty)?;
        self.rooms[room.index()].occupant = None;
        self.counts.occupied -= 1;
        self.counts.dirty += 1;
        Ok(())
    }

    /// VD → VC.
    pub fn finish_cleaning(&mut self, room: RoomId) -> Result<(), RoomError> {
        self.transition(room, RoomState::VacantDirty, RoomState::VacantClean)?;
        self.clean.insert(room);
        self.counts.dirty -= 1;
        self.counts.clean += 1;
        Ok(())
    }

    fn transition(&mut self, room: RoomId, from: RoomState, to: RoomState) -> Result<(), RoomError> {
        let r = self.rooms.get_mut(room.index()).ok_or(RoomError::UnknownRoom(room))?;
        if r.state != from {
            return Err(RoomError::IllegalTransition { room, from: r.state, to });
        }
        r.state = to;
        Ok(())
    }
}
