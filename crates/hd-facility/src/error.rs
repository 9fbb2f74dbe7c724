use hd_core::{GuestId, RoomId};
use thiserror::Error;

use crate::{GuestPhase, RoomState};

/// A room state-machine contract breach.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    #[error("{room}: illegal transition {from:?} -> {to:?}")]
    IllegalTransition {
        room: RoomId,
        from: RoomState,
        to:   RoomState,
    },

    #[error("{room} is occupied by {occupant:?}, not {guest}")]
    OccupantMismatch {
        room:     RoomId,
        guest:    GuestId,
        occupant: Option<GuestId>,
    },

    #[error("{0} does not exist")]
    UnknownRoom(RoomId),
}

/// A resource-pool contract breach.  Jobs are rendered with `Display` so the
/// error type stays independent of the pool's job type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceError {
    #[error("{pool}: completion for {job}, which is not in service")]
    UnknownCompletion { pool: &'static str, job: String },

    #[error("{pool}: {job} is already queued or in service")]
    AlreadyAdmitted { pool: &'static str, job: String },
}

/// A guest-record contract breach.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuestError {
    #[error("{0} does not exist")]
    UnknownGuest(GuestId),

    #[error("{guest}: illegal phase change {from:?} -> {to:?}")]
    IllegalPhase {
        guest: GuestId,
        from:  GuestPhase,
        to:    GuestPhase,
    },
}

/// Any `hd-facility` error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FacilityError {
    #[error(transparent)]
    Room(#[from] RoomError),

    #[error(transparent)]
    Resource(#[from] ResourceError),

    #[error(transparent)]
    Guest(#[from] GuestError),
}

pub type FacilityResult<T> = Result<T, FacilityError>;
