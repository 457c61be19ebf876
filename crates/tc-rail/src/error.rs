//! Rail-subsystem error type.

use thiserror::Error;

use tc_core::{BlockFace, BlockKey, WorldId};
use tc_world::WorldError;

use crate::{RailTypeId, SegmentId};

/// Errors produced by segment identities and rail-type dispatch.
#[derive(Debug, Error)]
pub enum RailError {
    /// The operation needs a world but the identity carries none.
    #[error("operation requires a world, but none was supplied")]
    NoWorld,

    /// The identity names a world the host does not have loaded.
    #[error("world {0} is not loaded")]
    WorldNotLoaded(WorldId),

    /// A coordinate-dependent operation on an empty or placeholder identity.
    #[error("segment {0} has no block coordinate")]
    NotConcrete(SegmentId),

    #[error("rail type {0} is not registered")]
    UnknownRailType(RailTypeId),

    #[error("block {0} does not hold the expected rail")]
    NotRail(BlockKey),

    #[error("rail {rail} is not connected through junction {junction:?}")]
    JunctionNotConnected { rail: BlockKey, junction: String },

    #[error("rail {rail} cannot be switched from {from} to {to}")]
    InvalidShape { rail: BlockKey, from: BlockFace, to: BlockFace },

    #[error("world error: {0}")]
    World(#[from] WorldError),
}

impl RailError {
    /// `true` for both flavours of missing world: no handle at all, or a
    /// handle the host cannot resolve.
    pub fn is_no_world(&self) -> bool {
        matches!(self, RailError::NoWorld | RailError::WorldNotLoaded(_))
    }
}

pub type RailResult<T> = Result<T, RailError>;
