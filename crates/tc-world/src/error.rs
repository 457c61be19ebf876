//! World-subsystem error types.

use thiserror::Error;

use tc_core::{BlockFace, BlockKey, VehicleId, WorldId};

/// Errors produced by host-world storage and fixture loading.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("world {0} is not loaded")]
    WorldNotLoaded(WorldId),

    #[error("world {0} is unknown to the host")]
    UnknownWorld(WorldId),

    #[error("fixture parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type WorldResult<T> = Result<T, WorldError>;

/// Why a single vehicle could not be redirected.
///
/// Redirect failures are expected during junction switches (a train halfway
/// through a turnout cannot always follow the new path).  They are collected
/// per vehicle and never abort the switch.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RedirectFailure {
    #[error("vehicle {0} is not registered")]
    UnknownVehicle(VehicleId),

    #[error("vehicle {vehicle} is no longer on rail {rail}")]
    NotOnRail { vehicle: VehicleId, rail: BlockKey },

    #[error("vehicle {vehicle} is moving and cannot reverse to {heading}")]
    Reversal { vehicle: VehicleId, heading: BlockFace },

    #[error("no track leads onward for vehicle {vehicle}")]
    NoPath { vehicle: VehicleId },
}
