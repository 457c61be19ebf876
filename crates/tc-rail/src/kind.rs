//! The rail-type capability: how one kind of rail exposes its junctions and
//! rewrites its connectivity.
//!
//! The framework never looks inside a rail block itself.  It asks the rail
//! type that claims the block, through [`RailType`], and stays agnostic of
//! how connectivity is stored.

use std::borrow::Cow;
use std::fmt;

use tc_core::{BlockFace, BlockKey};
use tc_world::WorldAccess;

use crate::RailResult;

// ── RailTypeId ────────────────────────────────────────────────────────────────

/// Tag of a registered rail type.  Index into the `RailTypeRegistry`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RailTypeId(pub u16);

impl RailTypeId {
    /// "No rails here."  Always registered; claims no block.
    pub const NONE: RailTypeId = RailTypeId(0);

    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

impl Default for RailTypeId {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Display for RailTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            f.write_str("none")
        } else {
            write!(f, "rail#{}", self.0)
        }
    }
}

// ── Junction ──────────────────────────────────────────────────────────────────

/// A named, switchable connection point of a rail segment.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Junction {
    name: Cow<'static, str>,
    face: BlockFace,
}

impl Junction {
    pub fn new(name: impl Into<Cow<'static, str>>, face: BlockFace) -> Self {
        Self { name: name.into(), face }
    }

    /// A junction named after the face it leads through.
    pub fn facing(face: BlockFace) -> Self {
        Self { name: Cow::Borrowed(face.as_str()), face }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The face of the rail block this junction leads through.
    #[inline]
    pub fn face(&self) -> BlockFace {
        self.face
    }
}

impl fmt::Display for Junction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// ── RailType ──────────────────────────────────────────────────────────────────

/// Behaviour of one kind of rail.
///
/// Implementations are stateless; all state lives in the host's blocks.
/// Methods take `&dyn WorldAccess` so the registry can hold heterogeneous
/// types behind `Box<dyn RailType>`.
pub trait RailType: Send + Sync + 'static {
    /// Human-readable name, unique within a registry.
    fn name(&self) -> &str;

    /// Does the block at `key` hold this kind of rail?
    fn claims(&self, world: &dyn WorldAccess, key: BlockKey) -> bool;

    /// Junctions that can be switched on the rail at `key`.
    fn junctions(&self, world: &dyn WorldAccess, key: BlockKey) -> Vec<Junction>;

    /// The face a vehicle entering through `junction` leaves through under
    /// the current connectivity, or `None` if that junction leads nowhere.
    fn connected_end(
        &self,
        world:    &dyn WorldAccess,
        key:      BlockKey,
        junction: &Junction,
    ) -> Option<BlockFace>;

    /// Whether driving over this rail activates the block (powered switches,
    /// detectors).
    fn has_block_activation(&self, _world: &dyn WorldAccess, _key: BlockKey) -> bool {
        false
    }

    /// Rewire the rail at `key` so traffic that used `from` uses `to`.
    ///
    /// Must validate before writing: on error the block is unchanged.
    fn switch_junction(
        &self,
        world: &mut dyn WorldAccess,
        key:   BlockKey,
        from:  &Junction,
        to:    &Junction,
    ) -> RailResult<()>;
}
