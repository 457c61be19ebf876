//! Segment identity.
//!
//! # Variants
//!
//! | Variant        | world | block | rail type      | Built by                      |
//! |----------------|-------|-------|----------------|-------------------------------|
//! | empty          | no    | no    | `NONE`         | [`SegmentId::EMPTY`]          |
//! | placeholder    | yes   | no    | `NONE`         | [`SegmentId::world_placeholder`] |
//! | concrete       | yes   | yes   | any, even `NONE` | [`SegmentId::create`], [`SegmentId::create_inferred`] |
//!
//! A concrete identity typed `NONE` means "this block, which has no rails";
//! it still has a coordinate and is not empty.
//!
//! # Equality
//!
//! Two identities are equal iff their block keys and rail types are equal.
//! The world handle of a placeholder does not take part, so every
//! coordinate-less identity compares equal to every other one.

use std::fmt;
use std::hash::{Hash, Hasher};

use tc_core::{BlockKey, BlockPos, WorldId};
use tc_world::WorldAccess;

use crate::{RailError, RailResult, RailTypeId, RailTypeRegistry};

/// Value identity of one rail segment.  `Copy`; recreate it freely.
#[derive(Copy, Clone, Debug)]
pub struct SegmentId {
    world:     Option<WorldId>,
    block:     Option<BlockKey>,
    rail_type: RailTypeId,
}

impl SegmentId {
    /// No world, no block.
    pub const EMPTY: SegmentId = SegmentId {
        world:     None,
        block:     None,
        rail_type: RailTypeId::NONE,
    };

    // ── Constructors ──────────────────────────────────────────────────────

    /// The segment of type `rail_type` at `key`.  Not validated against the
    /// world.
    pub fn create(rail_type: RailTypeId, key: BlockKey) -> Self {
        Self {
            world: Some(key.world),
            block: Some(key),
            rail_type,
        }
    }

    /// Like [`create`](Self::create) with the world supplied separately.
    ///
    /// # Errors
    ///
    /// [`RailError::NoWorld`] if `world` is `None`.
    pub fn create_in(rail_type: RailTypeId, world: Option<WorldId>, pos: BlockPos) -> RailResult<Self> {
        let world = world.ok_or(RailError::NoWorld)?;
        Ok(Self::create(rail_type, BlockKey::new(world, pos)))
    }

    /// The segment at `key`, typed by whichever registered rail type claims
    /// the block.  Typed [`RailTypeId::NONE`] if none does.
    ///
    /// # Errors
    ///
    /// [`RailError::WorldNotLoaded`] if the host does not have the world.
    pub fn create_inferred<W: WorldAccess>(
        rails: &RailTypeRegistry,
        world: &W,
        key:   BlockKey,
    ) -> RailResult<Self> {
        if !world.is_loaded(key.world) {
            return Err(RailError::WorldNotLoaded(key.world));
        }
        Ok(Self::create(rails.infer_type(world, key), key))
    }

    /// Anchors a world without naming a block, e.g. "in this world but not
    /// on any rail".
    pub fn world_placeholder(world: WorldId) -> Self {
        Self {
            world:     Some(world),
            block:     None,
            rail_type: RailTypeId::NONE,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn rail_type(&self) -> RailTypeId {
        self.rail_type
    }

    /// # Errors
    ///
    /// [`RailError::NoWorld`] for [`EMPTY`](Self::EMPTY).
    pub fn world(&self) -> RailResult<WorldId> {
        self.world.ok_or(RailError::NoWorld)
    }

    /// World and coordinate of the rail block.
    ///
    /// # Errors
    ///
    /// [`RailError::NotConcrete`] for empty and placeholder identities.
    pub fn block(&self) -> RailResult<BlockKey> {
        self.block.ok_or(RailError::NotConcrete(*self))
    }

    /// # Errors
    ///
    /// [`RailError::NotConcrete`] for empty and placeholder identities.
    pub fn pos(&self) -> RailResult<BlockPos> {
        self.block().map(|k| k.pos)
    }

    /// `true` iff there is no coordinate (empty or placeholder).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.block.is_none()
    }

    #[inline]
    pub fn is_none_type(&self) -> bool {
        self.rail_type.is_none()
    }

    // ── Derived identities ────────────────────────────────────────────────

    /// This block, considered as rail type `rail_type`.
    ///
    /// # Errors
    ///
    /// [`RailError::NotConcrete`]: there is no block to attach a type to.
    pub fn as_type(&self, rail_type: RailTypeId) -> RailResult<Self> {
        Ok(Self::create(rail_type, self.block()?))
    }

    /// This block, considered as having no rail.
    pub fn as_none_type(&self) -> RailResult<Self> {
        self.as_type(RailTypeId::NONE)
    }

    /// Same world and coordinate, whatever the rail types.  Always `false`
    /// when either side has no coordinate.
    pub fn same_location(&self, other: &SegmentId) -> bool {
        matches!((self.block, other.block), (Some(a), Some(b)) if a == b)
    }
}

impl Default for SegmentId {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl PartialEq for SegmentId {
    fn eq(&self, other: &Self) -> bool {
        self.block == other.block && self.rail_type == other.rail_type
    }
}

impl Eq for SegmentId {}

impl Hash for SegmentId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.block.hash(state);
        self.rail_type.hash(state);
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.block {
            Some(key) => write!(f, "{{{} {}}}", self.rail_type, key.pos),
            None => write!(f, "{{{} ?/?/?}}", self.rail_type),
        }
    }
}
