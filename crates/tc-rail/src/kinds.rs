//! Built-in rail types.

use tc_core::{BlockFace, BlockKey};
use tc_world::{BlockState, WorldAccess};

use crate::{Junction, RailError, RailResult, RailType};

// ── NoneRail ──────────────────────────────────────────────────────────────────

/// Backs [`RailTypeId::NONE`](crate::RailTypeId::NONE): claims nothing, has
/// no junctions.
pub struct NoneRail;

impl RailType for NoneRail {
    fn name(&self) -> &str {
        "none"
    }

    fn claims(&self, _world: &dyn WorldAccess, _key: BlockKey) -> bool {
        false
    }

    fn junctions(&self, _world: &dyn WorldAccess, _key: BlockKey) -> Vec<Junction> {
        Vec::new()
    }

    fn connected_end(&self, _: &dyn WorldAccess, _: BlockKey, _: &Junction) -> Option<BlockFace> {
        None
    }

    fn switch_junction(
        &self,
        _world: &mut dyn WorldAccess,
        key:    BlockKey,
        _from:  &Junction,
        _to:    &Junction,
    ) -> RailResult<()> {
        Err(RailError::NotRail(key))
    }
}

// ── PlainRail ─────────────────────────────────────────────────────────────────

/// An ordinary two-ended rail, straight or curved.
///
/// Any horizontal face is a junction: switching moves the end at `from` over
/// to `to`, turning a straight piece into a curve or back.
pub struct PlainRail;

impl PlainRail {
    fn shape(world: &dyn WorldAccess, key: BlockKey) -> Option<tc_world::RailShape> {
        match world.block(key) {
            Some(BlockState::Rail(shape)) => Some(shape),
            _ => None,
        }
    }
}

impl RailType for PlainRail {
    fn name(&self) -> &str {
        "rail"
    }

    fn claims(&self, world: &dyn WorldAccess, key: BlockKey) -> bool {
        Self::shape(world, key).is_some()
    }

    fn junctions(&self, world: &dyn WorldAccess, key: BlockKey) -> Vec<Junction> {
        if Self::shape(world, key).is_none() {
            return Vec::new();
        }
        BlockFace::HORIZONTAL.into_iter().map(Junction::facing).collect()
    }

    fn connected_end(
        &self,
        world:    &dyn WorldAccess,
        key:      BlockKey,
        junction: &Junction,
    ) -> Option<BlockFace> {
        Self::shape(world, key)?.other_end(junction.face())
    }

    fn switch_junction(
        &self,
        world: &mut dyn WorldAccess,
        key:   BlockKey,
        from:  &Junction,
        to:    &Junction,
    ) -> RailResult<()> {
        let shape = Self::shape(world, key).ok_or(RailError::NotRail(key))?;
        if !shape.connects(from.face()) {
            return Err(RailError::JunctionNotConnected {
                rail:     key,
                junction: from.name().to_owned(),
            });
        }
        let moved = shape
            .with_end_moved(from.face(), to.face())
            .ok_or(RailError::InvalidShape { rail: key, from: from.face(), to: to.face() })?;
        world.set_block(key, Some(BlockState::Rail(moved)))?;
        Ok(())
    }
}

// ── TurnoutRail ───────────────────────────────────────────────────────────────

/// A powered turnout.  Its junctions are its two branches; switching throws
/// the points so the trunk connects to `to`.
pub struct TurnoutRail;

impl TurnoutRail {
    fn turnout(world: &dyn WorldAccess, key: BlockKey) -> Option<tc_world::Turnout> {
        match world.block(key) {
            Some(BlockState::Turnout(t)) => Some(t),
            _ => None,
        }
    }
}

impl RailType for TurnoutRail {
    fn name(&self) -> &str {
        "turnout"
    }

    fn claims(&self, world: &dyn WorldAccess, key: BlockKey) -> bool {
        Self::turnout(world, key).is_some()
    }

    fn junctions(&self, world: &dyn WorldAccess, key: BlockKey) -> Vec<Junction> {
        Self::turnout(world, key)
            .map(|t| t.branches().into_iter().map(Junction::facing).collect())
            .unwrap_or_default()
    }

    fn connected_end(
        &self,
        world:    &dyn WorldAccess,
        key:      BlockKey,
        junction: &Junction,
    ) -> Option<BlockFace> {
        Self::turnout(world, key)?.other_end(junction.face())
    }

    fn has_block_activation(&self, world: &dyn WorldAccess, key: BlockKey) -> bool {
        Self::turnout(world, key).is_some()
    }

    fn switch_junction(
        &self,
        world: &mut dyn WorldAccess,
        key:   BlockKey,
        _from: &Junction,
        to:    &Junction,
    ) -> RailResult<()> {
        let mut turnout = Self::turnout(world, key).ok_or(RailError::NotRail(key))?;
        if !turnout.set_active(to.face()) {
            return Err(RailError::JunctionNotConnected {
                rail:     key,
                junction: to.name().to_owned(),
            });
        }
        world.set_block(key, Some(BlockState::Turnout(turnout)))?;
        Ok(())
    }
}
