//! The rail-type capability set.

use tc_core::{BlockFace, BlockKey};
use tc_world::WorldAccess;

use crate::{Junction, NoneRail, PlainRail, RailError, RailResult, RailType, RailTypeId, SegmentId, TurnoutRail};

/// All rail types known to the framework, indexed by [`RailTypeId`].
///
/// Slot 0 is always [`NoneRail`].  Inference probes types newest-first, so a
/// type registered later takes precedence over the built-ins for blocks both
/// claim.
pub struct RailTypeRegistry {
    types: Vec<Box<dyn RailType>>,
}

impl RailTypeRegistry {
    /// A registry holding only [`RailTypeId::NONE`].
    pub fn new() -> Self {
        Self { types: vec![Box::new(NoneRail)] }
    }

    /// [`RailTypeId::NONE`], [`PlainRail`], and [`TurnoutRail`].
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(PlainRail);
        registry.register(TurnoutRail);
        registry
    }

    /// Add a rail type and return its id.
    pub fn register<T: RailType>(&mut self, rail_type: T) -> RailTypeId {
        let id = RailTypeId(self.types.len() as u16);
        self.types.push(Box::new(rail_type));
        id
    }

    pub fn get(&self, id: RailTypeId) -> RailResult<&dyn RailType> {
        self.types
            .get(id.index())
            .map(|t| t.as_ref())
            .ok_or(RailError::UnknownRailType(id))
    }

    /// Id of the type registered under `name`.
    pub fn lookup(&self, name: &str) -> Option<RailTypeId> {
        self.types
            .iter()
            .position(|t| t.name() == name)
            .map(|i| RailTypeId(i as u16))
    }

    pub fn name(&self, id: RailTypeId) -> Option<&str> {
        self.types.get(id.index()).map(|t| t.name())
    }

    /// Number of registered types, including `NONE`.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    // ── Capability queries ────────────────────────────────────────────────

    /// The type claiming the block at `key`, or [`RailTypeId::NONE`].
    pub fn infer_type<W: WorldAccess>(&self, world: &W, key: BlockKey) -> RailTypeId {
        (1..self.types.len())
            .rev()
            .find(|&i| self.types[i].claims(world, key))
            .map_or(RailTypeId::NONE, |i| RailTypeId(i as u16))
    }

    /// Junctions that can be switched on `segment`.
    pub fn junctions<W: WorldAccess>(&self, world: &W, segment: SegmentId) -> RailResult<Vec<Junction>> {
        let (rail_type, key) = self.resolve(world, segment)?;
        Ok(rail_type.junctions(world, key))
    }

    /// Where traffic entering `segment` through `junction` leaves.
    pub fn connected_end<W: WorldAccess>(
        &self,
        world:    &W,
        segment:  SegmentId,
        junction: &Junction,
    ) -> RailResult<Option<BlockFace>> {
        let (rail_type, key) = self.resolve(world, segment)?;
        Ok(rail_type.connected_end(world, key, junction))
    }

    pub fn has_block_activation<W: WorldAccess>(&self, world: &W, segment: SegmentId) -> RailResult<bool> {
        let (rail_type, key) = self.resolve(world, segment)?;
        Ok(rail_type.has_block_activation(world, key))
    }

    /// Delegate a connectivity change to the segment's rail type.
    pub fn switch_junction<W: WorldAccess>(
        &self,
        world:   &mut W,
        segment: SegmentId,
        from:    &Junction,
        to:      &Junction,
    ) -> RailResult<()> {
        let (rail_type, key) = self.resolve(world, segment)?;
        rail_type.switch_junction(world, key, from, to)
    }

    fn resolve<W: WorldAccess>(&self, world: &W, segment: SegmentId) -> RailResult<(&dyn RailType, BlockKey)> {
        let key = segment.block()?;
        if !world.is_loaded(key.world) {
            return Err(RailError::WorldNotLoaded(key.world));
        }
        Ok((self.get(segment.rail_type())?, key))
    }
}

impl Default for RailTypeRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
