//! The `TrackSystem` facade.

use tracing::debug;

use tc_cache::SegmentCache;
use tc_core::{BlockFace, BlockKey, BlockPos, ChunkPos, SignId, TrackConfig, VehicleId, WorldId};
use tc_rail::{Junction, RailResult, RailTypeRegistry, SegmentId};
use tc_world::{
    BlockState, Host, MemoryWorld, SignBoard, SignRegistry, TrackedSign, Vehicle, VehicleRegistry,
    VehicleStore, WorldAccess, WorldResult,
};

use crate::{switcher, SwitchOutcome, SwitchResult};

/// Rail types, the segment cache, and the host, wired together.
///
/// The generic methods work with any host.  The host notifies the system
/// through the `on_*` hooks whenever something the cache depends on changes.
/// [`MemoryTrackSystem`] also has convenience methods that make the change
/// *and* send the notification.
///
/// Create via [`TrackSystemBuilder`][crate::TrackSystemBuilder].
pub struct TrackSystem<W, S, V> {
    pub config: TrackConfig,
    pub rails:  RailTypeRegistry,
    pub cache:  SegmentCache,
    pub host:   Host<W, S, V>,
}

impl<W, S, V> TrackSystem<W, S, V>
where
    W: WorldAccess,
    S: SignRegistry,
    V: VehicleRegistry,
{
    // ── Segments ──────────────────────────────────────────────────────────

    /// The segment at `key`, typed by whichever rail type claims the block.
    pub fn segment_at(&self, key: BlockKey) -> RailResult<SegmentId> {
        SegmentId::create_inferred(&self.rails, &self.host.world, key)
    }

    pub fn signs(&mut self, segment: SegmentId) -> RailResult<&[TrackedSign]> {
        self.cache.signs(&self.host, segment)
    }

    pub fn occupants(&mut self, segment: SegmentId) -> RailResult<&[VehicleId]> {
        self.cache.occupants(&self.host, segment)
    }

    pub fn occupants_mut(&mut self, segment: SegmentId) -> RailResult<&mut Vec<VehicleId>> {
        self.cache.occupants_mut(&self.host, segment)
    }

    pub fn junctions(&self, segment: SegmentId) -> RailResult<Vec<Junction>> {
        self.rails.junctions(&self.host.world, segment)
    }

    pub fn has_block_activation(&self, segment: SegmentId) -> RailResult<bool> {
        self.rails.has_block_activation(&self.host.world, segment)
    }

    /// Switch `segment` from `from` to `to`, steering occupants when
    /// [`TrackConfig::relocate_on_switch`] is set.
    pub fn switch_junction(
        &mut self,
        segment: SegmentId,
        from:    &Junction,
        to:      &Junction,
    ) -> SwitchResult<SwitchOutcome> {
        switcher::switch_junction(
            &mut self.cache,
            &self.rails,
            &mut self.host,
            segment,
            from,
            to,
            self.config.relocate_on_switch,
        )
    }

    // ── Host notifications ────────────────────────────────────────────────

    /// The block at `key` was placed, broken, or reshaped.
    pub fn on_block_changed(&mut self, key: BlockKey) {
        self.cache.invalidate_location(key);
    }

    /// A sign at `key` was placed, edited, or broken.  Invalidates every rail
    /// block it could be attached to.
    pub fn on_sign_changed(&mut self, key: BlockKey) {
        let p = key.pos;
        for dy in 1..=i32::from(self.cache.sign_search_depth()) {
            self.cache.invalidate_location(BlockKey::at(key.world, p.x, p.y + dy, p.z));
        }
    }

    /// A vehicle left block `from` and/or entered block `to`.
    pub fn on_vehicle_moved(&mut self, from: Option<BlockKey>, to: Option<BlockKey>) {
        if from == to {
            return;
        }
        for key in [from, to].into_iter().flatten() {
            self.cache.invalidate_location(key);
        }
    }

    pub fn on_chunk_unloaded(&mut self, world: WorldId, chunk: ChunkPos) -> usize {
        self.cache.on_chunk_unloaded(world, chunk)
    }

    pub fn on_world_unloaded(&mut self, world: WorldId) -> usize {
        self.cache.on_world_unloaded(world)
    }
}

// ── In-memory host conveniences ───────────────────────────────────────────────

/// A [`TrackSystem`] over the in-memory host.
pub type MemoryTrackSystem = TrackSystem<MemoryWorld, SignBoard, VehicleStore>;

impl MemoryTrackSystem {
    /// Load `world` (a no-op if it is loaded), returning its generation.
    pub fn load_world(&mut self, world: WorldId) -> u64 {
        self.host.world.load_world(world)
    }

    /// Unload `world`: its signs and vehicles go, its cache entries are
    /// removed.  Blocks are kept for the next load.
    pub fn unload_world(&mut self, world: WorldId) -> usize {
        self.host.world.unload_world(world);
        let signs = self.host.signs.remove_world(world);
        let vehicles = self.host.vehicles.remove_world(world);
        debug!(%world, signs, vehicles, "host world dropped");
        self.on_world_unloaded(world)
    }

    pub fn set_block(&mut self, key: BlockKey, state: Option<BlockState>) -> WorldResult<()> {
        self.host.world.set_block(key, state)?;
        self.on_block_changed(key);
        Ok(())
    }

    pub fn place_sign<I, L>(&mut self, key: BlockKey, lines: I) -> SignId
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        let id = self.host.signs.place(key, lines);
        self.on_sign_changed(key);
        id
    }

    pub fn break_sign(&mut self, key: BlockKey) -> Option<TrackedSign> {
        let sign = self.host.signs.break_sign(key)?;
        self.on_sign_changed(key);
        Some(sign)
    }

    pub fn spawn_vehicle(
        &mut self,
        world:    WorldId,
        position: [f64; 3],
        heading:  BlockFace,
        speed:    f32,
    ) -> VehicleId {
        let id = self.host.vehicles.spawn(world, position, heading, speed);
        let block = BlockKey::new(world, BlockPos::containing(position));
        self.on_vehicle_moved(None, Some(block));
        id
    }

    /// Move a vehicle.  Returns `false` for an unknown vehicle.
    pub fn move_vehicle(&mut self, id: VehicleId, position: [f64; 3]) -> bool {
        let Some(previous) = self.host.vehicles.move_to(id, position) else {
            return false;
        };
        let current = self.host.vehicles.get(id).map(Vehicle::block);
        self.on_vehicle_moved(Some(previous), current);
        true
    }

    pub fn despawn_vehicle(&mut self, id: VehicleId) -> Option<Vehicle> {
        let vehicle = self.host.vehicles.despawn(id)?;
        self.on_vehicle_moved(Some(vehicle.block()), None);
        Some(vehicle)
    }
}
