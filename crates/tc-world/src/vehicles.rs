//! Vehicles and the occupant index.
//!
//! # Occupancy
//!
//! A vehicle is *resolved onto* the rail block containing its position
//! (each axis floored).  [`VehicleStore`] keeps one R-tree (via `rstar`) per
//! world over vehicle positions, so "which vehicles are on this block" is an
//! envelope query instead of a scan of every vehicle.
//!
//! # Redirects
//!
//! A junction switch asks the registry to point a vehicle toward a new face.
//! Stationary vehicles can be turned any way; a moving vehicle cannot be
//! flipped end-for-end in the middle of a block.

use rstar::{RTree, RTreeObject, AABB};
use rustc_hash::FxHashMap;

use tc_core::{BlockFace, BlockKey, BlockPos, VehicleId, WorldId};

use crate::RedirectFailure;

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the per-world spatial index.
#[derive(Clone, Debug, PartialEq)]
struct VehicleEntry {
    point: [f64; 3],
    id:    VehicleId,
}

impl RTreeObject for VehicleEntry {
    type Envelope = AABB<[f64; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

// ── Vehicle ───────────────────────────────────────────────────────────────────

/// One vehicle as tracked by the host.
#[derive(Clone, Debug, PartialEq)]
pub struct Vehicle {
    pub id:       VehicleId,
    pub world:    WorldId,
    pub position: [f64; 3],
    /// The face of its current block the vehicle is travelling toward.
    pub heading:  BlockFace,
    /// Blocks per tick.  Zero when stationary.
    pub speed:    f32,
}

impl Vehicle {
    /// The block this vehicle is resolved onto.
    #[inline]
    pub fn block(&self) -> BlockKey {
        BlockKey::new(self.world, BlockPos::containing(self.position))
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.speed > 0.0
    }
}

/// Enumerates and steers vehicles on rail blocks.
pub trait VehicleRegistry {
    /// Vehicles resolved onto `rail`, in ascending id order.
    fn occupants(&self, rail: BlockKey) -> Vec<VehicleId>;

    /// Current heading of `vehicle`, or `None` if it is not registered.
    fn heading(&self, vehicle: VehicleId) -> Option<BlockFace>;

    /// Point `vehicle`, which must be on `rail`, toward `heading`.
    ///
    /// Succeeds without change when the vehicle already travels that way.
    ///
    /// # Errors
    ///
    /// A [`RedirectFailure`] when the vehicle is gone, has left `rail`, or
    /// would have to reverse while moving.
    fn redirect(
        &mut self,
        vehicle: VehicleId,
        rail:    BlockKey,
        heading: BlockFace,
    ) -> Result<(), RedirectFailure>;
}

// ── VehicleStore ──────────────────────────────────────────────────────────────

/// In-memory [`VehicleRegistry`] with an R-tree occupant index.
#[derive(Default)]
pub struct VehicleStore {
    vehicles: FxHashMap<VehicleId, Vehicle>,
    index:    FxHashMap<WorldId, RTree<VehicleEntry>>,
    next_id:  u32,
}

impl VehicleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new vehicle and return its id.
    pub fn spawn(
        &mut self,
        world:    WorldId,
        position: [f64; 3],
        heading:  BlockFace,
        speed:    f32,
    ) -> VehicleId {
        let id = VehicleId(self.next_id);
        self.next_id += 1;
        self.vehicles.insert(id, Vehicle { id, world, position, heading, speed });
        self.index
            .entry(world)
            .or_default()
            .insert(VehicleEntry { point: position, id });
        id
    }

    /// Remove a vehicle, returning its last state.
    pub fn despawn(&mut self, id: VehicleId) -> Option<Vehicle> {
        let vehicle = self.vehicles.remove(&id)?;
        if let Some(tree) = self.index.get_mut(&vehicle.world) {
            tree.remove(&VehicleEntry { point: vehicle.position, id });
        }
        Some(vehicle)
    }

    /// Move a vehicle within its world.  Returns the block it occupied before
    /// the move, or `None` if the vehicle is unknown.
    pub fn move_to(&mut self, id: VehicleId, position: [f64; 3]) -> Option<BlockKey> {
        let vehicle = self.vehicles.get_mut(&id)?;
        let previous = vehicle.block();
        let old_point = std::mem::replace(&mut vehicle.position, position);
        Self::reindex(&mut self.index, vehicle.world, id, old_point, position);
        Some(previous)
    }

    pub fn set_speed(&mut self, id: VehicleId, speed: f32) -> bool {
        match self.vehicles.get_mut(&id) {
            Some(v) => {
                v.speed = speed;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.get(&id)
    }

    /// Drop every vehicle in `world`.  Returns how many were removed.
    pub fn remove_world(&mut self, world: WorldId) -> usize {
        let before = self.vehicles.len();
        self.vehicles.retain(|_, v| v.world != world);
        self.index.remove(&world);
        before - self.vehicles.len()
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    fn reindex(
        index: &mut FxHashMap<WorldId, RTree<VehicleEntry>>,
        world: WorldId,
        id:    VehicleId,
        old:   [f64; 3],
        new:   [f64; 3],
    ) {
        let tree = index.entry(world).or_default();
        tree.remove(&VehicleEntry { point: old, id });
        tree.insert(VehicleEntry { point: new, id });
    }
}

impl VehicleRegistry for VehicleStore {
    fn occupants(&self, rail: BlockKey) -> Vec<VehicleId> {
        let Some(tree) = self.index.get(&rail.world) else {
            return Vec::new();
        };
        let p = rail.pos;
        // The envelope is closed, so points on the far faces belong to the
        // neighbouring block; filter by the floored position.
        let lo = [f64::from(p.x), f64::from(p.y), f64::from(p.z)];
        let hi = [lo[0] + 1.0, lo[1] + 1.0, lo[2] + 1.0];
        let mut ids: Vec<VehicleId> = tree
            .locate_in_envelope(&AABB::from_corners(lo, hi))
            .filter(|e| BlockPos::containing(e.point) == p)
            .map(|e| e.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    fn heading(&self, vehicle: VehicleId) -> Option<BlockFace> {
        self.vehicles.get(&vehicle).map(|v| v.heading)
    }

    fn redirect(
        &mut self,
        vehicle: VehicleId,
        rail:    BlockKey,
        heading: BlockFace,
    ) -> Result<(), RedirectFailure> {
        let v = self
            .vehicles
            .get_mut(&vehicle)
            .ok_or(RedirectFailure::UnknownVehicle(vehicle))?;
        if v.block() != rail {
            return Err(RedirectFailure::NotOnRail { vehicle, rail });
        }
        if v.heading == heading {
            return Ok(());
        }
        if v.is_moving() && v.heading.opposite() == heading {
            return Err(RedirectFailure::Reversal { vehicle, heading });
        }

        // Snap onto the rail centre so the vehicle follows the new path from
        // the middle of the block.
        v.heading = heading;
        let centre = rail.pos.rail_center();
        let old_point = std::mem::replace(&mut v.position, centre);
        Self::reindex(&mut self.index, v.world, vehicle, old_point, centre);
        Ok(())
    }
}
