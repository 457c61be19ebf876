//! The bundle of host collaborators.

use crate::{MemoryWorld, SignBoard, VehicleStore};

/// Everything the rail framework reads from (and writes back to) the host.
///
/// Fields are `pub` so callers can borrow them independently: the junction
/// switch rewrites `world` and steers `vehicles` while the cache only reads.
#[derive(Default)]
pub struct Host<W, S, V> {
    pub world:    W,
    pub signs:    S,
    pub vehicles: V,
}

impl<W, S, V> Host<W, S, V> {
    pub fn new(world: W, signs: S, vehicles: V) -> Self {
        Self { world, signs, vehicles }
    }
}

/// A host backed entirely by the in-memory implementations.
pub type MemoryHost = Host<MemoryWorld, SignBoard, VehicleStore>;
