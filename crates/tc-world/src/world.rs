//! Block storage.
//!
//! [`WorldAccess`] is the host's block store as the rail framework sees it:
//! which worlds are loaded, what block sits at a coordinate, and a way to
//! rewrite a rail block when a junction is switched.
//!
//! # Generations
//!
//! Every time a world is loaded it receives a fresh *generation* number from
//! a counter that never repeats.  Anything derived from a world (cached
//! signage, occupant lists) records the generation it was computed against
//! and is stale as soon as the world reports a different one or none at all.

use rustc_hash::FxHashMap;

use tc_core::{BlockKey, BlockPos, WorldId};

use crate::{BlockState, WorldError, WorldResult};

/// Read/write access to the host's blocks.
pub trait WorldAccess {
    /// Generation of `world`, or `None` if it is not loaded.
    fn generation(&self, world: WorldId) -> Option<u64>;

    /// The block at `key`.  `None` for air and for unloaded worlds.
    fn block(&self, key: BlockKey) -> Option<BlockState>;

    /// Replace the block at `key`; `None` clears it to air.
    ///
    /// # Errors
    ///
    /// Fails if the world is unknown or not loaded.
    fn set_block(&mut self, key: BlockKey, state: Option<BlockState>) -> WorldResult<()>;

    #[inline]
    fn is_loaded(&self, world: WorldId) -> bool {
        self.generation(world).is_some()
    }
}

// ── MemoryWorld ───────────────────────────────────────────────────────────────

struct WorldData {
    /// `Some(generation)` while loaded.
    generation: Option<u64>,
    blocks:     FxHashMap<BlockPos, BlockState>,
}

/// In-memory [`WorldAccess`] implementation.
///
/// Unloading a world keeps its blocks (as the host keeps them on disk);
/// reloading hands out a new generation.
#[derive(Default)]
pub struct MemoryWorld {
    worlds:          FxHashMap<WorldId, WorldData>,
    next_generation: u64,
}

impl MemoryWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `world`, creating it empty if it has never been seen.
    ///
    /// Returns the world's generation.  Loading an already-loaded world is a
    /// no-op that returns its current generation.
    pub fn load_world(&mut self, world: WorldId) -> u64 {
        let next = &mut self.next_generation;
        let data = self.worlds.entry(world).or_insert_with(|| WorldData {
            generation: None,
            blocks:     FxHashMap::default(),
        });
        *data.generation.get_or_insert_with(|| {
            *next += 1;
            *next
        })
    }

    /// Unload `world`.  Returns `false` if it was not loaded.
    pub fn unload_world(&mut self, world: WorldId) -> bool {
        self.worlds
            .get_mut(&world)
            .and_then(|w| w.generation.take())
            .is_some()
    }

    /// Number of stored (non-air) blocks in `world`.
    pub fn block_count(&self, world: WorldId) -> usize {
        self.worlds.get(&world).map_or(0, |w| w.blocks.len())
    }

    /// Iterator over the loaded worlds.
    pub fn loaded_worlds(&self) -> impl Iterator<Item = WorldId> + '_ {
        self.worlds
            .iter()
            .filter(|(_, w)| w.generation.is_some())
            .map(|(&id, _)| id)
    }

    fn loaded_mut(&mut self, world: WorldId) -> WorldResult<&mut WorldData> {
        let data = self.worlds.get_mut(&world).ok_or(WorldError::UnknownWorld(world))?;
        if data.generation.is_none() {
            return Err(WorldError::WorldNotLoaded(world));
        }
        Ok(data)
    }
}

impl WorldAccess for MemoryWorld {
    fn generation(&self, world: WorldId) -> Option<u64> {
        self.worlds.get(&world).and_then(|w| w.generation)
    }

    fn block(&self, key: BlockKey) -> Option<BlockState> {
        let data = self.worlds.get(&key.world)?;
        data.generation?;
        data.blocks.get(&key.pos).copied()
    }

    fn set_block(&mut self, key: BlockKey, state: Option<BlockState>) -> WorldResult<()> {
        let data = self.loaded_mut(key.world)?;
        match state {
            Some(state) => data.blocks.insert(key.pos, state),
            None => data.blocks.remove(&key.pos),
        };
        Ok(())
    }
}
