//! The `SegmentCache`.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use tc_core::{BlockKey, ChunkPos, TrackConfig, VehicleId, WorldId};
use tc_rail::{RailError, RailResult, SegmentId};
use tc_world::{Host, SignRegistry, TrackedSign, VehicleRegistry, WorldAccess};

use crate::{CacheEntry, CachedSegment, FreshnessToken};

/// Per-identity storage.
#[derive(Default)]
struct Slot {
    /// Bumped by [`SegmentCache::invalidate`].
    epoch:   u64,
    removed: bool,
    /// Last scan result; kept across invalidation.
    segment: Option<CachedSegment>,
}

/// Lookup counters, for diagnostics.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from a verified entry.
    pub hits:    u64,
    /// Lookups that scanned the host.
    pub rescans: u64,
}

/// Process-wide map from [`SegmentId`] to its [`CachedSegment`].
///
/// Entries are created on first lookup and rescanned only when their
/// [`FreshnessToken`] stops verifying (see the [crate docs](crate)).
/// Identities that differ only by rail type get separate entries.
pub struct SegmentCache {
    slots:             FxHashMap<SegmentId, Slot>,
    /// Location epochs, present for every block that has ever been scanned.
    locations:         FxHashMap<BlockKey, u64>,
    sign_search_depth: u8,
    stats:             CacheStats,
}

impl SegmentCache {
    pub fn new(config: &TrackConfig) -> Self {
        let mut slots = FxHashMap::default();
        slots.reserve(config.initial_cache_capacity);
        Self {
            slots,
            locations: FxHashMap::default(),
            sign_search_depth: config.sign_search_depth,
            stats: CacheStats::default(),
        }
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    /// The verified entry for `id`, scanning the host if needed.
    ///
    /// Repeated calls with no invalidation in between return the stored
    /// entry without touching the sign or vehicle registries.
    ///
    /// # Errors
    ///
    /// [`RailError::NotConcrete`] for identities without a coordinate;
    /// [`RailError::WorldNotLoaded`] if the host has unloaded the world.
    pub fn get_entry<W, S, V>(&mut self, host: &Host<W, S, V>, id: SegmentId) -> RailResult<&CachedSegment>
    where
        W: WorldAccess,
        S: SignRegistry,
        V: VehicleRegistry,
    {
        self.resolve(host, id).map(|s| &*s)
    }

    /// Signs attached to `id`, nearest first.
    pub fn signs<W, S, V>(&mut self, host: &Host<W, S, V>, id: SegmentId) -> RailResult<&[TrackedSign]>
    where
        W: WorldAccess,
        S: SignRegistry,
        V: VehicleRegistry,
    {
        self.resolve(host, id).map(|s| s.signs())
    }

    /// Vehicles on `id`, ascending id.
    pub fn occupants<W, S, V>(&mut self, host: &Host<W, S, V>, id: SegmentId) -> RailResult<&[VehicleId]>
    where
        W: WorldAccess,
        S: SignRegistry,
        V: VehicleRegistry,
    {
        self.resolve(host, id).map(|s| s.occupants())
    }

    /// Mutable view of the occupants of `id`.  Edits last until the entry is
    /// next invalidated.
    pub fn occupants_mut<W, S, V>(
        &mut self,
        host: &Host<W, S, V>,
        id:   SegmentId,
    ) -> RailResult<&mut Vec<VehicleId>>
    where
        W: WorldAccess,
        S: SignRegistry,
        V: VehicleRegistry,
    {
        self.resolve(host, id).map(CachedSegment::occupants_mut)
    }

    /// What is stored for `id` right now, verified against `world` but never
    /// rescanned.
    pub fn peek<W: WorldAccess>(&self, world: &W, id: SegmentId) -> CacheEntry<'_> {
        let Some(slot) = self.slots.get(&id) else {
            return CacheEntry::Unresolved;
        };
        if slot.removed {
            return CacheEntry::Removed;
        }
        match &slot.segment {
            None => CacheEntry::Unresolved,
            Some(seg) if Some(seg.token) == self.current_token(world, id, slot.epoch) => CacheEntry::Valid(seg),
            Some(seg) => CacheEntry::Stale(seg),
        }
    }

    // ── Invalidation ──────────────────────────────────────────────────────

    /// Force the next lookup of `id` to rescan.  The current snapshot stays
    /// readable through [`peek`](Self::peek).
    pub fn invalidate(&mut self, id: SegmentId) {
        if let Some(slot) = self.slots.get_mut(&id) {
            slot.epoch += 1;
            debug!(segment = %id, epoch = slot.epoch, "segment invalidated");
        }
    }

    /// Force a rescan of every rail type cached at `key`.  Called for sign,
    /// vehicle, and block changes at that coordinate.
    pub fn invalidate_location(&mut self, key: BlockKey) {
        // Locations never scanned have nothing to invalidate.
        if let Some(epoch) = self.locations.get_mut(&key) {
            *epoch += 1;
            trace!(%key, epoch = *epoch, "location invalidated");
        }
    }

    /// Replace the entry for `id` with [`CacheEntry::Removed`].
    ///
    /// # Errors
    ///
    /// [`RailError::NotConcrete`] for identities without a coordinate, which
    /// can never be read back.
    pub fn remove(&mut self, id: SegmentId) -> RailResult<()> {
        id.block()?;
        let slot = self.slots.entry(id).or_default();
        slot.removed = true;
        slot.segment = None;
        Ok(())
    }

    /// Drop every entry in `chunk` of `world`, along with the location
    /// epochs there.  Returns how many identities were dropped.
    pub fn on_chunk_unloaded(&mut self, world: WorldId, chunk: ChunkPos) -> usize {
        let count = self.remove_where(|key| key.world == world && key.chunk() == chunk);
        debug!(%world, chunk_x = chunk.x, chunk_z = chunk.z, count, "chunk unloaded");
        count
    }

    /// Drop every entry in `world`.  Returns how many identities were
    /// dropped.
    pub fn on_world_unloaded(&mut self, world: WorldId) -> usize {
        let count = self.remove_where(|key| key.world == world);
        debug!(%world, count, "world unloaded");
        count
    }

    /// Forget entries tombstoned by [`remove`](Self::remove).  Returns how
    /// many were dropped.
    pub fn purge_removed(&mut self) -> usize {
        let before = self.slots.len();
        self.slots.retain(|_, slot| !slot.removed);
        before - self.slots.len()
    }

    // ── Bookkeeping ───────────────────────────────────────────────────────

    /// Number of identities with a slot (any state).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.locations.clear();
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn sign_search_depth(&self) -> u8 {
        self.sign_search_depth
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn resolve<W, S, V>(&mut self, host: &Host<W, S, V>, id: SegmentId) -> RailResult<&mut CachedSegment>
    where
        W: WorldAccess,
        S: SignRegistry,
        V: VehicleRegistry,
    {
        let key = id.block()?;
        let generation = host
            .world
            .generation(key.world)
            .ok_or(RailError::WorldNotLoaded(key.world))?;
        let location = *self.locations.entry(key).or_insert(0);
        let slot = self.slots.entry(id).or_default();
        let token = FreshnessToken { generation, location, segment: slot.epoch };

        let segment = match slot.segment.take() {
            Some(seg) if seg.token == token => {
                self.stats.hits += 1;
                trace!(segment = %id, "cache hit");
                seg
            }
            previous => {
                if previous.is_some() {
                    debug!(segment = %id, "cached segment failed verification");
                }
                self.stats.rescans += 1;
                let seg = scan(host, key, self.sign_search_depth, token);
                debug!(
                    segment = %id,
                    signs = seg.signs.len(),
                    occupants = seg.occupants.len(),
                    "segment scanned"
                );
                seg
            }
        };
        slot.removed = false;
        Ok(slot.segment.insert(segment))
    }

    fn current_token<W: WorldAccess>(&self, world: &W, id: SegmentId, epoch: u64) -> Option<FreshnessToken> {
        let key = id.block().ok()?;
        Some(FreshnessToken {
            generation: world.generation(key.world)?,
            location:   self.locations.get(&key).copied().unwrap_or(0),
            segment:    epoch,
        })
    }

    fn remove_where(&mut self, pred: impl Fn(BlockKey) -> bool) -> usize {
        let before = self.slots.len();
        self.slots.retain(|id, _| !id.block().is_ok_and(&pred));
        self.locations.retain(|&key, _| !pred(key));
        before - self.slots.len()
    }
}

/// Read the host's current signs and occupants for the block at `key`.
///
/// Pure: never mutates the host, so repeating it is harmless.
fn scan<W, S, V>(host: &Host<W, S, V>, key: BlockKey, depth: u8, token: FreshnessToken) -> CachedSegment
where
    S: SignRegistry,
    V: VehicleRegistry,
{
    let signs: Arc<[TrackedSign]> = host.signs.attached_signs(key, depth).into();
    CachedSegment {
        signs,
        occupants: host.vehicles.occupants(key),
        token,
    }
}
