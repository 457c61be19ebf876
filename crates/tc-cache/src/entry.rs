//! Cached per-segment data.

use std::sync::Arc;

use tc_core::VehicleId;
use tc_world::TrackedSign;

/// Proof that a [`CachedSegment`] was computed against a particular world
/// generation and has not been invalidated since.  Opaque outside the cache.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct FreshnessToken {
    pub(crate) generation: u64,
    pub(crate) location:   u64,
    pub(crate) segment:    u64,
}

/// Signs and occupants of one segment as of its last scan.
#[derive(Clone, Debug)]
pub struct CachedSegment {
    pub(crate) signs:     Arc<[TrackedSign]>,
    pub(crate) occupants: Vec<VehicleId>,
    pub(crate) token:     FreshnessToken,
}

impl CachedSegment {
    /// Attached signs, nearest first.
    #[inline]
    pub fn signs(&self) -> &[TrackedSign] {
        &self.signs
    }

    /// The sign snapshot as a shared handle, for callers that must hold it
    /// across later cache calls.
    #[inline]
    pub fn shared_signs(&self) -> Arc<[TrackedSign]> {
        Arc::clone(&self.signs)
    }

    /// Vehicles resolved onto the segment, ascending id.
    #[inline]
    pub fn occupants(&self) -> &[VehicleId] {
        &self.occupants
    }

    /// Same storage as [`occupants`](Self::occupants), for in-place edits
    /// (e.g. a vehicle leaving mid-tick before the next rescan).
    #[inline]
    pub fn occupants_mut(&mut self) -> &mut Vec<VehicleId> {
        &mut self.occupants
    }

    #[inline]
    pub fn token(&self) -> FreshnessToken {
        self.token
    }
}

/// What the cache currently holds for an identity, without rescanning.
#[derive(Copy, Clone, Debug)]
pub enum CacheEntry<'a> {
    /// Never computed.
    Unresolved,
    /// Tombstoned by [`SegmentCache::remove`](crate::SegmentCache::remove).
    Removed,
    /// Last snapshot; its token no longer verifies.
    Stale(&'a CachedSegment),
    /// Up to date.
    Valid(&'a CachedSegment),
}

impl<'a> CacheEntry<'a> {
    /// The stored snapshot, fresh or not.
    pub fn segment(&self) -> Option<&'a CachedSegment> {
        match *self {
            CacheEntry::Stale(s) | CacheEntry::Valid(s) => Some(s),
            CacheEntry::Unresolved | CacheEntry::Removed => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, CacheEntry::Valid(_))
    }
}
