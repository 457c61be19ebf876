//! `tc-cache`: derived per-segment data, computed on demand.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                    |
//! |-----------|-------------------------------------------------------------|
//! | [`entry`] | `CachedSegment`, `FreshnessToken`, `CacheEntry` view        |
//! | [`cache`] | `SegmentCache`: lookup, verification, invalidation hooks   |
//!
//! # Freshness model
//!
//! Every cached segment carries a [`FreshnessToken`] minted from three
//! counters at scan time:
//!
//! 1. the world's **generation** (changes when the host reloads the world),
//! 2. the **location epoch** of the block (bumped by sign, vehicle, and block
//!    events at that coordinate, for every rail type there),
//! 3. the **segment epoch** (bumped by [`SegmentCache::invalidate`] for one
//!    identity only).
//!
//! A lookup recomputes the token from the current counters and rescans only
//! when it differs.  Invalidation never deletes data, so the last snapshot
//! stays readable through [`SegmentCache::peek`] until the next rescan.
//!
//! The cache is single-threaded: all mutation goes through `&mut self` from
//! the host's tick loop.

pub mod cache;
pub mod entry;


pub use cache::{CacheStats, SegmentCache};
pub use entry::{CacheEntry, CachedSegment, FreshnessToken};
