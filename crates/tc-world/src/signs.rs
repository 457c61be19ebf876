//! Signs attached to rails.
//!
//! A sign belongs to the rail directly above it: the rail at `y` owns the
//! signs at `y-1`, `y-2`, … down to the configured search depth, as long as
//! the column below the rail holds nothing but signs.  The first gap ends
//! the search.

use rustc_hash::FxHashMap;

use tc_core::{BlockKey, SignId, WorldId};

/// A placed sign and its text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackedSign {
    pub id:    SignId,
    /// Where the sign itself is placed (not the rail it is attached to).
    pub key:   BlockKey,
    pub lines: Vec<String>,
}

impl TrackedSign {
    /// Line `i`, or `""` past the last line.
    pub fn line(&self, i: usize) -> &str {
        self.lines.get(i).map_or("", String::as_str)
    }
}

/// Enumerates the signs attached to a rail block.
pub trait SignRegistry {
    /// Signs attached to the rail at `rail`, nearest first, searching at most
    /// `depth` blocks down.
    fn attached_signs(&self, rail: BlockKey, depth: u8) -> Vec<TrackedSign>;
}

// ── SignBoard ─────────────────────────────────────────────────────────────────

/// In-memory [`SignRegistry`]: one sign per block.
#[derive(Default)]
pub struct SignBoard {
    signs:   FxHashMap<BlockKey, TrackedSign>,
    next_id: u32,
}

impl SignBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a sign at `key`, replacing any sign already there.
    pub fn place<I, L>(&mut self, key: BlockKey, lines: I) -> SignId
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        let id = SignId(self.next_id);
        self.next_id += 1;
        let lines = lines.into_iter().map(Into::into).collect();
        self.signs.insert(key, TrackedSign { id, key, lines });
        id
    }

    /// Remove the sign at `key`, returning it.
    pub fn break_sign(&mut self, key: BlockKey) -> Option<TrackedSign> {
        self.signs.remove(&key)
    }

    pub fn get(&self, key: BlockKey) -> Option<&TrackedSign> {
        self.signs.get(&key)
    }

    /// Drop every sign in `world`.  Returns how many were removed.
    pub fn remove_world(&mut self, world: WorldId) -> usize {
        let before = self.signs.len();
        self.signs.retain(|k, _| k.world != world);
        before - self.signs.len()
    }

    pub fn len(&self) -> usize {
        self.signs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signs.is_empty()
    }
}

impl SignRegistry for SignBoard {
    fn attached_signs(&self, rail: BlockKey, depth: u8) -> Vec<TrackedSign> {
        (1..=i32::from(depth))
            .map(|n| BlockKey::new(rail.world, rail.pos.below(n)))
            .map_while(|key| self.signs.get(&key))
            .cloned()
            .collect()
    }
}
