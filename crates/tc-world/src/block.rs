//! Block states relevant to rails.
//!
//! The host stores arbitrary block data; the rail framework only needs to
//! tell rails apart from everything else and to read and rewrite their
//! connectivity.  Blocks the host does not store are air.

use tc_core::BlockFace;

/// The state of one stored block.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BlockState {
    /// Any non-rail block (ground, walls, sign posts' supports, …).
    Solid,
    /// A plain rail connecting two faces.
    Rail(RailShape),
    /// A switchable turnout: one fixed trunk and two branches.
    Turnout(Turnout),
}

// ── RailShape ─────────────────────────────────────────────────────────────────

/// An unordered pair of distinct faces a plain rail connects.
///
/// Stored normalized (lower face first) so `PartialEq` is order-independent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RailShape {
    a: BlockFace,
    b: BlockFace,
}

impl RailShape {
    /// Returns `None` if both ends are the same face.
    pub fn new(a: BlockFace, b: BlockFace) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less    => Some(Self { a, b }),
            std::cmp::Ordering::Greater => Some(Self { a: b, b: a }),
            std::cmp::Ordering::Equal   => None,
        }
    }

    /// Straight north–south rail.
    pub fn north_south() -> Self {
        Self { a: BlockFace::North, b: BlockFace::South }
    }

    /// Straight east–west rail.
    pub fn east_west() -> Self {
        Self { a: BlockFace::East, b: BlockFace::West }
    }

    #[inline]
    pub fn ends(self) -> [BlockFace; 2] {
        [self.a, self.b]
    }

    #[inline]
    pub fn connects(self, face: BlockFace) -> bool {
        self.a == face || self.b == face
    }

    /// The end a vehicle entering through `face` leaves through.
    pub fn other_end(self, face: BlockFace) -> Option<BlockFace> {
        if face == self.a {
            Some(self.b)
        } else if face == self.b {
            Some(self.a)
        } else {
            None
        }
    }

    /// The shape obtained by moving end `from` to `to`.
    ///
    /// `None` if `from` is not an end or the result would loop back on
    /// itself.
    pub fn with_end_moved(self, from: BlockFace, to: BlockFace) -> Option<RailShape> {
        let keep = self.other_end(from)?;
        RailShape::new(keep, to)
    }

    pub fn is_straight(self) -> bool {
        self.a.opposite() == self.b
    }
}

// ── Turnout ───────────────────────────────────────────────────────────────────

/// A turnout: traffic from `trunk` continues into whichever branch is active.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Turnout {
    trunk:    BlockFace,
    branches: [BlockFace; 2],
    active:   usize,
}

impl Turnout {
    /// Returns `None` unless all three faces are distinct.  The first branch
    /// starts active.
    pub fn new(trunk: BlockFace, first: BlockFace, second: BlockFace) -> Option<Self> {
        if trunk == first || trunk == second || first == second {
            return None;
        }
        Some(Self { trunk, branches: [first, second], active: 0 })
    }

    #[inline]
    pub fn trunk(self) -> BlockFace {
        self.trunk
    }

    #[inline]
    pub fn branches(self) -> [BlockFace; 2] {
        self.branches
    }

    #[inline]
    pub fn active(self) -> BlockFace {
        self.branches[self.active]
    }

    /// Make `branch` the active branch.  Returns `false` (and changes
    /// nothing) if `branch` is not one of the two branches.
    pub fn set_active(&mut self, branch: BlockFace) -> bool {
        match self.branches.iter().position(|&b| b == branch) {
            Some(i) => {
                self.active = i;
                true
            }
            None => false,
        }
    }

    /// The face a vehicle entering through `face` leaves through, given the
    /// current setting.  Entering through the inactive branch leads nowhere.
    pub fn other_end(self, face: BlockFace) -> Option<BlockFace> {
        if face == self.trunk {
            Some(self.active())
        } else if face == self.active() {
            Some(self.trunk)
        } else {
            None
        }
    }
}
