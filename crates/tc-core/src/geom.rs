//! Block-grid geometry.
//!
//! The world is a grid of unit blocks addressed by integer coordinates.  A
//! [`BlockPos`] is a coordinate within one world; a [`BlockKey`] pairs it with
//! the owning [`WorldId`] and is the lightweight key used wherever a block
//! must be identified across worlds (hash maps, cache keys).  Blocks are
//! grouped into 16×16 columns ([`ChunkPos`]) which the host loads and unloads
//! as a unit.

use std::fmt;
use std::str::FromStr;

use crate::{TrackError, WorldId};

/// Width of a chunk column in blocks, along both X and Z.
pub const CHUNK_SIZE: i32 = 16;

// ── BlockPos ──────────────────────────────────────────────────────────────────

/// Integer block coordinate.  Y is up.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The neighbouring block in direction `face`.
    #[inline]
    pub fn relative(self, face: BlockFace) -> Self {
        let (dx, dy, dz) = face.offset();
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// The block `n` steps below this one.
    #[inline]
    pub fn below(self, n: i32) -> Self {
        Self::new(self.x, self.y - n, self.z)
    }

    /// The chunk column containing this block.
    #[inline]
    pub fn chunk(self) -> ChunkPos {
        ChunkPos {
            x: self.x.div_euclid(CHUNK_SIZE),
            z: self.z.div_euclid(CHUNK_SIZE),
        }
    }

    /// The block containing a continuous point, flooring each axis.
    ///
    /// Points are `f64` so every block's interior is representable across
    /// the whole `i32` range.
    #[inline]
    pub fn containing(point: [f64; 3]) -> Self {
        Self::new(
            point[0].floor() as i32,
            point[1].floor() as i32,
            point[2].floor() as i32,
        )
    }

    /// Centre of the block's bottom face; where a vehicle rides on a rail.
    #[inline]
    pub fn rail_center(self) -> [f64; 3] {
        [f64::from(self.x) + 0.5, f64::from(self.y), f64::from(self.z) + 0.5]
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.x, self.y, self.z)
    }
}

// ── ChunkPos ──────────────────────────────────────────────────────────────────

/// Coordinate of a 16×16 chunk column.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChunkPos {
    pub x: i32,
    pub z: i32,
}

impl ChunkPos {
    #[inline]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}

// ── BlockKey ──────────────────────────────────────────────────────────────────

/// A block coordinate bound to its world.
///
/// `Copy`, 16 bytes, and hashed field-wise: this is what every cache and
/// registry in the framework is keyed by.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockKey {
    pub world: WorldId,
    pub pos: BlockPos,
}

impl BlockKey {
    #[inline]
    pub const fn new(world: WorldId, pos: BlockPos) -> Self {
        Self { world, pos }
    }

    /// Shorthand for `BlockKey::new(world, BlockPos::new(x, y, z))`.
    #[inline]
    pub const fn at(world: WorldId, x: i32, y: i32, z: i32) -> Self {
        Self::new(world, BlockPos::new(x, y, z))
    }

    /// The key of the neighbouring block in direction `face`.
    #[inline]
    pub fn relative(self, face: BlockFace) -> Self {
        Self::new(self.world, self.pos.relative(face))
    }

    #[inline]
    pub fn chunk(self) -> ChunkPos {
        self.pos.chunk()
    }
}

impl fmt::Display for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.pos, self.world)
    }
}

// ── BlockFace ─────────────────────────────────────────────────────────────────

/// One of the six faces of a block.
///
/// Rails connect through faces; vehicle headings and junction directions are
/// expressed as the face a vehicle travels toward.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlockFace {
    North,
    East,
    South,
    West,
    Up,
    Down,
}

impl BlockFace {
    /// The four faces a rail can connect through, clockwise from north.
    pub const HORIZONTAL: [BlockFace; 4] =
        [BlockFace::North, BlockFace::East, BlockFace::South, BlockFace::West];

    /// Unit offset `(dx, dy, dz)`.  North is −Z, east is +X.
    #[inline]
    pub fn offset(self) -> (i32, i32, i32) {
        match self {
            BlockFace::North => (0, 0, -1),
            BlockFace::East  => (1, 0, 0),
            BlockFace::South => (0, 0, 1),
            BlockFace::West  => (-1, 0, 0),
            BlockFace::Up    => (0, 1, 0),
            BlockFace::Down  => (0, -1, 0),
        }
    }

    #[inline]
    pub fn opposite(self) -> BlockFace {
        match self {
            BlockFace::North => BlockFace::South,
            BlockFace::East  => BlockFace::West,
            BlockFace::South => BlockFace::North,
            BlockFace::West  => BlockFace::East,
            BlockFace::Up    => BlockFace::Down,
            BlockFace::Down  => BlockFace::Up,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BlockFace::North => "north",
            BlockFace::East  => "east",
            BlockFace::South => "south",
            BlockFace::West  => "west",
            BlockFace::Up    => "up",
            BlockFace::Down  => "down",
        }
    }
}

impl fmt::Display for BlockFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockFace {
    type Err = TrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "north" | "n" => Ok(BlockFace::North),
            "east"  | "e" => Ok(BlockFace::East),
            "south" | "s" => Ok(BlockFace::South),
            "west"  | "w" => Ok(BlockFace::West),
            "up"    | "u" => Ok(BlockFace::Up),
            "down"  | "d" => Ok(BlockFace::Down),
            other => Err(TrackError::Parse(format!("unknown block face {other:?}"))),
        }
    }
}
