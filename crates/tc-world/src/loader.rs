//! CSV fixture loader.
//!
//! # CSV format
//!
//! One row per block or sign.  Worlds named in the file are loaded on first
//! use.
//!
//! ```csv
//! world,x,y,z,kind,faces,text
//! 0,10,64,20,rail,north-south,
//! 0,10,64,21,turnout,south:north+east,
//! 0,10,63,20,sign,,[train]|station|Harbour
//! 0,10,62,20,solid,,
//! ```
//!
//! | `kind`    | `faces`                                 | `text`                |
//! |-----------|-----------------------------------------|-----------------------|
//! | `rail`    | two faces joined by `-`                 | ignored               |
//! | `turnout` | `trunk:first+second` (first is active)  | ignored               |
//! | `solid`   | ignored                                 | ignored               |
//! | `sign`    | ignored                                 | lines, pipe-separated |

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use tc_core::{BlockFace, BlockKey, WorldId};

use crate::{BlockState, MemoryWorld, RailShape, SignBoard, Turnout, WorldAccess, WorldError, WorldResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct FixtureRecord {
    world: u32,
    x:     i32,
    y:     i32,
    z:     i32,
    kind:  String,
    #[serde(default)]
    faces: String,
    #[serde(default)]
    text:  String,
}

/// What a fixture load added.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FixtureSummary {
    pub blocks: usize,
    pub signs:  usize,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load blocks and signs from a CSV fixture file.
pub fn load_fixture_csv(
    path:  &Path,
    world: &mut MemoryWorld,
    signs: &mut SignBoard,
) -> WorldResult<FixtureSummary> {
    let file = std::fs::File::open(path)?;
    load_fixture_reader(file, world, signs)
}

/// Like [`load_fixture_csv`] but accepts any `Read` source.
///
/// Useful for tests (pass a `std::io::Cursor`) and for fixtures embedded in
/// binaries.
pub fn load_fixture_reader<R: Read>(
    reader: R,
    world:  &mut MemoryWorld,
    signs:  &mut SignBoard,
) -> WorldResult<FixtureSummary> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut summary = FixtureSummary::default();

    for (line, result) in csv_reader.deserialize::<FixtureRecord>().enumerate() {
        let row = result.map_err(|e| WorldError::Parse(e.to_string()))?;
        let key = BlockKey::at(WorldId(row.world), row.x, row.y, row.z);
        world.load_world(key.world);

        let state = match row.kind.trim() {
            "rail"    => Some(BlockState::Rail(parse_rail(&row.faces)?)),
            "turnout" => Some(BlockState::Turnout(parse_turnout(&row.faces)?)),
            "solid"   => Some(BlockState::Solid),
            "sign"    => None,
            other => {
                return Err(WorldError::Parse(format!(
                    "row {}: unknown kind {other:?}: expected rail, turnout, solid, or sign",
                    line + 1
                )));
            }
        };

        match state {
            Some(state) => {
                world.set_block(key, Some(state))?;
                summary.blocks += 1;
            }
            None => {
                signs.place(key, row.text.split('|').map(str::trim));
                summary.signs += 1;
            }
        }
    }

    Ok(summary)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_face(s: &str) -> WorldResult<BlockFace> {
    s.parse().map_err(|e: tc_core::TrackError| WorldError::Parse(e.to_string()))
}

fn parse_rail(s: &str) -> WorldResult<RailShape> {
    let (a, b) = s
        .split_once('-')
        .ok_or_else(|| WorldError::Parse(format!("invalid rail faces {s:?}: expected \"a-b\"")))?;
    RailShape::new(parse_face(a)?, parse_face(b)?)
        .ok_or_else(|| WorldError::Parse(format!("rail {s:?} connects a face to itself")))
}

fn parse_turnout(s: &str) -> WorldResult<Turnout> {
    let invalid = || WorldError::Parse(format!("invalid turnout faces {s:?}: expected \"trunk:first+second\""));
    let (trunk, branches) = s.split_once(':').ok_or_else(invalid)?;
    let (first, second) = branches.split_once('+').ok_or_else(invalid)?;
    Turnout::new(parse_face(trunk)?, parse_face(first)?, parse_face(second)?).ok_or_else(invalid)
}
