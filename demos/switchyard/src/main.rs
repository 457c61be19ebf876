//! switchyard: a small yard driven through the trackcache rail framework.
//!
//! Loads a yard from CSV (the embedded one, or a path given as the first
//! argument), parks a few vehicles on the throat turnout, reads the station
//! signs through the segment cache, then throws the turnout and reports
//! which vehicles were steered onto the new route.
//!
//! Set `RUST_LOG=tc_cache=debug,tc_track=debug` to watch cache rescans and
//! per-vehicle steering.

use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tc_core::{BlockFace, BlockKey, TrackConfig, WorldId};
use tc_rail::Junction;
use tc_track::{MemoryTrackSystem, TrackSystemBuilder};
use tc_world::{MemoryHost, load_fixture_csv, load_fixture_reader};

// ── Constants ─────────────────────────────────────────────────────────────────

const YARD:   WorldId  = WorldId(0);
const THROAT: BlockKey = BlockKey::at(YARD, 0, 64, 0);

// ── Yard CSV ──────────────────────────────────────────────────────────────────

// Throat turnout at the origin: trunk south, main line north, siding east.
// Station signs hang under the first main-line and siding blocks.
const YARD_CSV: &str = "\
world,x,y,z,kind,faces,text\n\
0,0,64,0,turnout,south:north+east,\n\
0,0,64,1,rail,north-south,\n\
0,0,64,2,rail,north-south,\n\
0,0,64,-1,rail,north-south,\n\
0,0,63,-1,sign,,[station]|Main Line\n\
0,1,64,0,rail,east-west,\n\
0,2,64,0,rail,east-west,\n\
0,1,63,0,sign,,[station]|Siding\n\
0,1,62,0,sign,,[brake]|0.2\n\
";

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // 1. Load the yard into an in-memory host.
    let mut host = MemoryHost::default();
    let summary = match std::env::args().nth(1) {
        Some(path) => load_fixture_csv(Path::new(&path), &mut host.world, &mut host.signs)
            .with_context(|| format!("loading yard from {path}"))?,
        None => load_fixture_reader(Cursor::new(YARD_CSV), &mut host.world, &mut host.signs)?,
    };
    info!(blocks = summary.blocks, signs = summary.signs, "yard loaded");

    // 2. Build the track system.
    let config = TrackConfig { sign_search_depth: 3, ..TrackConfig::default() };
    let mut track: MemoryTrackSystem = TrackSystemBuilder::new(host).config(config).build()?;

    // 3. Park vehicles on the throat: one departing north, one arriving from
    //    the north, one crossing.
    let centre = THROAT.pos.rail_center();
    let departing = track.spawn_vehicle(YARD, centre, BlockFace::North, 0.3);
    let arriving = track.spawn_vehicle(YARD, centre, BlockFace::South, 0.3);
    let parked = track.spawn_vehicle(YARD, centre, BlockFace::West, 0.0);

    // 4. Inspect the throat and its neighbours through the cache.
    let throat = track.segment_at(THROAT)?;
    let junctions: Vec<String> = track.junctions(throat)?.iter().map(ToString::to_string).collect();
    println!("Throat {throat}: junctions [{}]", junctions.join(", "));
    println!("  block-activated: {}", track.has_block_activation(throat)?);
    println!("  occupants: {:?}", track.occupants(throat)?);

    for (label, face) in [("main line", BlockFace::North), ("siding", BlockFace::East)] {
        let seg = track.segment_at(THROAT.relative(face))?;
        let signs: Vec<String> = track.signs(seg)?.iter().map(|s| s.lines.join(" / ")).collect();
        println!("  {label:<9} {seg}: {signs:?}");
    }
    println!();

    // 5. Throw the turnout onto the siding.
    let outcome = track.switch_junction(
        throat,
        &Junction::facing(BlockFace::North),
        &Junction::facing(BlockFace::East),
    )?;

    println!("{:<12} {:<10} {:<10}", "Vehicle", "Heading", "Result");
    println!("{}", "-".repeat(34));
    for id in [departing, arriving, parked] {
        let heading = track.host.vehicles.get(id).map_or("gone", |v| v.heading.as_str());
        let result = if outcome.redirected.contains(&id) {
            "redirected".to_owned()
        } else if let Some((_, reason)) = outcome.failed.iter().find(|(v, _)| *v == id) {
            format!("failed: {reason}")
        } else {
            "untouched".to_owned()
        };
        println!("{:<12} {:<10} {}", id.to_string(), heading, result);
    }

    let stats = track.cache.stats();
    println!();
    println!("Cache: {} entries, {} hits, {} rescans", track.cache.len(), stats.hits, stats.rescans);
    Ok(())
}
