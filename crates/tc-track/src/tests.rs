//! Integration tests for tc-track.

use tc_core::{BlockFace, BlockKey, TrackConfig, VehicleId, WorldId};
use tc_rail::{Junction, RailType, SegmentId};
use tc_world::{BlockState, MemoryHost, RailShape, RedirectFailure, Turnout, VehicleRegistry, WorldAccess};

use crate::{MemoryTrackSystem, TrackSystemBuilder};

// ── Helpers ───────────────────────────────────────────────────────────────────

const W: WorldId = WorldId(0);

fn key(x: i32, y: i32, z: i32) -> BlockKey {
    BlockKey::at(W, x, y, z)
}

fn north() -> Junction {
    Junction::facing(BlockFace::North)
}

fn east() -> Junction {
    Junction::facing(BlockFace::East)
}

fn system_with(config: TrackConfig) -> MemoryTrackSystem {
    let mut track = TrackSystemBuilder::new(MemoryHost::default())
        .config(config)
        .build()
        .unwrap();
    track.load_world(W);
    track
}

/// World 0 with a turnout at (0,64,0) (trunk south, branches north/east,
/// north active) and a straight north–south rail at (10,64,20).
fn yard() -> MemoryTrackSystem {
    yard_with(TrackConfig::default())
}

fn yard_with(config: TrackConfig) -> MemoryTrackSystem {
    let mut track = system_with(config);
    let turnout = Turnout::new(BlockFace::South, BlockFace::North, BlockFace::East).unwrap();
    track.set_block(key(0, 64, 0), Some(BlockState::Turnout(turnout))).unwrap();
    track
        .set_block(key(10, 64, 20), Some(BlockState::Rail(RailShape::north_south())))
        .unwrap();
    track
}

fn spawn_on(track: &mut MemoryTrackSystem, k: BlockKey, heading: BlockFace) -> VehicleId {
    track.spawn_vehicle(k.world, k.pos.rail_center(), heading, 0.4)
}

fn heading(track: &MemoryTrackSystem, v: VehicleId) -> BlockFace {
    track.host.vehicles.heading(v).unwrap()
}

fn turnout_at(track: &MemoryTrackSystem, k: BlockKey) -> Turnout {
    match track.host.world.block(k) {
        Some(BlockState::Turnout(t)) => t,
        other => panic!("expected a turnout, found {other:?}"),
    }
}

// ── Switching ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod switching {
    use super::*;
    use tc_cache::CacheEntry;

    #[test]
    fn turnout_switch_steers_aligned_vehicles() {
        let mut track = yard();
        let at = key(0, 64, 0);
        let outbound = spawn_on(&mut track, at, BlockFace::North);
        let crossing = spawn_on(&mut track, at, BlockFace::West);
        let inbound = spawn_on(&mut track, at, BlockFace::South);
        let seg = track.segment_at(at).unwrap();

        let outcome = track.switch_junction(seg, &north(), &east()).unwrap();

        assert_eq!(outcome.redirected, vec![outbound, inbound]);
        assert_eq!(outcome.untouched, vec![crossing]);
        assert!(outcome.is_clean());

        assert_eq!(heading(&track, outbound), BlockFace::East);
        assert_eq!(heading(&track, crossing), BlockFace::West);
        // Came in through north; now treated as coming in through east,
        // which still leads to the trunk.
        assert_eq!(heading(&track, inbound), BlockFace::South);

        let turnout = turnout_at(&track, at);
        assert_eq!(turnout.active(), BlockFace::East);
        assert_eq!(turnout.trunk(), BlockFace::South);
        assert_eq!(track.rails.connected_end(&track.host.world, seg, &east()).unwrap(), Some(BlockFace::South));
    }

    #[test]
    fn plain_rail_switch_bends_the_track() {
        let mut track = yard();
        let at = key(10, 64, 20);
        let outbound = spawn_on(&mut track, at, BlockFace::North);
        let inbound = spawn_on(&mut track, at, BlockFace::South);
        let seg = track.segment_at(at).unwrap();

        let outcome = track.switch_junction(seg, &north(), &east()).unwrap();
        assert_eq!(outcome.redirected, vec![outbound, inbound]);
        assert_eq!(heading(&track, outbound), BlockFace::East);
        assert_eq!(heading(&track, inbound), BlockFace::South);
        assert_eq!(
            track.host.world.block(at),
            Some(BlockState::Rail(RailShape::new(BlockFace::South, BlockFace::East).unwrap()))
        );
    }

    #[test]
    fn far_turnout_steers_its_vehicles() {
        let mut track = yard();
        let at = key(8_388_609, 64, -8_388_609);
        let turnout = Turnout::new(BlockFace::South, BlockFace::North, BlockFace::East).unwrap();
        track.set_block(at, Some(BlockState::Turnout(turnout))).unwrap();
        let v = spawn_on(&mut track, at, BlockFace::North);
        let seg = track.segment_at(at).unwrap();
        assert_eq!(track.occupants(seg).unwrap(), &[v]);

        let outcome = track.switch_junction(seg, &north(), &east()).unwrap();
        assert_eq!(outcome.redirected, vec![v]);
        assert_eq!(heading(&track, v), BlockFace::East);
        assert_eq!(track.host.vehicles.get(v).unwrap().block(), at);
        assert_eq!(track.occupants(seg).unwrap(), &[v]);
    }

    #[test]
    fn unknown_junction_changes_nothing() {
        let mut track = yard();
        let at = key(0, 64, 0);
        let v = spawn_on(&mut track, at, BlockFace::North);
        let seg = track.segment_at(at).unwrap();
        let before = track.junctions(seg).unwrap();

        let up = Junction::new("up", BlockFace::Up);
        let err = track.switch_junction(seg, &north(), &up).unwrap_err();
        match err {
            crate::SwitchError::UnknownJunction { junction, segment } => {
                assert_eq!(junction, "up");
                assert_eq!(segment, seg);
            }
            other => panic!("unexpected error {other}"),
        }

        assert_eq!(track.junctions(seg).unwrap(), before);
        assert_eq!(turnout_at(&track, at).active(), BlockFace::North);
        assert_eq!(heading(&track, v), BlockFace::North);
        assert!(matches!(track.cache.peek(&track.host.world, seg), CacheEntry::Unresolved));
    }

    #[test]
    fn unknown_source_junction_is_named() {
        let mut track = yard();
        let seg = track.segment_at(key(0, 64, 0)).unwrap();
        let south = Junction::facing(BlockFace::South);
        let err = track.switch_junction(seg, &south, &east()).unwrap_err();
        assert!(matches!(err, crate::SwitchError::UnknownJunction { ref junction, .. } if junction == "south"));
    }

    #[test]
    fn switch_without_relocation_leaves_vehicles() {
        let mut track = yard_with(TrackConfig { relocate_on_switch: false, ..TrackConfig::default() });
        let at = key(0, 64, 0);
        let v = spawn_on(&mut track, at, BlockFace::North);
        let seg = track.segment_at(at).unwrap();

        let outcome = track.switch_junction(seg, &north(), &east()).unwrap();
        assert!(outcome.redirected.is_empty());
        assert!(outcome.untouched.is_empty());
        assert_eq!(heading(&track, v), BlockFace::North);
        assert_eq!(turnout_at(&track, at).active(), BlockFace::East);
    }

    #[test]
    fn reversal_is_reported_but_switch_commits() {
        let mut track = yard();
        let at = key(30, 64, 30);
        let turnout = Turnout::new(BlockFace::East, BlockFace::North, BlockFace::South).unwrap();
        track.set_block(at, Some(BlockState::Turnout(turnout))).unwrap();
        let v = spawn_on(&mut track, at, BlockFace::North);
        let seg = track.segment_at(at).unwrap();
        let south = Junction::facing(BlockFace::South);

        let outcome = track.switch_junction(seg, &north(), &south).unwrap();
        assert_eq!(
            outcome.failed,
            vec![(v, RedirectFailure::Reversal { vehicle: v, heading: BlockFace::South })]
        );
        assert!(!outcome.is_clean());
        assert_eq!(heading(&track, v), BlockFace::North);
        assert_eq!(turnout_at(&track, at).active(), BlockFace::South);
    }

    #[test]
    fn switch_invalidates_the_segment() {
        let mut track = yard();
        let at = key(0, 64, 0);
        spawn_on(&mut track, at, BlockFace::North);
        let seg = track.segment_at(at).unwrap();
        assert_eq!(track.occupants(seg).unwrap().len(), 1);
        assert!(track.cache.peek(&track.host.world, seg).is_valid());

        track.switch_junction(seg, &north(), &east()).unwrap();
        assert!(matches!(track.cache.peek(&track.host.world, seg), CacheEntry::Stale(_)));
        assert_eq!(track.occupants(seg).unwrap().len(), 1);
    }

    #[test]
    fn non_rail_segment_exposes_no_junctions() {
        let mut track = yard();
        let seg = track.segment_at(key(3, 64, 3)).unwrap();
        assert!(seg.is_none_type());
        assert!(track.junctions(seg).unwrap().is_empty());
        assert!(track.switch_junction(seg, &north(), &east()).is_err());
    }
}

// ── Dead ends ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod dead_end {
    use super::*;
    use tc_cache::CacheEntry;
    use tc_rail::RailError;
    use tc_world::{Host, MemoryWorld, SignBoard, VehicleStore, WorldResult};

    /// Solid blocks as buffer stops: traffic entering north leaves south,
    /// nothing else leads anywhere, and switching is accepted but inert.
    struct Buffer;

    impl RailType for Buffer {
        fn name(&self) -> &str {
            "buffer"
        }

        fn claims(&self, world: &dyn WorldAccess, key: BlockKey) -> bool {
            world.block(key) == Some(BlockState::Solid)
        }

        fn junctions(&self, _: &dyn WorldAccess, _: BlockKey) -> Vec<Junction> {
            vec![north(), east()]
        }

        fn connected_end(&self, _: &dyn WorldAccess, _: BlockKey, junction: &Junction) -> Option<BlockFace> {
            (junction.face() == BlockFace::North).then_some(BlockFace::South)
        }

        fn switch_junction(
            &self,
            _world: &mut dyn WorldAccess,
            _key:   BlockKey,
            _from:  &Junction,
            _to:    &Junction,
        ) -> Result<(), RailError> {
            Ok(())
        }
    }

    #[test]
    fn through_vehicle_with_no_way_out_fails_alone() {
        let mut track = TrackSystemBuilder::new(MemoryHost::default())
            .rail_type(Buffer)
            .build()
            .unwrap();
        track.load_world(W);
        let at = key(0, 64, 0);
        track.set_block(at, Some(BlockState::Solid)).unwrap();
        let inbound = spawn_on(&mut track, at, BlockFace::South);
        let outbound = spawn_on(&mut track, at, BlockFace::North);

        let seg = track.segment_at(at).unwrap();
        assert_eq!(track.rails.name(seg.rail_type()), Some("buffer"));

        let outcome = track.switch_junction(seg, &north(), &east()).unwrap();
        assert_eq!(outcome.failed, vec![(inbound, RedirectFailure::NoPath { vehicle: inbound })]);
        assert_eq!(outcome.redirected, vec![outbound]);
        assert_eq!(heading(&track, outbound), BlockFace::East);
    }

    /// A world that stops answering once a block is cleared, until told
    /// otherwise.  Generations are preserved across the blackout.
    #[derive(Default)]
    struct Flickering {
        inner:    MemoryWorld,
        blackout: bool,
    }

    impl WorldAccess for Flickering {
        fn generation(&self, world: WorldId) -> Option<u64> {
            if self.blackout { None } else { self.inner.generation(world) }
        }

        fn block(&self, key: BlockKey) -> Option<BlockState> {
            self.inner.block(key)
        }

        fn set_block(&mut self, key: BlockKey, state: Option<BlockState>) -> WorldResult<()> {
            self.inner.set_block(key, state)?;
            self.blackout |= state.is_none();
            Ok(())
        }
    }

    /// Like [`Buffer`], but switching tears the block out.
    struct Scuttle;

    impl RailType for Scuttle {
        fn name(&self) -> &str {
            "scuttle"
        }

        fn claims(&self, world: &dyn WorldAccess, key: BlockKey) -> bool {
            world.block(key) == Some(BlockState::Solid)
        }

        fn junctions(&self, _: &dyn WorldAccess, _: BlockKey) -> Vec<Junction> {
            vec![north(), east()]
        }

        fn connected_end(&self, _: &dyn WorldAccess, _: BlockKey, junction: &Junction) -> Option<BlockFace> {
            (junction.face() == BlockFace::North).then_some(BlockFace::South)
        }

        fn switch_junction(
            &self,
            world: &mut dyn WorldAccess,
            key:   BlockKey,
            _from: &Junction,
            _to:   &Junction,
        ) -> Result<(), RailError> {
            world.set_block(key, None)?;
            Ok(())
        }
    }

    #[test]
    fn lookup_failure_after_commit_strands_only_through_traffic() {
        let host = Host::new(Flickering::default(), SignBoard::default(), VehicleStore::default());
        let mut track = TrackSystemBuilder::new(host).rail_type(Scuttle).build().unwrap();
        track.host.world.inner.load_world(W);
        let at = key(0, 64, 0);
        track.host.world.set_block(at, Some(BlockState::Solid)).unwrap();
        let centre = at.pos.rail_center();
        let inbound = track.host.vehicles.spawn(W, centre, BlockFace::South, 0.0);
        let outbound = track.host.vehicles.spawn(W, centre, BlockFace::North, 0.0);
        track.on_vehicle_moved(None, Some(at));

        let seg = track.segment_at(at).unwrap();
        assert_eq!(track.occupants(seg).unwrap(), &[inbound, outbound]);

        let outcome = track.switch_junction(seg, &north(), &east()).unwrap();
        assert_eq!(outcome.failed, vec![(inbound, RedirectFailure::NoPath { vehicle: inbound })]);
        assert_eq!(outcome.redirected, vec![outbound]);
        assert_eq!(track.host.vehicles.heading(outbound), Some(BlockFace::East));

        // Same generation once the world answers again; only the switch's
        // own invalidation can make the entry stale.
        track.host.world.blackout = false;
        assert!(matches!(track.cache.peek(&track.host.world, seg), CacheEntry::Stale(_)));
    }
}

// ── Notifications ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod notifications {
    use super::*;
    use tc_core::BlockPos;
    use tc_rail::RailError;

    fn rail_segment(track: &MemoryTrackSystem) -> SegmentId {
        track.segment_at(key(10, 64, 20)).unwrap()
    }

    #[test]
    fn bare_rail_reads_empty() {
        let mut track = yard();
        let seg = rail_segment(&track);
        assert!(track.signs(seg).unwrap().is_empty());
        assert!(track.occupants(seg).unwrap().is_empty());
    }

    #[test]
    fn sign_placement_reaches_the_rail_above() {
        let mut track = yard();
        let seg = rail_segment(&track);
        assert!(track.signs(seg).unwrap().is_empty());

        track.place_sign(key(10, 63, 20), ["[station]", "Alder Cross"]);
        let signs = track.signs(seg).unwrap();
        assert_eq!(signs.len(), 1);
        assert_eq!(signs[0].line(1), "Alder Cross");

        // Second sign further down, still within the default depth of 2.
        track.place_sign(key(10, 62, 20), ["[brake]"]);
        assert_eq!(track.signs(seg).unwrap().len(), 2);

        track.break_sign(key(10, 63, 20)).unwrap();
        assert!(track.signs(seg).unwrap().is_empty(), "lower sign is detached");
    }

    #[test]
    fn vehicle_moves_update_both_blocks() {
        let mut track = yard();
        track
            .set_block(key(10, 64, 21), Some(BlockState::Rail(RailShape::north_south())))
            .unwrap();
        let here = rail_segment(&track);
        let there = track.segment_at(key(10, 64, 21)).unwrap();
        assert!(track.occupants(here).unwrap().is_empty());
        assert!(track.occupants(there).unwrap().is_empty());

        let v = spawn_on(&mut track, key(10, 64, 20), BlockFace::South);
        assert_eq!(track.occupants(here).unwrap(), &[v]);

        assert!(track.move_vehicle(v, key(10, 64, 21).pos.rail_center()));
        assert!(track.occupants(here).unwrap().is_empty());
        assert_eq!(track.occupants(there).unwrap(), &[v]);

        track.despawn_vehicle(v).unwrap();
        assert!(track.occupants(there).unwrap().is_empty());
        assert!(!track.move_vehicle(v, [0.0, 0.0, 0.0]));
    }

    #[test]
    fn block_change_retypes_the_location() {
        let mut track = yard();
        let at = key(10, 64, 20);
        let turnout = Turnout::new(BlockFace::South, BlockFace::North, BlockFace::West).unwrap();
        track.set_block(at, Some(BlockState::Turnout(turnout))).unwrap();
        let seg = track.segment_at(at).unwrap();
        assert_eq!(track.rails.name(seg.rail_type()), Some("turnout"));
        assert!(track.has_block_activation(seg).unwrap());
    }

    #[test]
    fn world_unload_and_reload() {
        let mut track = yard();
        let seg = rail_segment(&track);
        spawn_on(&mut track, key(10, 64, 20), BlockFace::North);
        assert_eq!(track.occupants(seg).unwrap().len(), 1);

        assert_eq!(track.unload_world(W), 1);
        assert!(matches!(track.occupants(seg), Err(RailError::WorldNotLoaded(_))));

        track.load_world(W);
        // Blocks survive; vehicles went with the world.
        assert!(track.occupants(seg).unwrap().is_empty());
        assert_eq!(track.segment_at(key(10, 64, 20)).unwrap(), seg);
    }

    #[test]
    fn chunk_unload_drops_only_that_chunk() {
        let mut track = yard();
        let near = track.segment_at(key(0, 64, 0)).unwrap();
        let far = rail_segment(&track);
        track.occupants(near).unwrap();
        track.occupants(far).unwrap();

        assert_eq!(track.on_chunk_unloaded(W, BlockPos::new(0, 64, 0).chunk()), 1);
        assert!(track.cache.peek(&track.host.world, far).is_valid());
    }

    #[test]
    fn occupant_edits_last_until_the_next_event() {
        let mut track = yard();
        let seg = rail_segment(&track);
        let v = spawn_on(&mut track, key(10, 64, 20), BlockFace::North);
        track.occupants_mut(seg).unwrap().retain(|&o| o != v);
        assert!(track.occupants(seg).unwrap().is_empty());

        track.on_vehicle_moved(None, Some(key(10, 64, 20)));
        assert_eq!(track.occupants(seg).unwrap(), &[v]);
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_with_defaults() {
        let track = TrackSystemBuilder::new(MemoryHost::default()).build().unwrap();
        assert!(track.cache.is_empty());
        assert_eq!(track.cache.sign_search_depth(), 2);
        assert_eq!(track.rails.len(), 3);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = TrackConfig { sign_search_depth: 0, ..TrackConfig::default() };
        let result = TrackSystemBuilder::new(MemoryHost::default()).config(config).build();
        assert!(result.is_err());
    }

    #[test]
    fn deeper_search_reaches_lower_signs() {
        let mut track = system_with(TrackConfig { sign_search_depth: 3, ..TrackConfig::default() });
        let at = key(0, 64, 0);
        track.set_block(at, Some(BlockState::Rail(RailShape::east_west()))).unwrap();
        for y in [61, 62, 63] {
            track.place_sign(key(0, y, 0), [format!("y{y}")]);
        }
        let seg = track.segment_at(at).unwrap();
        let lines: Vec<&str> = track.signs(seg).unwrap().iter().map(|s| s.line(0)).collect();
        assert_eq!(lines, ["y63", "y62", "y61"]);
    }

    #[test]
    fn sign_hooks_follow_the_cache_depth() {
        let mut track = system_with(TrackConfig { sign_search_depth: 3, ..TrackConfig::default() });
        let at = key(0, 64, 0);
        track.set_block(at, Some(BlockState::Rail(RailShape::east_west()))).unwrap();
        let seg = track.segment_at(at).unwrap();
        assert!(track.signs(seg).unwrap().is_empty());

        // Shrinking the config after build changes neither the scan depth
        // nor the range a sign change invalidates.
        track.config.sign_search_depth = 1;
        track.place_sign(key(0, 61, 0), ["[deep]"]);
        let lines: Vec<&str> = track.signs(seg).unwrap().iter().map(|s| s.line(0)).collect();
        assert_eq!(lines, ["[deep]"]);

        track.break_sign(key(0, 61, 0)).unwrap();
        assert!(track.signs(seg).unwrap().is_empty());
    }
}
