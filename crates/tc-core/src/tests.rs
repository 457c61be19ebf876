//! Unit tests for tc-core primitives.

#[cfg(test)]
mod ids {
    use crate::{SignId, VehicleId, WorldId};

    #[test]
    fn ordering() {
        assert!(VehicleId(0) < VehicleId(1));
        assert!(WorldId(100) > WorldId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(WorldId::INVALID.0, u32::MAX);
        assert_eq!(VehicleId::INVALID.0, u32::MAX);
        assert_eq!(SignId::default(), SignId::INVALID);
        assert!(!SignId::INVALID.is_valid());
        assert!(SignId(3).is_valid());
    }

    #[test]
    fn display() {
        assert_eq!(WorldId(7).to_string(), "WorldId(7)");
    }
}

#[cfg(test)]
mod geom {
    use crate::{BlockFace, BlockKey, BlockPos, ChunkPos, WorldId};

    #[test]
    fn opposite_is_an_involution() {
        for face in [
            BlockFace::North, BlockFace::East, BlockFace::South,
            BlockFace::West, BlockFace::Up, BlockFace::Down,
        ] {
            assert_eq!(face.opposite().opposite(), face);
            assert_ne!(face.opposite(), face);
        }
    }

    #[test]
    fn relative_follows_offset() {
        let p = BlockPos::new(10, 64, 20);
        assert_eq!(p.relative(BlockFace::North), BlockPos::new(10, 64, 19));
        assert_eq!(p.relative(BlockFace::East),  BlockPos::new(11, 64, 20));
        assert_eq!(p.relative(BlockFace::Down),  BlockPos::new(10, 63, 20));
        assert_eq!(p.below(2), BlockPos::new(10, 62, 20));
    }

    #[test]
    fn chunk_of_negative_coordinates() {
        assert_eq!(BlockPos::new(0, 0, 0).chunk(),    ChunkPos::new(0, 0));
        assert_eq!(BlockPos::new(15, 0, 15).chunk(),  ChunkPos::new(0, 0));
        assert_eq!(BlockPos::new(16, 0, -1).chunk(),  ChunkPos::new(1, -1));
        assert_eq!(BlockPos::new(-17, 0, -16).chunk(), ChunkPos::new(-2, -1));
    }

    #[test]
    fn containing_floors_each_axis() {
        assert_eq!(BlockPos::containing([10.5, 64.0, 20.9]), BlockPos::new(10, 64, 20));
        assert_eq!(BlockPos::containing([-0.5, 64.2, -3.0]), BlockPos::new(-1, 64, -3));
    }

    #[test]
    fn rail_center_is_inside_block() {
        let p = BlockPos::new(-4, 70, 9);
        assert_eq!(BlockPos::containing(p.rail_center()), p);
    }

    #[test]
    fn rail_center_is_exact_far_from_origin() {
        for p in [
            BlockPos::new(8_388_609, 64, 0),
            BlockPos::new(-8_388_609, 64, 16_777_217),
            BlockPos::new(29_999_999, 64, -30_000_000),
            BlockPos::new(i32::MAX, 0, i32::MIN),
        ] {
            assert_eq!(BlockPos::containing(p.rail_center()), p, "{p}");
        }
    }

    #[test]
    fn parse_faces() {
        assert_eq!("North".parse::<BlockFace>().unwrap(), BlockFace::North);
        assert_eq!(" w ".parse::<BlockFace>().unwrap(), BlockFace::West);
        assert!("sideways".parse::<BlockFace>().is_err());
    }

    #[test]
    fn key_display() {
        let k = BlockKey::at(WorldId(1), 10, 64, 20);
        assert_eq!(k.to_string(), "10/64/20@WorldId(1)");
    }
}

#[cfg(test)]
mod config {
    use crate::{TrackConfig, TrackError};

    #[test]
    fn defaults_validate() {
        let cfg = TrackConfig::default();
        assert_eq!(cfg.sign_search_depth, 2);
        assert!(cfg.relocate_on_switch);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_depth_rejected() {
        let cfg = TrackConfig { sign_search_depth: 0, ..TrackConfig::default() };
        assert!(matches!(cfg.validate(), Err(TrackError::Config(_))));
    }

    #[test]
    fn excessive_depth_rejected() {
        let cfg = TrackConfig { sign_search_depth: 9, ..TrackConfig::default() };
        assert!(cfg.validate().is_err());
    }
}
