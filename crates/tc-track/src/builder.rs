//! Fluent builder for constructing a [`TrackSystem`].

use tc_cache::SegmentCache;
use tc_core::{TrackConfig, TrackResult};
use tc_rail::{RailType, RailTypeRegistry};
use tc_world::Host;

use crate::TrackSystem;

/// Fluent builder for [`TrackSystem<W, S, V>`].
///
/// # Required inputs
///
/// - [`Host`]: the world, sign, and vehicle collaborators
///
/// # Optional inputs (have defaults)
///
/// | Method             | Default                                  |
/// |--------------------|------------------------------------------|
/// | `.config(c)`       | `TrackConfig::default()`                 |
/// | `.rails(r)`        | `RailTypeRegistry::with_defaults()`      |
/// | `.rail_type(t)`    | (none; adds `t` to the registry)         |
///
/// # Example
///
/// ```rust,ignore
/// let mut track = TrackSystemBuilder::new(MemoryHost::default())
///     .config(TrackConfig { sign_search_depth: 3, ..Default::default() })
///     .rail_type(Platform)
///     .build()?;
/// let seg = track.segment_at(BlockKey::at(world, 0, 64, 0))?;
/// ```
pub struct TrackSystemBuilder<W, S, V> {
    host:   Host<W, S, V>,
    config: TrackConfig,
    rails:  RailTypeRegistry,
}

impl<W, S, V> TrackSystemBuilder<W, S, V> {
    pub fn new(host: Host<W, S, V>) -> Self {
        Self {
            host,
            config: TrackConfig::default(),
            rails:  RailTypeRegistry::with_defaults(),
        }
    }

    pub fn config(mut self, config: TrackConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the rail-type registry, including the built-in types.
    pub fn rails(mut self, rails: RailTypeRegistry) -> Self {
        self.rails = rails;
        self
    }

    /// Register an additional rail type.  Later registrations win when more
    /// than one type claims a block.
    pub fn rail_type<T: RailType>(mut self, rail_type: T) -> Self {
        self.rails.register(rail_type);
        self
    }

    /// Validate the configuration and return a ready [`TrackSystem`] with an
    /// empty cache.
    pub fn build(self) -> TrackResult<TrackSystem<W, S, V>> {
        self.config.validate()?;
        Ok(TrackSystem {
            cache:  SegmentCache::new(&self.config),
            config: self.config,
            rails:  self.rails,
            host:   self.host,
        })
    }
}
