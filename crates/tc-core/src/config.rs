//! Framework configuration.

use crate::{TrackError, TrackResult};

/// Deepest sign search the framework accepts.  Signs further below a rail
/// than this are never considered attached.
pub const MAX_SIGN_SEARCH_DEPTH: u8 = 8;

/// Top-level configuration for the rail cache and junction switching.
///
/// Typically loaded from a TOML/JSON file by the host application (enable the
/// `serde` feature) and passed to `TrackSystemBuilder`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TrackConfig {
    /// How many blocks below a rail block a sign may sit and still be
    /// attached to that rail.  Default: 2.
    pub sign_search_depth: u8,

    /// Re-aim vehicles standing on a segment when its junction is switched.
    /// When `false` only track connectivity changes.  Default: `true`.
    pub relocate_on_switch: bool,

    /// Number of segments the cache pre-allocates room for.  Default: 256.
    pub initial_cache_capacity: usize,
}

impl TrackConfig {
    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::Config`] if `sign_search_depth` is zero or above
    /// [`MAX_SIGN_SEARCH_DEPTH`].
    pub fn validate(&self) -> TrackResult<()> {
        if self.sign_search_depth == 0 || self.sign_search_depth > MAX_SIGN_SEARCH_DEPTH {
            return Err(TrackError::Config(format!(
                "sign_search_depth must be in 1..={MAX_SIGN_SEARCH_DEPTH}, got {}",
                self.sign_search_depth
            )));
        }
        Ok(())
    }
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            sign_search_depth:      2,
            relocate_on_switch:     true,
            initial_cache_capacity: 256,
        }
    }
}
