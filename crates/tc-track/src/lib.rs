//! `tc-track`: junction switching on top of the segment cache.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`switcher`] | `switch_junction`: validate, snapshot, switch, steer         |
//! | [`system`]   | `TrackSystem`: rails + cache + host, with notification hooks |
//! | [`builder`]  | `TrackSystemBuilder`                                          |
//! | [`error`]    | `SwitchError`, `SwitchResult<T>`                              |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use tc_core::{BlockFace, BlockKey, WorldId};
//! use tc_rail::Junction;
//! use tc_track::TrackSystemBuilder;
//! use tc_world::MemoryHost;
//!
//! let mut track = TrackSystemBuilder::new(MemoryHost::default()).build()?;
//! let world = WorldId(0);
//! track.load_world(world);
//! // ... place rails, spawn vehicles ...
//! let seg = track.segment_at(BlockKey::at(world, 0, 64, 0))?;
//! let outcome = track.switch_junction(
//!     seg,
//!     &Junction::facing(BlockFace::North),
//!     &Junction::facing(BlockFace::East),
//! )?;
//! ```

pub mod builder;
pub mod error;
pub mod switcher;
pub mod system;

#[cfg(test)]
mod tests;

pub use builder::TrackSystemBuilder;
pub use error::{SwitchError, SwitchResult};
pub use switcher::{switch_junction, SwitchOutcome};
pub use system::{MemoryTrackSystem, TrackSystem};
