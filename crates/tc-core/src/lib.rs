//! `tc-core`: foundational types for the `trackcache` rail framework.
//!
//! This crate is a dependency of every other `tc-*` crate.  It has no `tc-*`
//! dependencies and a single required external one (`thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`ids`]    | `WorldId`, `VehicleId`, `SignId`                          |
//! | [`geom`]   | `BlockPos`, `BlockKey`, `ChunkPos`, `BlockFace`           |
//! | [`config`] | `TrackConfig`                                             |
//! | [`error`]  | `TrackError`, `TrackResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geom;
pub mod ids;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::TrackConfig;
pub use error::{TrackError, TrackResult};
pub use geom::{BlockFace, BlockKey, BlockPos, ChunkPos};
pub use ids::{SignId, VehicleId, WorldId};
