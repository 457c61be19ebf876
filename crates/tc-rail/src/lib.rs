//! `tc-rail`: what a rail segment *is*.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`segment`]  | `SegmentId`: value identity of one rail segment            |
//! | [`kind`]     | `RailTypeId`, `Junction`, the `RailType` capability trait   |
//! | [`kinds`]    | Built-in rail types: `NoneRail`, `PlainRail`, `TurnoutRail` |
//! | [`registry`] | `RailTypeRegistry`: type inference and dispatch            |
//! | [`error`]    | `RailError`, `RailResult<T>`                                |
//!
//! # Identity
//!
//! A [`SegmentId`] is a plain `Copy` value: world, block coordinate, and rail
//! type.  It holds no cached data.  Everything derived from a segment (signs,
//! occupants) lives in `tc-cache`, keyed by the identity, so two copies of
//! the same identity can never disagree about what is on the segment.

pub mod error;
pub mod kind;
pub mod kinds;
pub mod registry;
pub mod segment;


pub use error::{RailError, RailResult};
pub use kind::{Junction, RailType, RailTypeId};
pub use kinds::{NoneRail, PlainRail, TurnoutRail};
pub use registry::RailTypeRegistry;
pub use segment::SegmentId;
