//! `tc-world`: the host world as seen by the rail framework.
//!
//! Block storage, sign placement, and vehicle tracking belong to the host
//! simulation.  This crate defines the narrow traits the rail cache and the
//! junction switch consume, plus in-memory implementations used by tests,
//! fixtures, and the demo binaries.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`block`]    | `BlockState`, `RailShape`, `Turnout`                      |
//! | [`world`]    | `WorldAccess` trait, `MemoryWorld`                        |
//! | [`signs`]    | `SignRegistry` trait, `TrackedSign`, `SignBoard`          |
//! | [`vehicles`] | `VehicleRegistry` trait, `Vehicle`, `VehicleStore` (R-tree) |
//! | [`host`]     | `Host<W, S, V>` bundle, `MemoryHost`                      |
//! | [`loader`]   | CSV fixture loading                                       |
//! | [`error`]    | `WorldError`, `WorldResult<T>`, `RedirectFailure`         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `tc-core` types.        |

pub mod block;
pub mod error;
pub mod host;
pub mod loader;
pub mod signs;
pub mod vehicles;
pub mod world;


pub use block::{BlockState, RailShape, Turnout};
pub use error::{RedirectFailure, WorldError, WorldResult};
pub use host::{Host, MemoryHost};
pub use loader::{load_fixture_csv, load_fixture_reader, FixtureSummary};
pub use signs::{SignBoard, SignRegistry, TrackedSign};
pub use vehicles::{Vehicle, VehicleRegistry, VehicleStore};
pub use world::{MemoryWorld, WorldAccess};
