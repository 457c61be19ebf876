//! Framework error type.
//!
//! Sub-crates define their own error enums (`WorldError`, `RailError`,
//! `SwitchError`) and wrap lower-level errors via `#[from]`.  `TrackError`
//! covers what is shared: configuration and parsing.

use thiserror::Error;

/// The top-level error type for `tc-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum TrackError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `tc-core`.
pub type TrackResult<T> = Result<T, TrackError>;
