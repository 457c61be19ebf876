use tc_rail::{RailError, SegmentId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SwitchError {
    /// A requested junction is not one the segment exposes.  Nothing was
    /// changed.
    #[error("junction {junction:?} is not a junction of segment {segment}")]
    UnknownJunction {
        junction: String,
        segment:  SegmentId,
    },

    #[error("rail error: {0}")]
    Rail(#[from] RailError),
}

pub type SwitchResult<T> = Result<T, SwitchError>;
