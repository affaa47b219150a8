use thiserror::Error;

use crate::models::BoatType;

/// Errors raised by lineup and heat mutations.
///
/// These all indicate a caller bug (a coordinate the UI should never have
/// produced). Refused placements are not errors; they come back as `Ok(false)`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineupError {
    #[error("Invalid seat: row {row}, column {col}")]
    InvalidCoordinate { row: usize, col: usize },

    #[error("Heat {0} does not exist")]
    UnknownHeat(usize),

    #[error("Lineup for {found} boat cannot be used in a {expected} boat")]
    BoatTypeMismatch { expected: BoatType, found: BoatType },

    #[error("Lineup has {found} rows but this boat's heats have {expected}")]
    ShapeMismatch { expected: usize, found: usize },
}

pub type Result<T> = std::result::Result<T, LineupError>;
