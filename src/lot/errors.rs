//! Lot structure errors
//!
//! Error codes:
//! - PARK_LOT_NO_FLOORS
//! - PARK_LOT_EMPTY_FLOOR_ID
//! - PARK_LOT_DUPLICATE_FLOOR
//! - PARK_LOT_UNKNOWN_FLOOR
//! - PARK_LOT_EMPTY_SPOT_ID
//! - PARK_LOT_DUPLICATE_SPOT
//! - PARK_LOT_SPOT_OCCUPIED
//! - PARK_LOT_SPOT_VACANT
//! - PARK_LOT_BAD_HANDLE

use thiserror::Error;

/// Result type for lot operations
pub type LotResult<T> = Result<T, LotError>;

/// Errors raised by spots, floors and layout validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LotError {
    // ==================
    // Layout Errors
    // ==================
    #[error("Facility layout has no floors")]
    NoFloors,

    #[error("Floor id must not be empty")]
    EmptyFloorId,

    #[error("Duplicate floor id: {0}")]
    DuplicateFloor(String),

    #[error("Unknown floor: {0}")]
    UnknownFloor(String),

    #[error("Spot id must not be empty (floor {floor_id})")]
    EmptySpotId { floor_id: String },

    #[error("Duplicate spot id {spot_id} on floor {floor_id}")]
    DuplicateSpot { floor_id: String, spot_id: String },

    // ==================
    // Occupancy Errors
    // ==================
    #[error("Spot {0} is already occupied")]
    SpotOccupied(String),

    #[error("Spot {0} is not occupied")]
    SpotVacant(String),

    #[error("No spot at floor index {floor}, spot index {index}")]
    BadHandle { floor: usize, index: usize },
}

impl LotError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            LotError::NoFloors => "PARK_LOT_NO_FLOORS",
            LotError::EmptyFloorId => "PARK_LOT_EMPTY_FLOOR_ID",
            LotError::DuplicateFloor(_) => "PARK_LOT_DUPLICATE_FLOOR",
            LotError::UnknownFloor(_) => "PARK_LOT_UNKNOWN_FLOOR",
            LotError::EmptySpotId { .. } => "PARK_LOT_EMPTY_SPOT_ID",
            LotError::DuplicateSpot { .. } => "PARK_LOT_DUPLICATE_SPOT",
            LotError::SpotOccupied(_) => "PARK_LOT_SPOT_OCCUPIED",
            LotError::SpotVacant(_) => "PARK_LOT_SPOT_VACANT",
            LotError::BadHandle { .. } => "PARK_LOT_BAD_HANDLE",
        }
    }

    /// Occupancy errors mean the allocation state is inconsistent.
    /// Layout errors are ordinary rejections at setup time.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            LotError::SpotOccupied(_) | LotError::SpotVacant(_) | LotError::BadHandle { .. }
        )
    }
}
