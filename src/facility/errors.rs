//! # Facility Errors
//!
//! Only construction problems and broken internal state are errors.
//! Full facility, unknown tickets and declined payments are ordinary
//! outcomes (see `outcome.rs`).

use thiserror::Error;

use crate::lot::LotError;
use crate::pricing::PricingError;
use crate::vehicle::VehicleError;

/// Result type for facility operations
pub type FacilityResult<T> = Result<T, FacilityError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FacilityError {
    #[error(transparent)]
    Lot(#[from] LotError),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error(transparent)]
    Vehicle(#[from] VehicleError),

    #[error("Allocation state inconsistent: {0}")]
    Inconsistent(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl FacilityError {
    pub fn code(&self) -> &'static str {
        match self {
            FacilityError::Lot(e) => e.code(),
            FacilityError::Pricing(e) => e.code(),
            FacilityError::Vehicle(VehicleError::EmptyId) => "PARK_VEHICLE_EMPTY_ID",
            FacilityError::Vehicle(VehicleError::UnknownClass(_)) => "PARK_VEHICLE_UNKNOWN_CLASS",
            FacilityError::Inconsistent(_) => "PARK_FACILITY_INCONSISTENT",
            FacilityError::Internal(_) => "PARK_FACILITY_INTERNAL",
        }
    }

    /// Configuration errors are raised by setup before any traffic
    pub fn is_configuration(&self) -> bool {
        match self {
            FacilityError::Lot(e) => !e.is_invariant_violation(),
            FacilityError::Pricing(_) => true,
            _ => false,
        }
    }

    pub(crate) fn poisoned() -> Self {
        FacilityError::Internal("Allocation lock poisoned".into())
    }
}
