//! # Pricing Errors

use thiserror::Error;

use crate::vehicle::VehicleClass;

/// Result type for pricing configuration
pub type PricingResult<T> = Result<T, PricingError>;

/// Rejected pricing parameters.
///
/// Only raised while building a policy; `calculate` itself cannot fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("Rate for {higher} must exceed rate for {lower}")]
    RatesNotIncreasing {
        lower: VehicleClass,
        higher: VehicleClass,
    },

    #[error("Rate for {class} too large: {major}")]
    RateTooLarge { class: VehicleClass, major: u64 },

    #[error("Surge multiplier must be at least 100 percent, got {0}")]
    InvalidMultiplier(u32),
}

impl PricingError {
    pub fn code(&self) -> &'static str {
        match self {
            PricingError::RatesNotIncreasing { .. } => "PARK_PRICING_RATES_NOT_INCREASING",
            PricingError::RateTooLarge { .. } => "PARK_PRICING_RATE_TOO_LARGE",
            PricingError::InvalidMultiplier(_) => "PARK_PRICING_INVALID_MULTIPLIER",
        }
    }
}
