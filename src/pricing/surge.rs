//! Surge pricing: another policy's fee scaled by a multiplier

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::errors::{PricingError, PricingResult};
use super::fee::Fee;
use super::policy::PricingPolicy;
use crate::vehicle::VehicleClass;

/// Wraps a base policy and multiplies its fee by `multiplier_percent / 100`,
/// rounding up to the next minor unit. The multiplier never discounts.
#[derive(Debug, Clone)]
pub struct SurgePricing {
    base: Arc<dyn PricingPolicy>,
    multiplier_percent: u32,
}

impl SurgePricing {
    /// `multiplier_percent` of 160 means 1.6x
    pub fn new(base: Arc<dyn PricingPolicy>, multiplier_percent: u32) -> PricingResult<Self> {
        if multiplier_percent < 100 {
            return Err(PricingError::InvalidMultiplier(multiplier_percent));
        }
        Ok(Self {
            base,
            multiplier_percent,
        })
    }

    pub fn multiplier_percent(&self) -> u32 {
        self.multiplier_percent
    }
}

impl PricingPolicy for SurgePricing {
    fn calculate(&self, entry: DateTime<Utc>, exit: DateTime<Utc>, class: VehicleClass) -> Fee {
        self.base
            .calculate(entry, exit, class)
            .scale_percent_ceil(self.multiplier_percent)
    }

    fn name(&self) -> &'static str {
        "surge"
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::pricing::HourlyPricing;

    #[test]
    fn test_surge_scales_base_fee() {
        let surge = SurgePricing::new(Arc::new(HourlyPricing::default()), 160).unwrap();
        let entry = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let exit = entry + Duration::minutes(30);
        assert_eq!(surge.calculate(entry, exit, VehicleClass::Car), Fee::from_major(32));
        assert_eq!(surge.calculate(entry, entry, VehicleClass::Car), Fee::ZERO);
    }

    #[test]
    fn test_identity_multiplier() {
        let surge = SurgePricing::new(Arc::new(HourlyPricing::default()), 100).unwrap();
        let entry = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let exit = entry + Duration::hours(3);
        assert_eq!(surge.calculate(entry, exit, VehicleClass::Truck), Fee::from_major(120));
    }

    #[test]
    fn test_discount_rejected() {
        let err = SurgePricing::new(Arc::new(HourlyPricing::default()), 90).unwrap_err();
        assert_eq!(err, PricingError::InvalidMultiplier(90));
    }
}
