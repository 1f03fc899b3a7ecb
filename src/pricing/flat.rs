//! Flat pricing: one fee per stay, whatever its length

use chrono::{DateTime, Utc};

use super::fee::Fee;
use super::policy::{PricingPolicy, RateCard};
use crate::vehicle::VehicleClass;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlatPricing {
    rates: RateCard,
}

impl FlatPricing {
    pub fn new(rates: RateCard) -> Self {
        Self { rates }
    }
}

impl PricingPolicy for FlatPricing {
    fn calculate(&self, _entry: DateTime<Utc>, _exit: DateTime<Utc>, class: VehicleClass) -> Fee {
        self.rates.rate(class)
    }

    fn name(&self) -> &'static str {
        "flat"
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    #[test]
    fn test_flat_ignores_duration() {
        let p = FlatPricing::default();
        let entry = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        assert_eq!(p.calculate(entry, entry, VehicleClass::Bike), Fee::from_major(10));
        assert_eq!(
            p.calculate(entry, entry + Duration::hours(9), VehicleClass::Bike),
            Fee::from_major(10)
        );
    }
}
