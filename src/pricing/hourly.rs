//! Hourly pricing: `ceil(hours) * rate(class)`
//!
//! Rounding rule:
//! - a zero-length stay is zero hours and costs nothing
//! - any started hour is billed in full (61 minutes = 2 hours)
//! - duration is measured in milliseconds; negative intervals count as zero

use chrono::{DateTime, Utc};

use super::fee::Fee;
use super::policy::{PricingPolicy, RateCard};
use crate::vehicle::VehicleClass;

const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Number of started hours between `entry` and `exit`
pub fn billable_hours(entry: DateTime<Utc>, exit: DateTime<Utc>) -> u64 {
    let millis = (exit - entry).num_milliseconds().max(0);
    // i64 division rounding up; millis is non-negative here
    ((millis + MILLIS_PER_HOUR - 1) / MILLIS_PER_HOUR) as u64
}

/// The reference per-hour policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HourlyPricing {
    rates: RateCard,
}

impl HourlyPricing {
    pub fn new(rates: RateCard) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &RateCard {
        &self.rates
    }
}

impl PricingPolicy for HourlyPricing {
    fn calculate(&self, entry: DateTime<Utc>, exit: DateTime<Utc>, class: VehicleClass) -> Fee {
        self.rates.rate(class).times(billable_hours(entry, exit))
    }

    fn name(&self) -> &'static str {
        "hourly"
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_zero_duration_is_free() {
        let p = HourlyPricing::default();
        assert_eq!(p.calculate(t0(), t0(), VehicleClass::Car), Fee::ZERO);
    }

    #[test]
    fn test_partial_hour_rounds_up() {
        let p = HourlyPricing::default();
        let one_ms = t0() + Duration::milliseconds(1);
        assert_eq!(p.calculate(t0(), one_ms, VehicleClass::Car), Fee::from_major(20));

        let exactly_one = t0() + Duration::hours(1);
        assert_eq!(p.calculate(t0(), exactly_one, VehicleClass::Car), Fee::from_major(20));

        let sixty_one = t0() + Duration::minutes(61);
        assert_eq!(p.calculate(t0(), sixty_one, VehicleClass::Car), Fee::from_major(40));
    }

    #[test]
    fn test_rate_depends_on_class() {
        let p = HourlyPricing::default();
        let exit = t0() + Duration::minutes(90);
        assert_eq!(p.calculate(t0(), exit, VehicleClass::Bike), Fee::from_major(20));
        assert_eq!(p.calculate(t0(), exit, VehicleClass::Car), Fee::from_major(40));
        assert_eq!(p.calculate(t0(), exit, VehicleClass::Truck), Fee::from_major(80));
    }

    #[test]
    fn test_negative_interval_is_free() {
        let p = HourlyPricing::default();
        let before = t0() - Duration::hours(2);
        assert_eq!(p.calculate(t0(), before, VehicleClass::Truck), Fee::ZERO);
    }

    #[test]
    fn test_billable_hours() {
        assert_eq!(billable_hours(t0(), t0()), 0);
        assert_eq!(billable_hours(t0(), t0() + Duration::seconds(1)), 1);
        assert_eq!(billable_hours(t0(), t0() + Duration::hours(24)), 24);
        assert_eq!(billable_hours(t0(), t0() + Duration::hours(24) + Duration::seconds(1)), 25);
    }

    #[test]
    fn test_calculate_is_deterministic() {
        let p = HourlyPricing::default();
        let exit = t0() + Duration::minutes(135);
        let first = p.calculate(t0(), exit, VehicleClass::Car);
        for _ in 0..50 {
            assert_eq!(p.calculate(t0(), exit, VehicleClass::Car), first);
        }
    }
}
