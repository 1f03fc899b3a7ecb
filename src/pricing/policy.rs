//! The pricing strategy seam

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::{PricingError, PricingResult};
use super::fee::Fee;
use crate::vehicle::VehicleClass;

/// Computes the fee for a closed stay.
///
/// Implementations must be pure: the same `(entry, exit, class)` always
/// yields the same fee and no internal state changes. The facility calls
/// this outside its allocation lock, from any thread.
pub trait PricingPolicy: Send + Sync + fmt::Debug {
    fn calculate(&self, entry: DateTime<Utc>, exit: DateTime<Utc>, class: VehicleClass) -> Fee;

    /// Short name used in logs
    fn name(&self) -> &'static str {
        "custom"
    }
}

/// Per-class base rates. Rates strictly increase with vehicle class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateCard {
    pub bike: Fee,
    pub car: Fee,
    pub truck: Fee,
}

impl RateCard {
    /// Build and validate a rate card
    pub fn new(bike: Fee, car: Fee, truck: Fee) -> PricingResult<Self> {
        let card = Self { bike, car, truck };
        card.validate()?;
        Ok(card)
    }

    pub fn validate(&self) -> PricingResult<()> {
        if self.car <= self.bike {
            return Err(PricingError::RatesNotIncreasing {
                lower: VehicleClass::Bike,
                higher: VehicleClass::Car,
            });
        }
        if self.truck <= self.car {
            return Err(PricingError::RatesNotIncreasing {
                lower: VehicleClass::Car,
                higher: VehicleClass::Truck,
            });
        }
        Ok(())
    }

    pub fn rate(&self, class: VehicleClass) -> Fee {
        match class {
            VehicleClass::Bike => self.bike,
            VehicleClass::Car => self.car,
            VehicleClass::Truck => self.truck,
        }
    }
}

impl Default for RateCard {
    /// 10 / 20 / 40 per hour
    fn default() -> Self {
        Self {
            bike: Fee::from_major(10),
            car: Fee::from_major(20),
            truck: Fee::from_major(40),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rates() {
        let card = RateCard::default();
        assert_eq!(card.rate(VehicleClass::Bike), Fee::from_major(10));
        assert_eq!(card.rate(VehicleClass::Car), Fee::from_major(20));
        assert_eq!(card.rate(VehicleClass::Truck), Fee::from_major(40));
        assert!(card.validate().is_ok());
    }

    #[test]
    fn test_rates_must_strictly_increase() {
        let err = RateCard::new(Fee::from_major(20), Fee::from_major(20), Fee::from_major(40))
            .unwrap_err();
        assert_eq!(
            err,
            PricingError::RatesNotIncreasing {
                lower: VehicleClass::Bike,
                higher: VehicleClass::Car
            }
        );

        let err = RateCard::new(Fee::from_major(5), Fee::from_major(20), Fee::from_major(10))
            .unwrap_err();
        assert!(matches!(
            err,
            PricingError::RatesNotIncreasing {
                higher: VehicleClass::Truck,
                ..
            }
        ));
    }
}
