//! Observable facility events
//!
//! Events are explicit and typed. Each maps to a fixed event name and a
//! default severity.

use std::fmt;

use super::logger::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Configuration file loaded and validated
    ConfigLoaded,
    /// Floors built and facility ready for traffic
    FacilitySetup,
    /// Spot appended to a floor after setup
    SpotAdded,
    /// Pricing policy replaced at runtime
    PricingPolicySwapped,

    // Park
    /// Vehicle assigned a spot and ticket
    VehicleParked,
    /// No compatible free spot on any floor
    FacilityFull,
    /// Vehicle id already holds an open ticket
    VehicleAlreadyParked,

    // Unpark
    /// Ticket closed, spot released, fee settled
    VehicleUnparked,
    /// Unknown or already-closed ticket
    InvalidTicket,
    /// Fee computed but payment declined
    PaymentFailed,
    /// Payment capability accepted an amount
    PaymentProcessed,

    /// Allocation state found inconsistent
    InvariantViolated,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::FacilitySetup => "FACILITY_SETUP",
            Event::SpotAdded => "SPOT_ADDED",
            Event::PricingPolicySwapped => "PRICING_POLICY_SWAPPED",
            Event::VehicleParked => "VEHICLE_PARKED",
            Event::FacilityFull => "FACILITY_FULL",
            Event::VehicleAlreadyParked => "VEHICLE_ALREADY_PARKED",
            Event::VehicleUnparked => "VEHICLE_UNPARKED",
            Event::InvalidTicket => "INVALID_TICKET",
            Event::PaymentFailed => "PAYMENT_FAILED",
            Event::PaymentProcessed => "PAYMENT_PROCESSED",
            Event::InvariantViolated => "INVARIANT_VIOLATED",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Event::FacilityFull | Event::VehicleAlreadyParked | Event::InvalidTicket => {
                Severity::Warn
            }
            Event::PaymentFailed | Event::InvariantViolated => Severity::Error,
            Event::PaymentProcessed => Severity::Trace,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        assert_eq!(Event::VehicleParked.as_str(), "VEHICLE_PARKED");
        assert_eq!(Event::InvalidTicket.to_string(), "INVALID_TICKET");
    }

    #[test]
    fn test_rejections_are_warnings() {
        assert_eq!(Event::FacilityFull.severity(), Severity::Warn);
        assert_eq!(Event::InvalidTicket.severity(), Severity::Warn);
        assert_eq!(Event::PaymentFailed.severity(), Severity::Error);
        assert_eq!(Event::VehicleUnparked.severity(), Severity::Info);
    }
}
