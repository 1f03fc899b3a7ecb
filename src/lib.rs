//! parkcore - a multi-floor parking allocation engine
//!
//! Vehicles are assigned to the first compatible free spot, tickets track
//! each stay, and fees are computed by a swappable pricing policy when the
//! vehicle leaves.
//!
//! ```ignore
//! use std::sync::Arc;
//! use parkcore::{FacilityLayout, HourlyPricing, ParkingFacility, SpotSpec, VehicleClass};
//!
//! let layout = FacilityLayout::new()
//!     .with_floor("F1", vec![SpotSpec::new("S1", VehicleClass::Car)]);
//! let facility = ParkingFacility::setup(layout, Arc::new(HourlyPricing::default()))?;
//! let parked = facility.park_vehicle("Car_101", VehicleClass::Car)?;
//! ```

pub mod cli;
pub mod clock;
pub mod config;
pub mod facility;
pub mod lot;
pub mod observability;
pub mod payment;
pub mod pricing;
pub mod ticket;
pub mod vehicle;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::FacilityConfig;
pub use facility::{
    FacilityError, FacilityResult, OccupancyReport, ParkOutcome, ParkingFacility, UnparkOutcome,
};
pub use lot::{FacilityLayout, FloorSpec, SpotSpec};
pub use payment::{PaymentCapability, PaymentMethod, PaymentStatus};
pub use pricing::{Fee, FlatPricing, HourlyPricing, PricingPolicy, RateCard, SurgePricing};
pub use ticket::{TicketToken, TokenScheme};
pub use vehicle::{Vehicle, VehicleClass};
