//! Pricing strategies
//!
//! A `PricingPolicy` turns a closed interval and a vehicle class into a fee.
//! The facility holds the current policy behind a swap point; each unpark
//! prices with whichever policy is current at that moment. Nothing is pinned
//! at park time.

mod errors;
mod fee;
mod flat;
mod hourly;
mod policy;
mod surge;

pub use errors::{PricingError, PricingResult};
pub use fee::Fee;
pub use flat::FlatPricing;
pub use hourly::{billable_hours, HourlyPricing};
pub use policy::{PricingPolicy, RateCard};
pub use surge::SurgePricing;
