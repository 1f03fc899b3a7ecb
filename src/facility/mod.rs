//! # Parking facility
//!
//! The orchestrator: owns floors and the open-ticket table and composes
//! spots, tickets, pricing and payment into `park` and `unpark`.

mod errors;
#[allow(clippy::module_inception)]
mod facility;
mod outcome;
mod report;
mod state;

pub use errors::{FacilityError, FacilityResult};
pub use facility::{FacilityBuilder, ParkingFacility};
pub use outcome::{ParkOutcome, ParkReceipt, Settlement, UnparkOutcome};
pub use report::{ClassCounts, FloorOccupancy, OccupancyReport};
