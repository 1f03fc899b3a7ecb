//! Physical lot structure
//!
//! Floors own their spots in stable indexed vectors. Tickets refer to spots
//! through a `SpotHandle` (floor position + spot position), never by
//! reference, so a closed ticket cannot reach a spot it no longer holds.

mod errors;
mod floor;
mod layout;
mod spot;

pub use errors::{LotError, LotResult};
pub use floor::{Floor, FloorSpec};
pub use layout::FacilityLayout;
pub use spot::{Spot, SpotHandle, SpotSpec};
