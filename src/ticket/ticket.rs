//! Occupancy tickets
//!
//! An open `Ticket` binds a vehicle to a spot from its entry time. Closing it
//! consumes it and yields a `ClosedTicket` whose exit is never before entry.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::token::TicketToken;
use crate::lot::SpotHandle;
use crate::vehicle::{Vehicle, VehicleClass};

/// Human-readable position of a spot, copied into tickets and receipts
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpotLocation {
    pub floor_id: String,
    pub spot_id: String,
}

/// An open stay
#[derive(Debug, Clone)]
pub struct Ticket {
    token: TicketToken,
    vehicle: Arc<Vehicle>,
    spot: SpotHandle,
    location: SpotLocation,
    entry: DateTime<Utc>,
}

impl Ticket {
    pub fn open(
        token: TicketToken,
        vehicle: Arc<Vehicle>,
        spot: SpotHandle,
        location: SpotLocation,
        entry: DateTime<Utc>,
    ) -> Self {
        Self {
            token,
            vehicle,
            spot,
            location,
            entry,
        }
    }

    pub fn token(&self) -> &TicketToken {
        &self.token
    }

    pub fn vehicle(&self) -> &Arc<Vehicle> {
        &self.vehicle
    }

    pub fn vehicle_class(&self) -> VehicleClass {
        self.vehicle.class()
    }

    pub fn spot(&self) -> SpotHandle {
        self.spot
    }

    pub fn location(&self) -> &SpotLocation {
        &self.location
    }

    pub fn entry(&self) -> DateTime<Utc> {
        self.entry
    }

    /// Close the stay at `at`. A clock that stepped backwards is clamped to
    /// the entry time so the interval is never negative.
    pub fn close(self, at: DateTime<Utc>) -> ClosedTicket {
        let exit = at.max(self.entry);
        ClosedTicket {
            token: self.token,
            vehicle: self.vehicle,
            spot: self.spot,
            location: self.location,
            entry: self.entry,
            exit,
        }
    }

    /// Serializable snapshot
    pub fn view(&self) -> TicketView {
        TicketView {
            token: self.token.clone(),
            vehicle_id: self.vehicle.id().to_string(),
            vehicle_class: self.vehicle.class(),
            location: self.location.clone(),
            entry: self.entry,
        }
    }
}

/// A stay whose interval is closed
#[derive(Debug, Clone)]
pub struct ClosedTicket {
    pub token: TicketToken,
    pub vehicle: Arc<Vehicle>,
    pub spot: SpotHandle,
    pub location: SpotLocation,
    pub entry: DateTime<Utc>,
    pub exit: DateTime<Utc>,
}

impl ClosedTicket {
    pub fn duration(&self) -> Duration {
        self.exit - self.entry
    }
}

/// Read-only view of an open ticket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketView {
    pub token: TicketToken,
    pub vehicle_id: String,
    pub vehicle_class: VehicleClass,
    pub location: SpotLocation,
    pub entry: DateTime<Utc>,
}
