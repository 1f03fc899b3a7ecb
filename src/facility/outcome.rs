//! Park and unpark outcomes
//!
//! Every expected result is a variant here, never an `Err`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::payment::PaymentStatus;
use crate::pricing::Fee;
use crate::ticket::{SpotLocation, TicketToken};
use crate::vehicle::Vehicle;

/// Issued on a successful park
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParkReceipt {
    pub token: TicketToken,
    pub vehicle_id: String,
    pub location: SpotLocation,
    pub entry: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParkOutcome {
    /// A spot was occupied and a ticket opened
    Parked(ParkReceipt),
    /// No compatible free spot on any floor
    FacilityFull,
    /// The vehicle id already holds the given open ticket
    AlreadyParked { token: TicketToken },
}

impl ParkOutcome {
    pub fn is_parked(&self) -> bool {
        matches!(self, ParkOutcome::Parked(_))
    }

    /// Token of the newly opened ticket
    pub fn token(&self) -> Option<&TicketToken> {
        match self {
            ParkOutcome::Parked(receipt) => Some(&receipt.token),
            _ => None,
        }
    }

    pub fn receipt(&self) -> Option<&ParkReceipt> {
        match self {
            ParkOutcome::Parked(receipt) => Some(receipt),
            _ => None,
        }
    }
}

/// A closed, priced stay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    pub token: TicketToken,
    pub vehicle: Arc<Vehicle>,
    pub location: SpotLocation,
    pub entry: DateTime<Utc>,
    pub exit: DateTime<Utc>,
    pub fee: Fee,
    /// Name of the pricing policy current at unpark time
    pub policy: &'static str,
    pub payment: PaymentStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnparkOutcome {
    /// Spot released and payment approved
    Paid(Settlement),
    /// Spot released but payment declined. The release stands; the fee is
    /// owed out of band.
    PaymentFailed(Settlement),
    /// Unknown or already-closed token
    InvalidTicket,
}

impl UnparkOutcome {
    pub fn settlement(&self) -> Option<&Settlement> {
        match self {
            UnparkOutcome::Paid(s) | UnparkOutcome::PaymentFailed(s) => Some(s),
            UnparkOutcome::InvalidTicket => None,
        }
    }

    /// Computed fee, present whether or not payment succeeded
    pub fn fee(&self) -> Option<Fee> {
        self.settlement().map(|s| s.fee)
    }

    pub fn is_paid(&self) -> bool {
        matches!(self, UnparkOutcome::Paid(_))
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, UnparkOutcome::InvalidTicket)
    }
}
