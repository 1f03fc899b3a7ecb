//! # Payment collaborator seam
//!
//! The facility only calls `pay` with a computed amount and observes the
//! status. How money moves is the caller's business.

mod methods;

pub use methods::{PaymentMethod, SimulatedPayment};

use serde::{Deserialize, Serialize};

use crate::pricing::Fee;

/// Result of asking a payment capability to collect an amount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PaymentStatus {
    Approved,
    Declined { reason: String },
}

impl PaymentStatus {
    pub fn declined(reason: impl Into<String>) -> Self {
        PaymentStatus::Declined {
            reason: reason.into(),
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, PaymentStatus::Approved)
    }
}

impl From<bool> for PaymentStatus {
    fn from(ok: bool) -> Self {
        if ok {
            PaymentStatus::Approved
        } else {
            PaymentStatus::declined("payment capability reported failure")
        }
    }
}

/// Something that can collect a fee.
///
/// Invoked on the caller's thread after the spot has been released and the
/// allocation lock dropped.
pub trait PaymentCapability {
    fn pay(&self, amount: Fee) -> PaymentStatus;
}

/// Plain callbacks: `|fee| true` approves, `|fee| false` declines
impl<F> PaymentCapability for F
where
    F: Fn(Fee) -> bool,
{
    fn pay(&self, amount: Fee) -> PaymentStatus {
        PaymentStatus::from(self(amount))
    }
}
