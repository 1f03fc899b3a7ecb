//! Simulated payment methods
//!
//! Stand-ins for real gateways: they log the charge and approve it, unless
//! a per-transaction limit is exceeded.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{PaymentCapability, PaymentStatus};
use crate::observability::{log_event_with_fields, Event};
use crate::pricing::Fee;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Upi,
    Card,
    NetBanking,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Upi => "upi",
            PaymentMethod::Card => "card",
            PaymentMethod::NetBanking => "netbanking",
        }
    }

    /// Factory for the simulated capability of this method
    pub fn capability(self) -> SimulatedPayment {
        SimulatedPayment::new(self)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "upi" => Ok(PaymentMethod::Upi),
            "card" => Ok(PaymentMethod::Card),
            "netbanking" | "net_banking" => Ok(PaymentMethod::NetBanking),
            other => Err(format!("Unknown payment method: {}", other)),
        }
    }
}

/// A payment method that always succeeds up to an optional limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedPayment {
    method: PaymentMethod,
    limit: Option<Fee>,
}

impl SimulatedPayment {
    pub fn new(method: PaymentMethod) -> Self {
        Self {
            method,
            limit: None,
        }
    }

    /// Decline any single charge above `limit`
    pub fn with_limit(mut self, limit: Fee) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn method(&self) -> PaymentMethod {
        self.method
    }
}

impl PaymentCapability for SimulatedPayment {
    fn pay(&self, amount: Fee) -> PaymentStatus {
        if let Some(limit) = self.limit {
            if amount > limit {
                return PaymentStatus::declined(format!(
                    "{} limit {} exceeded by charge {}",
                    self.method, limit, amount
                ));
            }
        }
        let charged = amount.to_string();
        log_event_with_fields(
            Event::PaymentProcessed,
            &[("amount", charged.as_str()), ("method", self.method.as_str())],
        );
        PaymentStatus::Approved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_methods() {
        assert_eq!("UPI".parse::<PaymentMethod>(), Ok(PaymentMethod::Upi));
        assert_eq!("net_banking".parse::<PaymentMethod>(), Ok(PaymentMethod::NetBanking));
        assert!("cash".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_simulated_payment_approves() {
        let pay = PaymentMethod::Card.capability();
        assert_eq!(pay.pay(Fee::from_major(40)), PaymentStatus::Approved);
        assert_eq!(pay.method(), PaymentMethod::Card);
    }

    #[test]
    fn test_limit_declines_large_charges() {
        let pay = PaymentMethod::Upi.capability().with_limit(Fee::from_major(30));
        assert!(pay.pay(Fee::from_major(30)).is_approved());
        let status = pay.pay(Fee::from_major(31));
        match status {
            PaymentStatus::Declined { reason } => assert!(reason.contains("upi")),
            other => panic!("expected decline, got {:?}", other),
        }
    }
}
