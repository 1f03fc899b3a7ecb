//! Facility counters
//!
//! - Counters only, monotonic, reset only when the facility is rebuilt
//! - Lock-free; updated outside the allocation critical section

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters for one facility.
///
/// Relaxed ordering: counters are reporting data and never feed back into
/// allocation decisions.
#[derive(Debug, Default)]
pub struct FacilityMetrics {
    parks_accepted: AtomicU64,
    parks_rejected_full: AtomicU64,
    parks_rejected_duplicate: AtomicU64,
    unparks_settled: AtomicU64,
    invalid_tickets: AtomicU64,
    payments_failed: AtomicU64,
    fees_charged_minor: AtomicU64,
    fees_uncollected_minor: AtomicU64,
    policy_swaps: AtomicU64,
}

impl FacilityMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_park(&self) {
        self.parks_accepted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_full(&self) {
        self.parks_rejected_full.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_duplicate(&self) {
        self.parks_rejected_duplicate.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_invalid_ticket(&self) {
        self.invalid_tickets.fetch_add(1, Ordering::Relaxed);
    }

    /// A completed unpark. Failed payments still count as settled stays;
    /// their fee is tracked as uncollected.
    pub fn record_unpark(&self, fee_minor: u64, paid: bool) {
        self.unparks_settled.fetch_add(1, Ordering::Relaxed);
        self.fees_charged_minor.fetch_add(fee_minor, Ordering::Relaxed);
        if !paid {
            self.payments_failed.fetch_add(1, Ordering::Relaxed);
            self.fees_uncollected_minor
                .fetch_add(fee_minor, Ordering::Relaxed);
        }
    }

    pub fn record_policy_swap(&self) {
        self.policy_swaps.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            parks_accepted: self.parks_accepted.load(Ordering::Relaxed),
            parks_rejected_full: self.parks_rejected_full.load(Ordering::Relaxed),
            parks_rejected_duplicate: self.parks_rejected_duplicate.load(Ordering::Relaxed),
            unparks_settled: self.unparks_settled.load(Ordering::Relaxed),
            invalid_tickets: self.invalid_tickets.load(Ordering::Relaxed),
            payments_failed: self.payments_failed.load(Ordering::Relaxed),
            fees_charged_minor: self.fees_charged_minor.load(Ordering::Relaxed),
            fees_uncollected_minor: self.fees_uncollected_minor.load(Ordering::Relaxed),
            policy_swaps: self.policy_swaps.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time copy of all counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub parks_accepted: u64,
    pub parks_rejected_full: u64,
    pub parks_rejected_duplicate: u64,
    pub unparks_settled: u64,
    pub invalid_tickets: u64,
    pub payments_failed: u64,
    pub fees_charged_minor: u64,
    pub fees_uncollected_minor: u64,
    pub policy_swaps: u64,
}
