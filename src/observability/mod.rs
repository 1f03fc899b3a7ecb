//! Observability: structured logging and counters
//!
//! # Principles
//!
//! 1. Observability is read-only and never changes allocation outcomes
//! 2. Nothing here runs inside the facility's allocation lock
//! 3. No background threads
//!
//! # Usage
//!
//! ```ignore
//! use parkcore::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::VehicleParked, &[("ticket", "TICKET-000001")]);
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{FacilityMetrics, MetricsSnapshot};

/// Log a typed event with fields at its default severity
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
