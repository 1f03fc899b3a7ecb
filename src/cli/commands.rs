//! CLI command implementations
//!
//! `run` builds the facility once, then serves one JSON request per stdin
//! line until EOF. Each line gets exactly one response line on stdout.
//!
//! Request ops:
//! - `{"op":"park","vehicle_id":"Car_101","class":"car"}`
//! - `{"op":"unpark","ticket":"TICKET-000001","method":"card","limit":100}`
//! - `{"op":"ticket","ticket":"TICKET-000001"}`
//! - `{"op":"status"}`
//! - `{"op":"metrics"}`
//! - `{"op":"add_spot","floor_id":"F1","spot":{"id":"S9","class":"truck"}}`
//! - `{"op":"set_pricing","pricing":{"kind":"flat"}}`

use std::io::{self, BufRead, Write};
use std::path::Path;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::{FacilityConfig, PricingConfig};
use crate::facility::{ParkOutcome, ParkingFacility, UnparkOutcome};
use crate::lot::SpotSpec;
use crate::observability::Logger;
use crate::payment::PaymentMethod;
use crate::pricing::Fee;
use crate::vehicle::VehicleClass;

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_requests, write_error, write_response};

/// One request line
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    Park {
        vehicle_id: String,
        class: VehicleClass,
    },
    Unpark {
        ticket: String,
        /// Defaults to UPI
        #[serde(default)]
        method: Option<PaymentMethod>,
        /// Per-charge limit in whole currency units
        #[serde(default)]
        limit: Option<u64>,
    },
    Ticket {
        ticket: String,
    },
    Status,
    Metrics,
    AddSpot {
        floor_id: String,
        spot: SpotSpec,
    },
    SetPricing {
        pricing: PricingConfig,
    },
}

/// Main CLI entry point.
///
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Validate { config } => validate(&config),
        Command::Run { config } => start(&config),
    }
}

/// Load and check a configuration without serving traffic
pub fn validate(config_path: &Path) -> CliResult<()> {
    Logger::route_to_stderr();
    let config = FacilityConfig::load(config_path)?;
    let layout = config.layout();

    let mut stdout = io::stdout().lock();
    write_response(
        &mut stdout,
        json!({
            "valid": true,
            "floors": layout.floors.len(),
            "capacity": layout.capacity(),
            "pricing": config.pricing.kind,
        }),
    )
}

/// Build the facility and serve stdin until EOF
pub fn start(config_path: &Path) -> CliResult<()> {
    // stdout carries responses only
    Logger::route_to_stderr();
    let facility = open_facility(config_path)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    serve(&facility, stdin.lock(), &mut stdout)
}

/// Read the config, apply `quiet`, then build.
///
/// `quiet` is applied before the first log line so a quiet config emits
/// nothing at all. It silences the whole process.
pub fn open_facility(config_path: &Path) -> CliResult<ParkingFacility> {
    let config = FacilityConfig::read(config_path)?;
    if config.quiet {
        Logger::silence();
    }
    config.announce(config_path);
    Ok(config.build_facility()?)
}

/// Request loop over any line source and sink.
///
/// A bad line or a refused operation produces an error response and the
/// loop continues. A read failure ends the loop.
pub fn serve<R: BufRead, W: Write>(
    facility: &ParkingFacility,
    reader: R,
    out: &mut W,
) -> CliResult<()> {
    for line in read_requests(reader) {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                write_error(out, e.code_str(), e.message())?;
                break;
            }
        };

        let result = serde_json::from_str::<Request>(&line)
            .map_err(|e| CliError::bad_request(e.to_string()))
            .and_then(|request| handle_request(facility, request));

        match result {
            Ok(data) => write_response(out, data)?,
            Err(e) => write_error(out, e.code_str(), e.message())?,
        }
    }
    Ok(())
}

/// Execute one request against the facility
pub fn handle_request(facility: &ParkingFacility, request: Request) -> CliResult<Value> {
    match request {
        Request::Park { vehicle_id, class } => {
            let outcome = facility.park_vehicle(vehicle_id, class)?;
            Ok(park_json(&outcome))
        }
        Request::Unpark {
            ticket,
            method,
            limit,
        } => {
            let mut payment = method.unwrap_or(PaymentMethod::Upi).capability();
            // An unrepresentable limit saturates, which never declines
            if let Some(limit) = limit {
                payment = payment.with_limit(Fee::from_major(limit));
            }
            let outcome = facility.unpark(&ticket, &payment)?;
            Ok(unpark_json(&outcome))
        }
        Request::Ticket { ticket } => match facility.ticket(&ticket)? {
            Some(view) => Ok(serde_json::to_value(view)?),
            None => Err(CliError::bad_request(format!("No open ticket {}", ticket))),
        },
        Request::Status => Ok(json!({
            "occupancy": facility.occupancy()?,
            "open_tickets": facility.open_tickets()?,
            "pricing": facility.pricing_policy()?.name(),
        })),
        Request::Metrics => Ok(serde_json::to_value(facility.metrics())?),
        Request::AddSpot { floor_id, spot } => {
            let spot_id = spot.id.clone();
            facility.add_spot(&floor_id, spot)?;
            Ok(json!({ "added": true, "floor_id": floor_id, "spot_id": spot_id }))
        }
        Request::SetPricing { pricing } => {
            let policy = pricing
                .build()
                .map_err(|e| CliError::bad_request(format!("{} ({})", e, e.code())))?;
            let name = policy.name();
            facility.set_pricing_policy(policy)?;
            Ok(json!({ "pricing": name }))
        }
    }
}

fn park_json(outcome: &ParkOutcome) -> Value {
    match outcome {
        ParkOutcome::Parked(receipt) => json!({
            "result": "parked",
            "ticket": receipt.token,
            "vehicle_id": receipt.vehicle_id,
            "floor_id": receipt.location.floor_id,
            "spot_id": receipt.location.spot_id,
            "entry": receipt.entry,
        }),
        ParkOutcome::FacilityFull => json!({ "result": "facility_full" }),
        ParkOutcome::AlreadyParked { token } => json!({
            "result": "already_parked",
            "ticket": token,
        }),
    }
}

fn unpark_json(outcome: &UnparkOutcome) -> Value {
    let Some(s) = outcome.settlement() else {
        return json!({ "result": "invalid_ticket" });
    };
    json!({
        "result": if outcome.is_paid() { "paid" } else { "payment_failed" },
        "ticket": s.token,
        "vehicle_id": s.vehicle.id(),
        "class": s.vehicle.class(),
        "floor_id": s.location.floor_id,
        "spot_id": s.location.spot_id,
        "entry": s.entry,
        "exit": s.exit,
        "fee": s.fee.to_string(),
        "fee_minor": s.fee.minor(),
        "pricing": s.policy,
        "payment": s.payment,
    })
}
