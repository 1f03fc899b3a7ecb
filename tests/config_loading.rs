//! Configuration Loading Tests
//!
//! Config files on disk through to a working facility.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use serde_json::Value;
use tempfile::TempDir;

use parkcore::cli::serve;
use parkcore::config::{ConfigError, FacilityConfig, PricingKind};
use parkcore::observability::Logger;
use parkcore::ticket::TokenScheme;

fn write_config(dir: &TempDir, body: &str) -> std::path::PathBuf {
    let path = dir.path().join("parkcore.json");
    fs::write(&path, body).unwrap();
    path
}

/// Test: a full config loads and builds.
#[test]
fn test_load_full_config() {
    Logger::silence();
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"{
            "floors": [
                {"id": "Ground", "spots": [
                    {"id": "G1", "class": "bike"},
                    {"id": "G2", "class": "car"}
                ]},
                {"id": "Level1", "spots": [
                    {"id": "L1", "class": "truck"}
                ]}
            ],
            "pricing": {"kind": "flat", "rates": {"bike": 5, "car": 10, "truck": 30}},
            "token_scheme": "uuid",
            "quiet": true
        }"#,
    );

    let config = FacilityConfig::load(&path).unwrap();
    assert_eq!(config.pricing.kind, PricingKind::Flat);
    assert_eq!(config.token_scheme, TokenScheme::Uuid);
    assert!(config.quiet);

    let facility = config.build_facility().unwrap();
    let report = facility.occupancy().unwrap();
    assert_eq!(report.total, 3);
    assert_eq!(report.floors.len(), 2);
    assert_eq!(facility.pricing_policy().unwrap().name(), "flat");
}

/// Test: a missing file is a read error.
#[test]
fn test_missing_file() {
    let err = FacilityConfig::load(Path::new("/nonexistent/parkcore.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
    assert_eq!(err.code(), "PARK_CONFIG_READ_FAILED");
}

/// Test: malformed JSON is a parse error.
#[test]
fn test_malformed_json() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "{ floors: ");
    assert_eq!(
        FacilityConfig::load(&path).unwrap_err().code(),
        "PARK_CONFIG_PARSE_FAILED"
    );
}

/// Test: duplicate floor ids fail validation.
#[test]
fn test_duplicate_floor() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"{"floors": [{"id": "F1", "spots": []}, {"id": "F1", "spots": []}]}"#,
    );
    assert_eq!(
        FacilityConfig::load(&path).unwrap_err().code(),
        "PARK_LOT_DUPLICATE_FLOOR"
    );
}

/// Test: a loaded facility serves a JSON-lines session.
#[test]
fn test_loaded_facility_serves_requests() {
    Logger::silence();
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"{"floors": [{"id": "F1", "spots": [{"id": "S1", "class": "car"}]}]}"#,
    );
    let facility = FacilityConfig::load(&path).unwrap().build_facility().unwrap();

    let input = concat!(
        "{\"op\":\"park\",\"vehicle_id\":\"Car_101\",\"class\":\"car\"}\n",
        "{\"op\":\"park\",\"vehicle_id\":\"Car_102\",\"class\":\"car\"}\n",
        "{\"op\":\"ticket\",\"ticket\":\"TICKET-000001\"}\n",
        "{\"op\":\"unpark\",\"ticket\":\"TICKET-000001\",\"method\":\"upi\"}\n",
        "{\"op\":\"status\"}\n",
    );
    let mut out = Vec::new();
    serve(&facility, Cursor::new(input), &mut out).unwrap();

    let lines: Vec<Value> = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0]["data"]["result"], "parked");
    assert_eq!(lines[1]["data"]["result"], "facility_full");
    assert_eq!(lines[2]["data"]["vehicle_id"], "Car_101");
    assert_eq!(lines[3]["data"]["result"], "paid");
    assert_eq!(lines[4]["data"]["occupancy"]["occupied"], 0);
}
