//! Facility configuration file
//!
//! JSON document describing floors, pricing and token format:
//!
//! ```json
//! {
//!   "floors": [
//!     { "id": "F1", "spots": [ { "id": "S1", "class": "car" } ] }
//!   ],
//!   "pricing": { "kind": "surge", "rates": { "bike": 10, "car": 20, "truck": 40 },
//!                "multiplier_percent": 160 },
//!   "token_scheme": "sequential",
//!   "quiet": false
//! }
//! ```
//!
//! Rates are whole currency units per hour (per stay for `flat`).

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::facility::{FacilityError, ParkingFacility};
use crate::lot::{FacilityLayout, FloorSpec};
use crate::observability::{log_event_with_fields, Event};
use crate::pricing::{
    Fee, FlatPricing, HourlyPricing, PricingError, PricingPolicy, PricingResult, RateCard,
    SurgePricing,
};
use crate::ticket::TokenScheme;
use crate::vehicle::VehicleClass;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] FacilityError),
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Read { .. } => "PARK_CONFIG_READ_FAILED",
            ConfigError::Parse(_) => "PARK_CONFIG_PARSE_FAILED",
            ConfigError::Invalid(e) => e.code(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingKind {
    #[default]
    Hourly,
    /// Hourly scaled by `multiplier_percent`
    Surge,
    Flat,
}

/// Per-class rates in whole currency units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateConfig {
    pub bike: u64,
    pub car: u64,
    pub truck: u64,
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            bike: 10,
            car: 20,
            truck: 40,
        }
    }
}

impl RateConfig {
    pub fn to_rate_card(&self) -> PricingResult<RateCard> {
        RateCard::new(
            rate(VehicleClass::Bike, self.bike)?,
            rate(VehicleClass::Car, self.car)?,
            rate(VehicleClass::Truck, self.truck)?,
        )
    }
}

fn rate(class: VehicleClass, major: u64) -> PricingResult<Fee> {
    Fee::checked_from_major(major).ok_or(PricingError::RateTooLarge { class, major })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    #[serde(default)]
    pub kind: PricingKind,

    #[serde(default)]
    pub rates: RateConfig,

    /// Only used by `surge`; 160 means 1.6x
    #[serde(default = "default_multiplier_percent")]
    pub multiplier_percent: u32,
}

fn default_multiplier_percent() -> u32 {
    100
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            kind: PricingKind::default(),
            rates: RateConfig::default(),
            multiplier_percent: default_multiplier_percent(),
        }
    }
}

impl PricingConfig {
    /// Build the configured policy
    pub fn build(&self) -> PricingResult<Arc<dyn PricingPolicy>> {
        let rates = self.rates.to_rate_card()?;
        let policy: Arc<dyn PricingPolicy> = match self.kind {
            PricingKind::Hourly => Arc::new(HourlyPricing::new(rates)),
            PricingKind::Flat => Arc::new(FlatPricing::new(rates)),
            PricingKind::Surge => Arc::new(SurgePricing::new(
                Arc::new(HourlyPricing::new(rates)),
                self.multiplier_percent,
            )?),
        };
        Ok(policy)
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityConfig {
    pub floors: Vec<FloorSpec>,

    #[serde(default)]
    pub pricing: PricingConfig,

    #[serde(default)]
    pub token_scheme: TokenScheme,

    /// Suppress structured log output
    #[serde(default)]
    pub quiet: bool,
}

impl FacilityConfig {
    /// Load and validate a configuration file, then log `CONFIG_LOADED`
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let config = Self::read(path)?;
        config.announce(path);
        Ok(config)
    }

    /// Load and validate a configuration file without logging
    pub fn read(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Log `CONFIG_LOADED` for this config
    pub fn announce(&self, path: &Path) {
        let floors = self.floors.len().to_string();
        let path_str = path.display().to_string();
        log_event_with_fields(
            Event::ConfigLoaded,
            &[("floors", floors.as_str()), ("path", path_str.as_str())],
        );
    }

    /// Parse and validate a configuration document
    pub fn from_json(content: &str) -> ConfigResult<Self> {
        let config: FacilityConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject bad layouts and pricing parameters before any traffic
    pub fn validate(&self) -> Result<(), FacilityError> {
        self.layout().validate()?;
        self.pricing.build()?;
        Ok(())
    }

    pub fn layout(&self) -> FacilityLayout {
        FacilityLayout {
            floors: self.floors.clone(),
        }
    }

    /// Build a ready facility using the system clock
    pub fn build_facility(&self) -> Result<ParkingFacility, FacilityError> {
        ParkingFacility::builder(self.layout())
            .pricing(self.pricing.build()?)
            .token_scheme(self.token_scheme)
            .build()
    }
}
