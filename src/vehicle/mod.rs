//! Vehicle identity and class
//!
//! A vehicle is an immutable record created at arrival. Its class drives
//! spot compatibility under the total order Bike < Car < Truck.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ordered vehicle (and spot capacity) category.
///
/// The discriminants are the fit order: a spot with capacity `c` hosts a
/// vehicle of class `v` iff `c >= v`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleClass {
    Bike = 0,
    Car = 1,
    Truck = 2,
}

impl VehicleClass {
    /// All classes in ascending order
    pub const ALL: [VehicleClass; 3] = [VehicleClass::Bike, VehicleClass::Car, VehicleClass::Truck];

    /// Returns the lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleClass::Bike => "bike",
            VehicleClass::Car => "car",
            VehicleClass::Truck => "truck",
        }
    }

    /// Whether a spot of this capacity can host a vehicle of `class`
    pub fn accommodates(&self, class: VehicleClass) -> bool {
        *self >= class
    }
}

impl fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VehicleClass {
    type Err = VehicleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bike" => Ok(VehicleClass::Bike),
            "car" => Ok(VehicleClass::Car),
            "truck" => Ok(VehicleClass::Truck),
            other => Err(VehicleError::UnknownClass(other.to_string())),
        }
    }
}

/// Vehicle construction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VehicleError {
    #[error("Vehicle id must not be empty")]
    EmptyId,

    #[error("Unknown vehicle class: {0}")]
    UnknownClass(String),
}

/// An arriving vehicle.
///
/// Immutable after construction. The facility shares it between the open
/// ticket and the settlement receipt, so it is usually held in an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vehicle {
    id: String,
    class: VehicleClass,
}

impl Vehicle {
    /// Create a vehicle, rejecting a blank id
    pub fn new(id: impl Into<String>, class: VehicleClass) -> Result<Self, VehicleError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(VehicleError::EmptyId);
        }
        Ok(Self { id, class })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn class(&self) -> VehicleClass {
        self.class
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.class)
    }
}
