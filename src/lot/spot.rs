//! Single-slot occupancy cell
//!
//! A spot is either free or holds exactly one vehicle. Capacity is fixed at
//! creation and never reclassified.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::errors::{LotError, LotResult};
use crate::vehicle::{Vehicle, VehicleClass};

/// Stable arena handle for a spot: floor position plus spot position.
///
/// Floors and spots are append-only, so a handle never dangles or moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpotHandle {
    pub floor: usize,
    pub index: usize,
}

impl SpotHandle {
    pub fn new(floor: usize, index: usize) -> Self {
        Self { floor, index }
    }
}

/// Setup description of one spot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotSpec {
    pub id: String,
    pub class: VehicleClass,
}

impl SpotSpec {
    pub fn new(id: impl Into<String>, class: VehicleClass) -> Self {
        Self {
            id: id.into(),
            class,
        }
    }
}

/// A parking spot
#[derive(Debug, Clone)]
pub struct Spot {
    id: String,
    capacity: VehicleClass,
    occupant: Option<Arc<Vehicle>>,
}

impl Spot {
    /// Create a free spot
    pub fn new(id: impl Into<String>, capacity: VehicleClass) -> Self {
        Self {
            id: id.into(),
            capacity,
            occupant: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn capacity(&self) -> VehicleClass {
        self.capacity
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    pub fn occupant(&self) -> Option<&Arc<Vehicle>> {
        self.occupant.as_ref()
    }

    /// True iff the spot is free and its capacity covers `class`
    pub fn can_fit(&self, class: VehicleClass) -> bool {
        !self.is_occupied() && self.capacity.accommodates(class)
    }

    /// Mark occupied by `vehicle`.
    ///
    /// Fails if the spot already holds a vehicle. Callers are expected to
    /// have checked `can_fit` in the same critical section.
    pub fn occupy(&mut self, vehicle: Arc<Vehicle>) -> LotResult<()> {
        if self.is_occupied() {
            return Err(LotError::SpotOccupied(self.id.clone()));
        }
        self.occupant = Some(vehicle);
        Ok(())
    }

    /// Free the spot, returning the vehicle that held it
    pub fn release(&mut self) -> LotResult<Arc<Vehicle>> {
        self.occupant
            .take()
            .ok_or_else(|| LotError::SpotVacant(self.id.clone()))
    }
}

impl From<&SpotSpec> for Spot {
    fn from(spec: &SpotSpec) -> Self {
        Spot::new(spec.id.clone(), spec.class)
    }
}
