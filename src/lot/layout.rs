//! Facility layout: the one-time floor/spot configuration

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::errors::{LotError, LotResult};
use super::floor::{Floor, FloorSpec};
use super::spot::SpotSpec;

/// Floors in registration order, each with its spots in creation order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityLayout {
    pub floors: Vec<FloorSpec>,
}

impl FacilityLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style floor registration
    pub fn with_floor(mut self, id: impl Into<String>, spots: Vec<SpotSpec>) -> Self {
        self.floors.push(FloorSpec::new(id, spots));
        self
    }

    /// Total number of spots across all floors
    pub fn capacity(&self) -> usize {
        self.floors.iter().map(|f| f.spots.len()).sum()
    }

    /// Check the layout without building it.
    ///
    /// Rejects: no floors, empty or duplicate floor ids, empty spot ids and
    /// spot ids duplicated within a floor.
    pub fn validate(&self) -> LotResult<()> {
        self.build().map(|_| ())
    }

    /// Materialize floors, in registration order
    pub fn build(&self) -> LotResult<Vec<Floor>> {
        if self.floors.is_empty() {
            return Err(LotError::NoFloors);
        }

        let mut seen = HashSet::new();
        let mut floors = Vec::with_capacity(self.floors.len());
        for (ordinal, spec) in self.floors.iter().enumerate() {
            if !seen.insert(spec.id.as_str()) {
                return Err(LotError::DuplicateFloor(spec.id.clone()));
            }
            floors.push(Floor::from_spec(spec, ordinal)?);
        }
        Ok(floors)
    }
}
