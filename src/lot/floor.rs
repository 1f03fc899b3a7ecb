//! Floor: an ordered, append-only run of spots with first-fit search

use serde::{Deserialize, Serialize};

use super::errors::{LotError, LotResult};
use super::spot::{Spot, SpotSpec};
use crate::vehicle::VehicleClass;

/// Setup description of one floor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorSpec {
    pub id: String,
    #[serde(default)]
    pub spots: Vec<SpotSpec>,
}

impl FloorSpec {
    pub fn new(id: impl Into<String>, spots: Vec<SpotSpec>) -> Self {
        Self {
            id: id.into(),
            spots,
        }
    }
}

/// A floor of the facility
#[derive(Debug, Clone)]
pub struct Floor {
    id: String,
    ordinal: usize,
    spots: Vec<Spot>,
}

impl Floor {
    /// Create an empty floor at position `ordinal`
    pub fn new(id: impl Into<String>, ordinal: usize) -> Self {
        Self {
            id: id.into(),
            ordinal,
            spots: Vec::new(),
        }
    }

    /// Build a floor from its spec, enforcing unique non-empty spot ids
    pub fn from_spec(spec: &FloorSpec, ordinal: usize) -> LotResult<Self> {
        if spec.id.trim().is_empty() {
            return Err(LotError::EmptyFloorId);
        }
        let mut floor = Floor::new(spec.id.clone(), ordinal);
        for spot in &spec.spots {
            floor.add_spot(spot)?;
        }
        Ok(floor)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    pub fn spots(&self) -> &[Spot] {
        &self.spots
    }

    pub fn spot(&self, index: usize) -> Option<&Spot> {
        self.spots.get(index)
    }

    pub fn spot_mut(&mut self, index: usize) -> Option<&mut Spot> {
        self.spots.get_mut(index)
    }

    /// Append a spot. Existing spot positions are unchanged.
    pub fn add_spot(&mut self, spec: &SpotSpec) -> LotResult<usize> {
        if spec.id.trim().is_empty() {
            return Err(LotError::EmptySpotId {
                floor_id: self.id.clone(),
            });
        }
        if self.spots.iter().any(|s| s.id() == spec.id) {
            return Err(LotError::DuplicateSpot {
                floor_id: self.id.clone(),
                spot_id: spec.id.clone(),
            });
        }
        self.spots.push(Spot::from(spec));
        Ok(self.spots.len() - 1)
    }

    /// Index of the first spot, in creation order, that can fit `class`
    pub fn find_available(&self, class: VehicleClass) -> Option<usize> {
        self.spots.iter().position(|s| s.can_fit(class))
    }

    pub fn len(&self) -> usize {
        self.spots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }

    pub fn occupied_count(&self) -> usize {
        self.spots.iter().filter(|s| s.is_occupied()).count()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::vehicle::Vehicle;

    fn mixed_floor() -> Floor {
        Floor::from_spec(
            &FloorSpec::new(
                "F1",
                vec![
                    SpotSpec::new("S1", VehicleClass::Car),
                    SpotSpec::new("S2", VehicleClass::Bike),
                    SpotSpec::new("S3", VehicleClass::Truck),
                ],
            ),
            0,
        )
        .unwrap()
    }

    fn vehicle(id: &str, class: VehicleClass) -> Arc<Vehicle> {
        Arc::new(Vehicle::new(id, class).unwrap())
    }

    #[test]
    fn test_first_fit_in_creation_order() {
        let floor = mixed_floor();
        // Bike fits everywhere; the first spot wins
        assert_eq!(floor.find_available(VehicleClass::Bike), Some(0));
        assert_eq!(floor.find_available(VehicleClass::Car), Some(0));
        assert_eq!(floor.find_available(VehicleClass::Truck), Some(2));
    }

    #[test]
    fn test_first_fit_skips_occupied() {
        let mut floor = mixed_floor();
        floor
            .spot_mut(0)
            .unwrap()
            .occupy(vehicle("C1", VehicleClass::Car))
            .unwrap();
        assert_eq!(floor.find_available(VehicleClass::Bike), Some(1));
        assert_eq!(floor.find_available(VehicleClass::Car), Some(2));
        assert_eq!(floor.occupied_count(), 1);
    }

    #[test]
    fn test_find_available_none_when_full() {
        let mut floor = mixed_floor();
        floor
            .spot_mut(2)
            .unwrap()
            .occupy(vehicle("T1", VehicleClass::Truck))
            .unwrap();
        assert_eq!(floor.find_available(VehicleClass::Truck), None);
    }

    #[test]
    fn test_duplicate_spot_rejected() {
        let spec = FloorSpec::new(
            "F1",
            vec![
                SpotSpec::new("S1", VehicleClass::Car),
                SpotSpec::new("S1", VehicleClass::Bike),
            ],
        );
        assert_eq!(
            Floor::from_spec(&spec, 0).unwrap_err(),
            LotError::DuplicateSpot {
                floor_id: "F1".into(),
                spot_id: "S1".into()
            }
        );
    }

    #[test]
    fn test_empty_ids_rejected() {
        assert_eq!(
            Floor::from_spec(&FloorSpec::new(" ", vec![]), 0).unwrap_err(),
            LotError::EmptyFloorId
        );
        let mut floor = Floor::new("F1", 0);
        assert!(matches!(
            floor.add_spot(&SpotSpec::new("", VehicleClass::Car)),
            Err(LotError::EmptySpotId { .. })
        ));
    }

    #[test]
    fn test_add_spot_is_append_only() {
        let mut floor = mixed_floor();
        let idx = floor.add_spot(&SpotSpec::new("S4", VehicleClass::Truck)).unwrap();
        assert_eq!(idx, 3);
        let ids: Vec<&str> = floor.spots().iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec!["S1", "S2", "S3", "S4"]);
    }
}
