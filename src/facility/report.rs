//! Occupancy reporting

use serde::Serialize;

use crate::vehicle::VehicleClass;

/// Spot counts per capacity class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassCounts {
    pub bike: usize,
    pub car: usize,
    pub truck: usize,
}

impl ClassCounts {
    pub fn increment(&mut self, class: VehicleClass) {
        match class {
            VehicleClass::Bike => self.bike += 1,
            VehicleClass::Car => self.car += 1,
            VehicleClass::Truck => self.truck += 1,
        }
    }

    pub fn get(&self, class: VehicleClass) -> usize {
        match class {
            VehicleClass::Bike => self.bike,
            VehicleClass::Car => self.car,
            VehicleClass::Truck => self.truck,
        }
    }

    /// Free spots able to host `class`: every capacity at or above it
    pub fn fitting(&self, class: VehicleClass) -> usize {
        VehicleClass::ALL
            .iter()
            .filter(|c| c.accommodates(class))
            .map(|c| self.get(*c))
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FloorOccupancy {
    pub floor_id: String,
    pub total: usize,
    pub occupied: usize,
    pub free_by_capacity: ClassCounts,
}

/// Consistent snapshot of the whole facility, taken under the allocation lock
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OccupancyReport {
    pub total: usize,
    pub occupied: usize,
    pub open_tickets: usize,
    pub floors: Vec<FloorOccupancy>,
}

impl OccupancyReport {
    pub fn free(&self) -> usize {
        self.total - self.occupied
    }

    /// Free spots across all floors that could host `class` right now
    pub fn available_for(&self, class: VehicleClass) -> usize {
        self.floors
            .iter()
            .map(|f| f.free_by_capacity.fitting(class))
            .sum()
    }
}
