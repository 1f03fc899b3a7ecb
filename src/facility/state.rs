//! Allocation state guarded by the facility lock
//!
//! Everything in here assumes the caller holds the facility's single
//! mutex. Search, occupy and ticket registration happen in one call so no
//! two parks can land in the same spot.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::outcome::ParkReceipt;
use super::report::{ClassCounts, FloorOccupancy, OccupancyReport};
use crate::lot::{Floor, LotError, LotResult, Spot, SpotHandle, SpotSpec};
use crate::ticket::{ClosedTicket, SpotLocation, Ticket, TicketToken, TicketView, TokenMinter};
use crate::vehicle::Vehicle;

/// Result of one allocation attempt
#[derive(Debug)]
pub(crate) enum Allocation {
    Parked(ParkReceipt),
    Full,
    AlreadyParked(TicketToken),
}

#[derive(Debug)]
pub(crate) struct AllocationState {
    floors: Vec<Floor>,
    open: HashMap<TicketToken, Ticket>,
    /// vehicle id -> token of its open ticket
    by_vehicle: HashMap<String, TicketToken>,
    minter: TokenMinter,
}

impl AllocationState {
    pub(crate) fn new(floors: Vec<Floor>, minter: TokenMinter) -> Self {
        Self {
            floors,
            open: HashMap::new(),
            by_vehicle: HashMap::new(),
            minter,
        }
    }

    /// First-fit across floors in registration order
    fn find_spot(&self, vehicle: &Vehicle) -> Option<SpotHandle> {
        self.floors.iter().enumerate().find_map(|(f, floor)| {
            floor
                .find_available(vehicle.class())
                .map(|index| SpotHandle::new(f, index))
        })
    }

    fn location(&self, handle: SpotHandle) -> LotResult<SpotLocation> {
        let floor = self.floors.get(handle.floor).ok_or(LotError::BadHandle {
            floor: handle.floor,
            index: handle.index,
        })?;
        let spot = floor.spot(handle.index).ok_or(LotError::BadHandle {
            floor: handle.floor,
            index: handle.index,
        })?;
        Ok(SpotLocation {
            floor_id: floor.id().to_string(),
            spot_id: spot.id().to_string(),
        })
    }

    fn spot_mut(&mut self, handle: SpotHandle) -> LotResult<&mut Spot> {
        self.floors
            .get_mut(handle.floor)
            .and_then(|f| f.spot_mut(handle.index))
            .ok_or(LotError::BadHandle {
                floor: handle.floor,
                index: handle.index,
            })
    }

    /// Search, occupy and register a ticket as one unit
    pub(crate) fn allocate(
        &mut self,
        vehicle: Arc<Vehicle>,
        now: DateTime<Utc>,
    ) -> LotResult<Allocation> {
        if let Some(token) = self.by_vehicle.get(vehicle.id()) {
            return Ok(Allocation::AlreadyParked(token.clone()));
        }

        let Some(handle) = self.find_spot(&vehicle) else {
            return Ok(Allocation::Full);
        };

        let location = self.location(handle)?;
        self.spot_mut(handle)?.occupy(Arc::clone(&vehicle))?;

        let token = self.minter.mint();
        let receipt = ParkReceipt {
            token: token.clone(),
            vehicle_id: vehicle.id().to_string(),
            location: location.clone(),
            entry: now,
        };
        self.by_vehicle
            .insert(vehicle.id().to_string(), token.clone());
        self.open
            .insert(token.clone(), Ticket::open(token, vehicle, handle, location, now));

        Ok(Allocation::Parked(receipt))
    }

    /// Remove, close and free. `Ok(None)` for an unknown token.
    ///
    /// The ticket leaves the table before anything else so a replayed token
    /// can never release a spot twice.
    pub(crate) fn release(
        &mut self,
        token: &str,
        now: DateTime<Utc>,
    ) -> LotResult<Option<ClosedTicket>> {
        let Some(ticket) = self.open.remove(token) else {
            return Ok(None);
        };
        self.by_vehicle.remove(ticket.vehicle().id());

        let closed = ticket.close(now);
        self.spot_mut(closed.spot)?.release()?;
        Ok(Some(closed))
    }

    pub(crate) fn ticket(&self, token: &str) -> Option<TicketView> {
        self.open.get(token).map(Ticket::view)
    }

    pub(crate) fn open_tickets(&self) -> Vec<TicketView> {
        let mut views: Vec<TicketView> = self.open.values().map(Ticket::view).collect();
        views.sort_by(|a, b| a.entry.cmp(&b.entry).then_with(|| a.token.cmp(&b.token)));
        views
    }

    /// Append a spot to an existing floor
    pub(crate) fn add_spot(&mut self, floor_id: &str, spec: &SpotSpec) -> LotResult<SpotHandle> {
        let (f, floor) = self
            .floors
            .iter_mut()
            .enumerate()
            .find(|(_, floor)| floor.id() == floor_id)
            .ok_or_else(|| LotError::UnknownFloor(floor_id.to_string()))?;
        let index = floor.add_spot(spec)?;
        Ok(SpotHandle::new(f, index))
    }

    pub(crate) fn report(&self) -> OccupancyReport {
        let floors: Vec<FloorOccupancy> = self
            .floors
            .iter()
            .map(|floor| {
                let mut free = ClassCounts::default();
                for spot in floor.spots().iter().filter(|s| !s.is_occupied()) {
                    free.increment(spot.capacity());
                }
                FloorOccupancy {
                    floor_id: floor.id().to_string(),
                    total: floor.len(),
                    occupied: floor.occupied_count(),
                    free_by_capacity: free,
                }
            })
            .collect();

        OccupancyReport {
            total: floors.iter().map(|f| f.total).sum(),
            occupied: floors.iter().map(|f| f.occupied).sum(),
            open_tickets: self.open.len(),
            floors,
        }
    }

    /// Verify conservation and ticket/spot binding.
    ///
    /// Returns a description of the first inconsistency found.
    pub(crate) fn verify(&self) -> Result<(), String> {
        let occupied: usize = self.floors.iter().map(Floor::occupied_count).sum();
        if occupied != self.open.len() {
            return Err(format!(
                "{} occupied spots but {} open tickets",
                occupied,
                self.open.len()
            ));
        }
        if self.by_vehicle.len() != self.open.len() {
            return Err(format!(
                "{} vehicle index entries but {} open tickets",
                self.by_vehicle.len(),
                self.open.len()
            ));
        }
        for (token, ticket) in &self.open {
            let handle = ticket.spot();
            let spot = self
                .floors
                .get(handle.floor)
                .and_then(|f| f.spot(handle.index))
                .ok_or_else(|| format!("ticket {} points at missing spot", token))?;
            match spot.occupant() {
                Some(v) if Arc::ptr_eq(v, ticket.vehicle()) => {}
                _ => {
                    return Err(format!(
                        "ticket {} not bound to occupant of spot {}",
                        token,
                        spot.id()
                    ))
                }
            }
            if !spot.capacity().accommodates(ticket.vehicle_class()) {
                return Err(format!("ticket {} in undersized spot {}", token, spot.id()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::lot::{FacilityLayout, SpotSpec};
    use crate::ticket::TokenScheme;
    use crate::vehicle::VehicleClass;

    fn state(layout: FacilityLayout) -> AllocationState {
        AllocationState::new(layout.build().unwrap(), TokenMinter::new(TokenScheme::Sequential))
    }

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 9, minute, 0).unwrap()
    }

    fn vehicle(id: &str, class: VehicleClass) -> Arc<Vehicle> {
        Arc::new(Vehicle::new(id, class).unwrap())
    }

    fn two_floors() -> FacilityLayout {
        FacilityLayout::new()
            .with_floor("F1", vec![SpotSpec::new("A", VehicleClass::Bike)])
            .with_floor("F2", vec![SpotSpec::new("B", VehicleClass::Car)])
    }

    #[test]
    fn test_allocate_scans_floors_in_order() {
        let mut s = state(two_floors());
        let Allocation::Parked(r1) = s.allocate(vehicle("b1", VehicleClass::Bike), at(0)).unwrap()
        else {
            panic!("expected park")
        };
        assert_eq!(r1.location.floor_id, "F1");

        let Allocation::Parked(r2) = s.allocate(vehicle("b2", VehicleClass::Bike), at(1)).unwrap()
        else {
            panic!("expected park")
        };
        assert_eq!(r2.location.floor_id, "F2");
        assert!(matches!(
            s.allocate(vehicle("b3", VehicleClass::Bike), at(2)).unwrap(),
            Allocation::Full
        ));
        s.verify().unwrap();
    }

    #[test]
    fn test_duplicate_vehicle_rejected() {
        let mut s = state(two_floors());
        let Allocation::Parked(r) = s.allocate(vehicle("c1", VehicleClass::Car), at(0)).unwrap()
        else {
            panic!("expected park")
        };
        match s.allocate(vehicle("c1", VehicleClass::Car), at(1)).unwrap() {
            Allocation::AlreadyParked(token) => assert_eq!(token, r.token),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_release_is_one_shot() {
        let mut s = state(two_floors());
        let Allocation::Parked(r) = s.allocate(vehicle("c1", VehicleClass::Car), at(0)).unwrap()
        else {
            panic!("expected park")
        };
        let closed = s.release(r.token.as_str(), at(30)).unwrap().unwrap();
        assert_eq!(closed.exit, at(30));
        assert!(s.release(r.token.as_str(), at(31)).unwrap().is_none());
        assert_eq!(s.report().occupied, 0);
        s.verify().unwrap();
    }

    #[test]
    fn test_vehicle_can_return_after_release() {
        let mut s = state(two_floors());
        let Allocation::Parked(r) = s.allocate(vehicle("c1", VehicleClass::Car), at(0)).unwrap()
        else {
            panic!("expected park")
        };
        s.release(r.token.as_str(), at(5)).unwrap();
        assert!(matches!(
            s.allocate(vehicle("c1", VehicleClass::Car), at(6)).unwrap(),
            Allocation::Parked(_)
        ));
    }

    #[test]
    fn test_add_spot_unknown_floor() {
        let mut s = state(two_floors());
        assert_eq!(
            s.add_spot("F9", &SpotSpec::new("Z", VehicleClass::Car)),
            Err(LotError::UnknownFloor("F9".into()))
        );
        let handle = s.add_spot("F1", &SpotSpec::new("Z", VehicleClass::Truck)).unwrap();
        assert_eq!(handle, SpotHandle::new(0, 1));
    }

    #[test]
    fn test_report_counts_free_capacity() {
        let mut s = state(two_floors());
        s.allocate(vehicle("b1", VehicleClass::Bike), at(0)).unwrap();
        let report = s.report();
        assert_eq!(report.total, 2);
        assert_eq!(report.occupied, 1);
        assert_eq!(report.open_tickets, 1);
        assert_eq!(report.floors[0].free_by_capacity.bike, 0);
        assert_eq!(report.floors[1].free_by_capacity.car, 1);
    }

    #[test]
    fn test_open_tickets_sorted_by_entry() {
        let mut s = state(two_floors());
        s.allocate(vehicle("c1", VehicleClass::Car), at(10)).unwrap();
        s.allocate(vehicle("b1", VehicleClass::Bike), at(5)).unwrap();
        let views = s.open_tickets();
        assert_eq!(views[0].vehicle_id, "b1");
        assert_eq!(views[1].vehicle_id, "c1");
    }
}
