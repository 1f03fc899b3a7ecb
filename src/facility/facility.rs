//! The parking facility orchestrator
//!
//! Lifecycle of one stay: park -> occupy -> unpark -> price -> pay.
//!
//! Locking:
//! - one mutex guards floors, spots, open tickets and the token minter
//! - park holds it across search + occupy + ticket registration
//! - unpark holds it across lookup + remove + close + release, then drops it
//!   before pricing and payment
//! - logging and metrics happen after the lock is released
//!
//! The pricing policy sits behind its own `RwLock` so it can be swapped
//! without touching allocation state. Each unpark uses the policy current
//! at that moment; tickets do not pin the policy they were opened under.

use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use super::errors::{FacilityError, FacilityResult};
use super::outcome::{ParkOutcome, Settlement, UnparkOutcome};
use super::report::OccupancyReport;
use super::state::{Allocation, AllocationState};
use crate::clock::{Clock, SystemClock};
use crate::lot::{FacilityLayout, LotError, SpotHandle, SpotSpec};
use crate::observability::{log_event_with_fields, Event, FacilityMetrics, MetricsSnapshot};
use crate::payment::{PaymentCapability, PaymentStatus};
use crate::pricing::{HourlyPricing, PricingPolicy};
use crate::ticket::{TicketView, TokenMinter, TokenScheme};
use crate::vehicle::{Vehicle, VehicleClass};

/// Configures and builds a `ParkingFacility`
pub struct FacilityBuilder {
    layout: FacilityLayout,
    pricing: Option<Arc<dyn PricingPolicy>>,
    clock: Arc<dyn Clock>,
    token_scheme: TokenScheme,
}

impl FacilityBuilder {
    pub fn new(layout: FacilityLayout) -> Self {
        Self {
            layout,
            pricing: None,
            clock: Arc::new(SystemClock),
            token_scheme: TokenScheme::default(),
        }
    }

    pub fn pricing(mut self, policy: Arc<dyn PricingPolicy>) -> Self {
        self.pricing = Some(policy);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn token_scheme(mut self, scheme: TokenScheme) -> Self {
        self.token_scheme = scheme;
        self
    }

    /// Validate the layout and build the facility.
    ///
    /// Defaults to hourly pricing with the standard rate card when no
    /// policy was given.
    pub fn build(self) -> FacilityResult<ParkingFacility> {
        let floors = self.layout.build()?;
        let pricing = self
            .pricing
            .unwrap_or_else(|| Arc::new(HourlyPricing::default()));

        let floor_count = floors.len().to_string();
        let capacity = self.layout.capacity().to_string();
        log_event_with_fields(
            Event::FacilitySetup,
            &[
                ("capacity", capacity.as_str()),
                ("floors", floor_count.as_str()),
                ("pricing", pricing.name()),
            ],
        );

        Ok(ParkingFacility {
            state: Mutex::new(AllocationState::new(
                floors,
                TokenMinter::new(self.token_scheme),
            )),
            pricing: RwLock::new(pricing),
            clock: self.clock,
            metrics: FacilityMetrics::new(),
        })
    }
}

/// A multi-floor parking facility, safe to share across threads via `Arc`
pub struct ParkingFacility {
    state: Mutex<AllocationState>,
    pricing: RwLock<Arc<dyn PricingPolicy>>,
    clock: Arc<dyn Clock>,
    metrics: FacilityMetrics,
}

impl ParkingFacility {
    /// One-time setup with the system clock and sequential tokens
    pub fn setup(layout: FacilityLayout, pricing: Arc<dyn PricingPolicy>) -> FacilityResult<Self> {
        FacilityBuilder::new(layout).pricing(pricing).build()
    }

    pub fn builder(layout: FacilityLayout) -> FacilityBuilder {
        FacilityBuilder::new(layout)
    }

    fn lock_state(&self) -> FacilityResult<MutexGuard<'_, AllocationState>> {
        self.state.lock().map_err(|_| FacilityError::poisoned())
    }

    /// Surface a lot error from inside the critical section
    fn broken(&self, err: LotError) -> FacilityError {
        if err.is_invariant_violation() {
            let detail = err.to_string();
            log_event_with_fields(
                Event::InvariantViolated,
                &[("code", err.code()), ("detail", detail.as_str())],
            );
        }
        FacilityError::Lot(err)
    }

    /// Assign the vehicle to the first compatible free spot.
    ///
    /// Floors are scanned in registration order and spots in creation order.
    pub fn park(&self, vehicle: Vehicle) -> FacilityResult<ParkOutcome> {
        let vehicle = Arc::new(vehicle);
        let allocation = {
            let mut state = self.lock_state()?;
            state.allocate(Arc::clone(&vehicle), self.clock.now())
        }
        .map_err(|e| self.broken(e))?;

        let outcome = match allocation {
            Allocation::Parked(receipt) => {
                self.metrics.record_park();
                log_event_with_fields(
                    Event::VehicleParked,
                    &[
                        ("class", vehicle.class().as_str()),
                        ("floor", receipt.location.floor_id.as_str()),
                        ("spot", receipt.location.spot_id.as_str()),
                        ("ticket", receipt.token.as_str()),
                        ("vehicle", vehicle.id()),
                    ],
                );
                ParkOutcome::Parked(receipt)
            }
            Allocation::Full => {
                self.metrics.record_full();
                log_event_with_fields(
                    Event::FacilityFull,
                    &[("class", vehicle.class().as_str()), ("vehicle", vehicle.id())],
                );
                ParkOutcome::FacilityFull
            }
            Allocation::AlreadyParked(token) => {
                self.metrics.record_duplicate();
                log_event_with_fields(
                    Event::VehicleAlreadyParked,
                    &[("ticket", token.as_str()), ("vehicle", vehicle.id())],
                );
                ParkOutcome::AlreadyParked { token }
            }
        };
        Ok(outcome)
    }

    /// Build the vehicle and park it
    pub fn park_vehicle(
        &self,
        vehicle_id: impl Into<String>,
        class: VehicleClass,
    ) -> FacilityResult<ParkOutcome> {
        self.park(Vehicle::new(vehicle_id, class)?)
    }

    /// Close the ticket, free its spot, price the stay and collect payment.
    ///
    /// A declined payment does not undo the release: the vehicle has left.
    /// It is reported as `PaymentFailed` with the computed fee.
    pub fn unpark<P>(&self, token: impl AsRef<str>, payment: &P) -> FacilityResult<UnparkOutcome>
    where
        P: PaymentCapability + ?Sized,
    {
        let token = token.as_ref();
        let closed = {
            let mut state = self.lock_state()?;
            state.release(token, self.clock.now())
        }
        .map_err(|e| self.broken(e))?;

        let Some(closed) = closed else {
            self.metrics.record_invalid_ticket();
            log_event_with_fields(Event::InvalidTicket, &[("ticket", token)]);
            return Ok(UnparkOutcome::InvalidTicket);
        };

        let policy = self.pricing_policy()?;
        let fee = policy.calculate(closed.entry, closed.exit, closed.vehicle.class());
        let status = payment.pay(fee);
        let paid = status.is_approved();
        self.metrics.record_unpark(fee.minor(), paid);

        let amount = fee.to_string();
        if let PaymentStatus::Declined { reason } = &status {
            log_event_with_fields(
                Event::PaymentFailed,
                &[
                    ("fee", amount.as_str()),
                    ("reason", reason.as_str()),
                    ("ticket", token),
                ],
            );
        }
        log_event_with_fields(
            Event::VehicleUnparked,
            &[
                ("fee", amount.as_str()),
                ("floor", closed.location.floor_id.as_str()),
                ("pricing", policy.name()),
                ("spot", closed.location.spot_id.as_str()),
                ("ticket", token),
                ("vehicle", closed.vehicle.id()),
            ],
        );

        let settlement = Settlement {
            token: closed.token,
            vehicle: closed.vehicle,
            location: closed.location,
            entry: closed.entry,
            exit: closed.exit,
            fee,
            policy: policy.name(),
            payment: status,
        };
        Ok(if paid {
            UnparkOutcome::Paid(settlement)
        } else {
            UnparkOutcome::PaymentFailed(settlement)
        })
    }

    /// The policy that the next unpark will use
    pub fn pricing_policy(&self) -> FacilityResult<Arc<dyn PricingPolicy>> {
        self.pricing
            .read()
            .map(|p| Arc::clone(&*p))
            .map_err(|_| FacilityError::Internal("Pricing lock poisoned".into()))
    }

    /// Replace the pricing policy. Open tickets are priced by the new
    /// policy when they unpark.
    pub fn set_pricing_policy(&self, policy: Arc<dyn PricingPolicy>) -> FacilityResult<()> {
        let name = policy.name();
        {
            let mut current = self
                .pricing
                .write()
                .map_err(|_| FacilityError::Internal("Pricing lock poisoned".into()))?;
            *current = policy;
        }
        self.metrics.record_policy_swap();
        log_event_with_fields(Event::PricingPolicySwapped, &[("pricing", name)]);
        Ok(())
    }

    /// Append a spot to an existing floor. Existing spot order is kept.
    pub fn add_spot(&self, floor_id: &str, spec: SpotSpec) -> FacilityResult<SpotHandle> {
        let handle = {
            let mut state = self.lock_state()?;
            state.add_spot(floor_id, &spec)?
        };
        log_event_with_fields(
            Event::SpotAdded,
            &[
                ("class", spec.class.as_str()),
                ("floor", floor_id),
                ("spot", spec.id.as_str()),
            ],
        );
        Ok(handle)
    }

    /// Lookup of an open ticket
    pub fn ticket(&self, token: impl AsRef<str>) -> FacilityResult<Option<TicketView>> {
        Ok(self.lock_state()?.ticket(token.as_ref()))
    }

    /// All open tickets, oldest first
    pub fn open_tickets(&self) -> FacilityResult<Vec<TicketView>> {
        Ok(self.lock_state()?.open_tickets())
    }

    /// Consistent occupancy snapshot
    pub fn occupancy(&self) -> FacilityResult<OccupancyReport> {
        Ok(self.lock_state()?.report())
    }

    /// Check that occupied spots and open tickets agree one-to-one
    pub fn check_consistency(&self) -> FacilityResult<()> {
        self.lock_state()?
            .verify()
            .map_err(FacilityError::Inconsistent)
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

impl std::fmt::Debug for ParkingFacility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParkingFacility")
            .field("metrics", &self.metrics.snapshot())
            .finish_non_exhaustive()
    }
}
