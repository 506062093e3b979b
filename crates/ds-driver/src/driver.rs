//! One driver's mutable state.

use ds_behavior::{BehaviorKind, BehaviorPolicy};
use ds_core::{DriverId, Point, Tick};

use crate::EarningsHistory;

/// A single driver in the fleet.
///
/// The mutation engine writes `behavior` and `cooldown_until`; the dispatch
/// layer writes `position` and the trip bookkeeping via
/// [`record_trip`](Self::record_trip).
#[derive(Clone, Debug)]
pub struct Driver {
    pub id: DriverId,

    /// Current location on the service area.
    pub position: Point,

    /// The acceptance policy consulted for every offer.
    pub behavior: BehaviorPolicy,

    /// Mutation evaluation is skipped while `tick < cooldown_until`.
    pub cooldown_until: Tick,

    /// Rolling window of recent fares.
    pub earnings: EarningsHistory,

    /// Tick of the most recent completed trip, if any.
    pub last_trip_at: Option<Tick>,

    pub trips_completed: u64,

    pub lifetime_earnings: f64,
}

impl Driver {
    pub fn new(id: DriverId, position: Point, behavior: BehaviorPolicy) -> Self {
        Self {
            id,
            position,
            behavior,
            cooldown_until:    Tick::ZERO,
            earnings:          EarningsHistory::new(),
            last_trip_at:      None,
            trips_completed:   0,
            lifetime_earnings: 0.0,
        }
    }

    #[inline]
    pub fn behavior_kind(&self) -> BehaviorKind {
        self.behavior.kind()
    }

    /// `true` while the driver may not mutate at `tick`.
    #[inline]
    pub fn in_cooldown(&self, tick: Tick) -> bool {
        tick < self.cooldown_until
    }

    /// Book a completed trip paying `fare` at `tick`.
    pub fn record_trip(&mut self, fare: f64, tick: Tick) {
        self.earnings.append(fare);
        self.trips_completed += 1;
        self.lifetime_earnings += fare;
        self.last_trip_at = Some(tick);
    }

    /// Ticks since the last completed trip; since tick 0 if there was none.
    pub fn idle_ticks(&self, now: Tick) -> u64 {
        now.since(self.last_trip_at.unwrap_or(Tick::ZERO))
    }
}
