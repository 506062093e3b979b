//! Plain data row types written by output backends.

use ds_behavior::BehaviorKind;
use ds_core::Tick;
use ds_driver::Driver;
use ds_mutation::{MutationEvent, MutationReason};
use ds_sim::TickSample;

/// One line of `tick_metrics.csv`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickMetricsRow {
    pub tick:                 u64,
    pub trips_completed:      u64,
    pub mutations:            u64,
    pub low_earnings:         u64,
    pub high_earnings:        u64,
    pub exit_greedy:          u64,
    pub exit_earnings:        u64,
    pub exploration:          u64,
    pub greedy_drivers:       u64,
    pub earnings_max_drivers: u64,
    pub lazy_drivers:         u64,
    pub drivers_with_data:    u64,
    /// 0.0 when no driver has any fare on record.
    pub mean_average_fare:    f64,
    pub stagnated_drivers:    u64,
}

impl From<&TickSample> for TickMetricsRow {
    fn from(s: &TickSample) -> Self {
        let reason = |r: MutationReason| s.reason_count(r) as u64;
        let kind = |k: BehaviorKind| s.behavior_count(k) as u64;
        Self {
            tick:                 s.tick.0,
            trips_completed:      s.trips_completed as u64,
            mutations:            s.mutations as u64,
            low_earnings:         reason(MutationReason::PerformanceLowEarnings),
            high_earnings:        reason(MutationReason::PerformanceHighEarnings),
            exit_greedy:          reason(MutationReason::ExitGreedy),
            exit_earnings:        reason(MutationReason::ExitEarnings),
            exploration:          reason(MutationReason::StagnationExploration),
            greedy_drivers:       kind(BehaviorKind::Greedy),
            earnings_max_drivers: kind(BehaviorKind::EarningsMax),
            lazy_drivers:         kind(BehaviorKind::Lazy),
            drivers_with_data:    s.drivers_with_data as u64,
            mean_average_fare:    s.mean_average_fare,
            stagnated_drivers:    s.stagnated_drivers as u64,
        }
    }
}

/// One line of `mutation_events.csv`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationEventRow {
    pub tick:      u64,
    pub driver_id: u32,
    pub from:      &'static str,
    pub to:        &'static str,
    pub reason:    &'static str,
}

impl From<&MutationEvent> for MutationEventRow {
    fn from(e: &MutationEvent) -> Self {
        Self {
            tick:      e.tick.0,
            driver_id: e.driver.0,
            from:      e.from.as_str(),
            to:        e.to.as_str(),
            reason:    e.reason.as_str(),
        }
    }
}

/// A snapshot of one driver at a given tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriverSnapshotRow {
    pub driver_id:         u32,
    pub tick:              u64,
    pub behavior:          &'static str,
    pub x:                 f64,
    pub y:                 f64,
    /// First tick at which the driver may mutate again.
    pub cooldown_until:    u64,
    pub trips_completed:   u64,
    pub lifetime_earnings: f64,
    /// Rolling average fare; `None` while the history is empty.
    pub rolling_average:   Option<f64>,
}

impl DriverSnapshotRow {
    pub fn capture(driver: &Driver, tick: Tick) -> Self {
        Self {
            driver_id:         driver.id.0,
            tick:              tick.0,
            behavior:          driver.behavior_kind().as_str(),
            x:                 driver.position.x,
            y:                 driver.position.y,
            cooldown_until:    driver.cooldown_until.0,
            trips_completed:   driver.trips_completed,
            lifetime_earnings: driver.lifetime_earnings,
            rolling_average:   driver.earnings.average().ok(),
        }
    }
}
