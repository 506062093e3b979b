//! Per-tick time series and the recorder that fills it.
//!
//! The recorder runs after the clock has advanced, so it always reads the
//! ledger at [`SimClock::elapsed_tick`], the tick that just finished.  See
//! the elapsed-tick contract in [`ds_core::time`].

use ds_behavior::BehaviorKind;
use ds_core::{SimClock, Tick};
use ds_driver::DriverStore;
use ds_mutation::{MutationLedger, MutationReason, MutationRuleConfig};

// ── TickSample ────────────────────────────────────────────────────────────────

/// Everything recorded for one elapsed tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickSample {
    pub tick: Tick,

    /// Trips booked by the dispatch phase.
    pub trips_completed: usize,

    /// Mutations fired during the tick.
    pub mutations: usize,

    /// Mutations per reason, in [`MutationReason::ALL`] order.
    pub by_reason: [usize; 5],

    /// Drivers per policy after the mutation phase, in
    /// [`BehaviorKind::ALL`] order.
    pub behavior_counts: [usize; 3],

    /// Drivers with at least one fare on record.
    pub drivers_with_data: usize,

    /// Mean of the rolling averages of drivers with data; 0.0 if none.
    pub mean_average_fare: f64,

    /// Drivers whose stagnation ratio is at or above the threshold.
    pub stagnated_drivers: usize,
}

impl TickSample {
    pub fn reason_count(&self, reason: MutationReason) -> usize {
        self.by_reason[reason.index()]
    }

    pub fn behavior_count(&self, kind: BehaviorKind) -> usize {
        self.behavior_counts[kind.index()]
    }
}

// ── TimeSeries ────────────────────────────────────────────────────────────────

/// Parallel arrays, one slot per elapsed tick.
///
/// Every array grows by exactly one element per [`push`](Self::push), so all
/// of them always share the same length.
#[derive(Clone, Debug, Default)]
pub struct TimeSeries {
    pub ticks:                Vec<Tick>,
    pub trips_completed:      Vec<usize>,
    pub mutations:            Vec<usize>,
    pub low_earnings:         Vec<usize>,
    pub high_earnings:        Vec<usize>,
    pub exit_greedy:          Vec<usize>,
    pub exit_earnings:        Vec<usize>,
    pub exploration:          Vec<usize>,
    pub greedy_drivers:       Vec<usize>,
    pub earnings_max_drivers: Vec<usize>,
    pub lazy_drivers:         Vec<usize>,
    pub drivers_with_data:    Vec<usize>,
    pub mean_average_fare:    Vec<f64>,
    pub stagnated_drivers:    Vec<usize>,
}

impl TimeSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one sample to every array.
    pub fn push(&mut self, s: &TickSample) {
        self.ticks.push(s.tick);
        self.trips_completed.push(s.trips_completed);
        self.mutations.push(s.mutations);
        self.low_earnings.push(s.reason_count(MutationReason::PerformanceLowEarnings));
        self.high_earnings.push(s.reason_count(MutationReason::PerformanceHighEarnings));
        self.exit_greedy.push(s.reason_count(MutationReason::ExitGreedy));
        self.exit_earnings.push(s.reason_count(MutationReason::ExitEarnings));
        self.exploration.push(s.reason_count(MutationReason::StagnationExploration));
        self.greedy_drivers.push(s.behavior_count(BehaviorKind::Greedy));
        self.earnings_max_drivers.push(s.behavior_count(BehaviorKind::EarningsMax));
        self.lazy_drivers.push(s.behavior_count(BehaviorKind::Lazy));
        self.drivers_with_data.push(s.drivers_with_data);
        self.mean_average_fare.push(s.mean_average_fare);
        self.stagnated_drivers.push(s.stagnated_drivers);
        debug_assert!(self.is_synced());
    }

    /// Number of ticks recorded.
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// `true` if every array has the same length.
    pub fn is_synced(&self) -> bool {
        let n = self.ticks.len();
        [
            self.trips_completed.len(),
            self.mutations.len(),
            self.low_earnings.len(),
            self.high_earnings.len(),
            self.exit_greedy.len(),
            self.exit_earnings.len(),
            self.exploration.len(),
            self.greedy_drivers.len(),
            self.earnings_max_drivers.len(),
            self.lazy_drivers.len(),
            self.drivers_with_data.len(),
            self.mean_average_fare.len(),
            self.stagnated_drivers.len(),
        ]
        .iter()
        .all(|&len| len == n)
    }

    /// Total mutations across the whole series.
    pub fn total_mutations(&self) -> usize {
        self.mutations.iter().sum()
    }
}

// ── MetricsRecorder ───────────────────────────────────────────────────────────

/// Builds one [`TickSample`] per elapsed tick and appends it to a
/// [`TimeSeries`].
#[derive(Clone, Debug)]
pub struct MetricsRecorder {
    stagnation_band:      f64,
    stagnation_threshold: f64,
    series:               TimeSeries,
}

impl MetricsRecorder {
    /// A recorder that classifies stagnation with the same band and
    /// threshold the engine uses.
    pub fn new(rules: &MutationRuleConfig) -> Self {
        let p = rules.params();
        Self {
            stagnation_band:      p.stagnation_band,
            stagnation_threshold: p.stagnation_ratio_threshold,
            series:               TimeSeries::new(),
        }
    }

    /// Record the tick that `clock` most recently finished.
    ///
    /// Must run after `clock.advance()`.  Returns `None` (and records
    /// nothing) if no tick has elapsed yet.
    pub fn record(
        &mut self,
        clock:           &SimClock,
        ledger:          &MutationLedger,
        drivers:         &DriverStore,
        trips_completed: usize,
    ) -> Option<TickSample> {
        let tick = clock.elapsed_tick()?;
        let by_reason = ledger.count_by_reason(tick);

        let mut drivers_with_data = 0;
        let mut average_sum = 0.0;
        let mut stagnated_drivers = 0;
        for driver in drivers {
            let Ok(avg) = driver.earnings.average() else {
                continue;
            };
            drivers_with_data += 1;
            average_sum += avg;
            if driver.earnings.stagnation_ratio_with_band(self.stagnation_band)
                >= self.stagnation_threshold
            {
                stagnated_drivers += 1;
            }
        }
        let mean_average_fare = if drivers_with_data > 0 {
            average_sum / drivers_with_data as f64
        } else {
            0.0
        };

        let sample = TickSample {
            tick,
            trips_completed,
            mutations: by_reason.iter().sum(),
            by_reason,
            behavior_counts: drivers.behavior_counts(),
            drivers_with_data,
            mean_average_fare,
            stagnated_drivers,
        };
        self.series.push(&sample);
        Some(sample)
    }

    pub fn series(&self) -> &TimeSeries {
        &self.series
    }

    pub fn into_series(self) -> TimeSeries {
        self.series
    }
}
