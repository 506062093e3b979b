//! The `Sim` struct and its tick loop.

use ds_core::{SimClock, SimConfig, SimRng};
use ds_driver::DriverStore;
use ds_mutation::{MutationEngine, MutationLedger};
use tracing::{debug, info};

use crate::{Dispatcher, MetricsRecorder, SimObserver};

// ── RunSummary ────────────────────────────────────────────────────────────────

/// Totals for one call to [`Sim::run`] or [`Sim::run_ticks`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks:     u64,
    pub mutations: usize,
    pub trips:     usize,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<D>` holds all simulation state and drives the four-step tick loop
/// described in the [crate docs](crate).  Dispatch and mutation draw from
/// the same [`SimRng`], always in ascending `DriverId` order, so a fixed
/// seed reproduces a run exactly.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<D: Dispatcher> {
    /// Global configuration (total ticks, seed, snapshot interval).
    pub config: SimConfig,

    pub clock: SimClock,

    /// The fleet.
    pub drivers: DriverStore,

    /// Validated mutation rules and the policy parameters swaps instantiate.
    pub engine: MutationEngine,

    /// Append-only record of every mutation fired so far.
    pub ledger: MutationLedger,

    /// Per-tick time series, filled after each clock advance.
    pub metrics: MetricsRecorder,

    pub dispatcher: D,

    /// The one generator for the whole run.
    pub rng: SimRng,
}

impl<D: Dispatcher> Sim<D> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> RunSummary {
        let end = self.config.end_tick();
        info!(
            drivers = self.drivers.count(),
            start = self.clock.current_tick().0,
            end = end.0,
            "simulation starting"
        );

        let mut summary = RunSummary::default();
        while self.clock.current_tick() < end {
            self.step(observer, &mut summary);
        }
        observer.on_sim_end(self.clock.current_tick());

        info!(
            ticks = summary.ticks,
            mutations = summary.mutations,
            trips = summary.trips,
            "simulation finished"
        );
        summary
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.  Does not call
    /// `on_sim_end`.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> RunSummary {
        let mut summary = RunSummary::default();
        for _ in 0..n {
            self.step(observer, &mut summary);
        }
        summary
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn step<O: SimObserver>(&mut self, observer: &mut O, summary: &mut RunSummary) {
        let now = self.clock.current_tick();
        observer.on_tick_start(now);

        // ── ① Dispatch: decisions use the policy each driver held at the
        //    start of the tick.
        let trips = self.dispatcher.dispatch(now, &mut self.drivers, &mut self.rng);

        // ── ② Mutation: events are stamped `now`.
        let fired = self
            .engine
            .run_tick(&mut self.drivers, now, &mut self.ledger, &mut self.rng);

        // ── ③ Advance.
        self.clock.advance();

        // ── ④ Metrics: reads the ledger at elapsed_tick() == now.
        if let Some(sample) =
            self.metrics
                .record(&self.clock, &self.ledger, &self.drivers, trips)
        {
            observer.on_tick_end(sample.tick, self.ledger.events_at(sample.tick), &sample);
        }

        if self.config.output_interval_ticks > 0
            && now.0.is_multiple_of(self.config.output_interval_ticks)
        {
            observer.on_snapshot(now, &self.drivers);
        }

        debug!(tick = now.0, trips, mutations = fired, "tick complete");
        summary.ticks += 1;
        summary.trips += trips;
        summary.mutations += fired;
    }
}
