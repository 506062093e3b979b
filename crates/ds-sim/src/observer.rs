//! Simulation observer trait for progress reporting and data collection.

use ds_core::Tick;
use ds_driver::DriverStore;
use ds_mutation::MutationEvent;

use crate::TickSample;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
pub trait SimObserver {
    /// Called at the very start of each tick, before dispatch.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per tick after the clock has advanced and the metrics
    /// sample has been recorded.
    ///
    /// `tick` is the tick that just elapsed; `events` are the ledger
    /// entries stamped with it.
    fn on_tick_end(&mut self, _tick: Tick, _events: &[MutationEvent], _sample: &TickSample) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks`
    /// ticks) with the fleet as it stands after that tick's mutation phase.
    fn on_snapshot(&mut self, _tick: Tick, _drivers: &DriverStore) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
