//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use ds_core::Tick;
use ds_driver::DriverStore;
use ds_mutation::MutationEvent;
use ds_sim::{SimObserver, TickSample};

use crate::row::{DriverSnapshotRow, MutationEventRow, TickMetricsRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes tick metrics, mutation events, and driver
/// snapshots to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, _tick: Tick, events: &[MutationEvent], sample: &TickSample) {
        let result = self.writer.write_tick_metrics(&TickMetricsRow::from(sample));
        self.store_err(result);

        if !events.is_empty() {
            let rows: Vec<MutationEventRow> = events.iter().map(MutationEventRow::from).collect();
            let result = self.writer.write_mutation_events(&rows);
            self.store_err(result);
        }
    }

    fn on_snapshot(&mut self, tick: Tick, drivers: &DriverStore) {
        let rows: Vec<DriverSnapshotRow> = drivers
            .iter()
            .map(|d| DriverSnapshotRow::capture(d, tick))
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
