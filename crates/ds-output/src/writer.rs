//! The `OutputWriter` trait implemented by backend writers.

use crate::{DriverSnapshotRow, MutationEventRow, OutputResult, TickMetricsRow};

/// Sink for the three output streams.
///
/// Errors are returned to [`SimOutputObserver`][crate::SimOutputObserver],
/// which keeps the first one for [`take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write one row of per-tick metrics.
    fn write_tick_metrics(&mut self, row: &TickMetricsRow) -> OutputResult<()>;

    /// Write the mutation events fired during one tick.
    fn write_mutation_events(&mut self, rows: &[MutationEventRow]) -> OutputResult<()>;

    /// Write a batch of driver snapshots.
    fn write_snapshots(&mut self, rows: &[DriverSnapshotRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
