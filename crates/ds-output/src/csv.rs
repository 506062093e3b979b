//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `tick_metrics.csv`
//! - `mutation_events.csv`
//! - `driver_snapshots.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{DriverSnapshotRow, MutationEventRow, OutputResult, TickMetricsRow};

pub const TICK_METRICS_HEADER: [&str; 14] = [
    "tick",
    "trips_completed",
    "mutations",
    "performance_low_earnings",
    "performance_high_earnings",
    "exit_greedy",
    "exit_earnings",
    "stagnation_exploration",
    "greedy_drivers",
    "earnings_max_drivers",
    "lazy_drivers",
    "drivers_with_data",
    "mean_average_fare",
    "stagnated_drivers",
];

pub const MUTATION_EVENTS_HEADER: [&str; 5] = ["tick", "driver_id", "from", "to", "reason"];

pub const DRIVER_SNAPSHOTS_HEADER: [&str; 9] = [
    "driver_id",
    "tick",
    "behavior",
    "x",
    "y",
    "cooldown_until",
    "trips_completed",
    "lifetime_earnings",
    "rolling_average",
];

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    metrics:   Writer<File>,
    events:    Writer<File>,
    snapshots: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the three CSV files in `dir` and write the header
    /// rows.  `dir` must already exist.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut metrics = Writer::from_path(dir.join("tick_metrics.csv"))?;
        metrics.write_record(TICK_METRICS_HEADER)?;

        let mut events = Writer::from_path(dir.join("mutation_events.csv"))?;
        events.write_record(MUTATION_EVENTS_HEADER)?;

        let mut snapshots = Writer::from_path(dir.join("driver_snapshots.csv"))?;
        snapshots.write_record(DRIVER_SNAPSHOTS_HEADER)?;

        Ok(Self {
            metrics,
            events,
            snapshots,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_tick_metrics(&mut self, row: &TickMetricsRow) -> OutputResult<()> {
        self.metrics.write_record(&[
            row.tick.to_string(),
            row.trips_completed.to_string(),
            row.mutations.to_string(),
            row.low_earnings.to_string(),
            row.high_earnings.to_string(),
            row.exit_greedy.to_string(),
            row.exit_earnings.to_string(),
            row.exploration.to_string(),
            row.greedy_drivers.to_string(),
            row.earnings_max_drivers.to_string(),
            row.lazy_drivers.to_string(),
            row.drivers_with_data.to_string(),
            row.mean_average_fare.to_string(),
            row.stagnated_drivers.to_string(),
        ])?;
        Ok(())
    }

    fn write_mutation_events(&mut self, rows: &[MutationEventRow]) -> OutputResult<()> {
        for row in rows {
            self.events.write_record(&[
                row.tick.to_string(),
                row.driver_id.to_string(),
                row.from.to_owned(),
                row.to.to_owned(),
                row.reason.to_owned(),
            ])?;
        }
        Ok(())
    }

    fn write_snapshots(&mut self, rows: &[DriverSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.driver_id.to_string(),
                row.tick.to_string(),
                row.behavior.to_owned(),
                row.x.to_string(),
                row.y.to_string(),
                row.cooldown_until.to_string(),
                row.trips_completed.to_string(),
                row.lifetime_earnings.to_string(),
                // Empty field for drivers with no fares yet.
                row.rolling_average.map(|a| a.to_string()).unwrap_or_default(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.metrics.flush()?;
        self.events.flush()?;
        self.snapshots.flush()?;
        Ok(())
    }
}
