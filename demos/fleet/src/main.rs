//! fleet — run a dispatch fleet under adaptive behavior mutation.
//!
//! ```text
//! fleet [scenario.json] [output_dir]
//! ```
//!
//! Without a scenario file the built-in defaults are used (200 drivers, all
//! starting Lazy, 500 ticks, seed 42).  Output defaults to `output/fleet`.
//! Set `RUST_LOG=debug` to see every mutation as it fires.

mod dispatch;
mod scenario;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ds_behavior::BehaviorKind;
use ds_core::{Point, Tick};
use ds_driver::{DriverStore, DriverStoreBuilder};
use ds_mutation::{MutationEvent, MutationReason};
use ds_output::{CsvWriter, OutputWriter, SimOutputObserver};
use ds_sim::{SimBuilder, SimObserver, TickSample};

use dispatch::RandomOfferDispatcher;
use scenario::ScenarioConfig;

const DEFAULT_OUTPUT_DIR: &str = "output/fleet";

// ── Observer wrapper to count rows ───────────────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:         SimOutputObserver<W>,
    metric_rows:   usize,
    event_rows:    usize,
    snapshot_rows: usize,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, metric_rows: 0, event_rows: 0, snapshot_rows: 0 }
    }
}

impl<W: OutputWriter> SimObserver for CountingObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, events: &[MutationEvent], sample: &TickSample) {
        self.metric_rows += 1;
        self.event_rows += events.len();
        self.inner.on_tick_end(tick, events, sample);
    }

    fn on_snapshot(&mut self, tick: Tick, drivers: &DriverStore) {
        self.snapshot_rows += drivers.count();
        self.inner.on_snapshot(tick, drivers);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Spread `n` drivers over a square grid covering the service area.
fn grid_positions(n: usize, area_km: f64) -> Vec<Point> {
    let side = (n as f64).sqrt().ceil().max(1.0) as usize;
    let step = area_km / side as f64;
    (0..n)
        .map(|i| {
            let (row, col) = (i / side, i % side);
            Point::new((col as f64 + 0.5) * step, (row as f64 + 0.5) * step)
        })
        .collect()
}

fn parse_args() -> Result<(ScenarioConfig, PathBuf)> {
    let mut args = std::env::args().skip(1);
    let scenario = match args.next() {
        Some(path) => ScenarioConfig::load(Path::new(&path))?,
        None => ScenarioConfig::default(),
    };
    let out_dir = args.next().map_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR), PathBuf::from);
    Ok((scenario, out_dir))
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let (scenario, out_dir) = parse_args()?;

    println!("=== fleet — adaptive dispatch drivers ===");
    println!(
        "Drivers: {}  |  Ticks: {}  |  Seed: {}",
        scenario.driver_count,
        scenario.sim.total_ticks,
        scenario.sim.seed.map_or_else(|| "entropy".to_owned(), |s| s.to_string()),
    );
    println!();

    // 1. Fleet.
    let drivers = DriverStoreBuilder::new(scenario.driver_count, scenario.policies)
        .initial_behavior(scenario.initial_behavior)
        .positions(grid_positions(scenario.driver_count, scenario.offers.area_km))
        .build()?;

    // 2. Sim.
    let dispatcher = RandomOfferDispatcher::new(scenario.offers.clone());
    let mut sim = SimBuilder::new(scenario.sim.clone(), drivers, dispatcher)
        .rules(scenario.rules)
        .policies(scenario.policies)
        .build()?;

    // 3. Output.
    std::fs::create_dir_all(&out_dir)?;
    let writer = CsvWriter::new(&out_dir)?;
    let mut obs = CountingObserver::new(SimOutputObserver::new(writer));
    info!(dir = %out_dir.display(), "writing CSV output");

    // 4. Run.
    let t0 = Instant::now();
    let summary = sim.run(&mut obs);
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 5. Summary.
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  trips completed      : {}", summary.trips);
    println!("  mutations            : {}", summary.mutations);
    println!("  tick_metrics.csv     : {} rows", obs.metric_rows);
    println!("  mutation_events.csv  : {} rows", obs.event_rows);
    println!("  driver_snapshots.csv : {} rows", obs.snapshot_rows);
    println!();

    println!("{:<14} {:>8}", "Behavior", "Drivers");
    println!("{}", "-".repeat(23));
    let counts = sim.drivers.behavior_counts();
    for kind in BehaviorKind::ALL {
        println!("{:<14} {:>8}", kind.as_str(), counts[kind.index()]);
    }
    println!();

    println!("{:<26} {:>8}", "Mutation reason", "Count");
    println!("{}", "-".repeat(35));
    for reason in MutationReason::ALL {
        println!("{:<26} {:>8}", reason.as_str(), sim.ledger.total_for(reason));
    }

    if let Some(&mean) = sim.metrics.series().mean_average_fare.last() {
        println!();
        println!("Mean rolling fare at end: {mean:.2}");
    }

    Ok(())
}
