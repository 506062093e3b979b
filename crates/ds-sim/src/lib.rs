//! `ds-sim` — tick loop orchestrator for the dispatch fleet simulator.
//!
//! # Tick loop
//!
//! ```text
//! for tick T in 0..config.total_ticks:
//!   ① Dispatch:  Dispatcher::dispatch(T): offers are shown to drivers and
//!                 decided with each driver's *current* policy; completed
//!                 trips are booked into earnings histories.
//!   ② Mutation:  MutationEngine::run_tick(T): every driver is evaluated;
//!                 fired mutations go to the ledger stamped with T.
//!   ③ Advance:   clock moves to T + 1.
//!   ④ Metrics:   MetricsRecorder::record reads the ledger at
//!                 clock.elapsed_tick() == T and appends one sample.
//! ```
//!
//! A policy swap decided in ② therefore first affects dispatch at T + 1.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ds_behavior::PolicyParams;
//! use ds_core::SimConfig;
//! use ds_driver::DriverStoreBuilder;
//! use ds_sim::{NoopDispatcher, NoopObserver, SimBuilder};
//!
//! let drivers = DriverStoreBuilder::new(1_000, PolicyParams::default()).build()?;
//! let mut sim = SimBuilder::new(config, drivers, NoopDispatcher).build()?;
//! sim.run(&mut NoopObserver);
//! ```

pub mod builder;
pub mod dispatch;
pub mod error;
pub mod metrics;
pub mod observer;
pub mod sim;


pub use builder::SimBuilder;
pub use dispatch::{Dispatcher, NoopDispatcher};
pub use error::{SimError, SimResult};
pub use metrics::{MetricsRecorder, TickSample, TimeSeries};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{RunSummary, Sim};
