//! `ds-driver` — per-driver state and fleet storage.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`earnings`]  | `EarningsHistory`: bounded ring of recent trip fares      |
//! | [`driver`]    | `Driver`: one driver's policy, cooldown, and earnings     |
//! | [`store`]     | `DriverStore`: the fleet, indexed by `DriverId`           |
//! | [`builder`]   | `DriverStoreBuilder` (fluent construction)                 |
//! | [`error`]     | `DriverError`, `DriverResult<T>`                           |
//!
//! # Ownership
//!
//! The simulation owns the `DriverStore`.  Two phases write to it, never at
//! the same time: the dispatch phase (positions, trip bookkeeping) and the
//! mutation phase (policy and cooldown).  Drivers never touch each other.

pub mod builder;
pub mod driver;
pub mod earnings;
pub mod error;
pub mod store;


pub use builder::DriverStoreBuilder;
pub use driver::Driver;
pub use earnings::{EarningsHistory, EARNINGS_WINDOW};
pub use error::{DriverError, DriverResult};
pub use store::DriverStore;
