//! Fluent builder for constructing a `DriverStore`.
//!
//! # Usage
//!
//! ```rust
//! use ds_behavior::{BehaviorKind, PolicyParams};
//! use ds_driver::DriverStoreBuilder;
//!
//! let store = DriverStoreBuilder::new(100, PolicyParams::default())
//!     .initial_behavior(BehaviorKind::Lazy)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(store.count(), 100);
//! ```

use ds_behavior::{BehaviorKind, PolicyParams};
use ds_core::{DriverId, Point};

use crate::{Driver, DriverError, DriverResult, DriverStore, EarningsHistory};

/// Fluent builder for [`DriverStore`].
///
/// # Optional inputs (have defaults)
///
/// | Method                   | Default                           |
/// |--------------------------|-----------------------------------|
/// | `.initial_behavior(k)`   | `BehaviorKind::Lazy` for everyone |
/// | `.behaviors(v)`          | from `.initial_behavior`          |
/// | `.positions(v)`          | `Point::default()` for everyone   |
/// | `.earnings(v)`           | Empty histories                   |
pub struct DriverStoreBuilder {
    count:     usize,
    params:    PolicyParams,
    initial:   BehaviorKind,
    behaviors: Option<Vec<BehaviorKind>>,
    positions: Option<Vec<Point>>,
    earnings:  Option<Vec<EarningsHistory>>,
}

impl DriverStoreBuilder {
    /// Create a builder for `count` drivers whose policies are instantiated
    /// from `params`.
    pub fn new(count: usize, params: PolicyParams) -> Self {
        Self {
            count,
            params,
            initial:   BehaviorKind::Lazy,
            behaviors: None,
            positions: None,
            earnings:  None,
        }
    }

    /// Give every driver the same starting policy.
    pub fn initial_behavior(mut self, kind: BehaviorKind) -> Self {
        self.initial = kind;
        self
    }

    /// Per-driver starting policies (must be length `count`).  Overrides
    /// [`initial_behavior`](Self::initial_behavior).
    pub fn behaviors(mut self, kinds: Vec<BehaviorKind>) -> Self {
        self.behaviors = Some(kinds);
        self
    }

    /// Per-driver starting positions (must be length `count`).
    pub fn positions(mut self, positions: Vec<Point>) -> Self {
        self.positions = Some(positions);
        self
    }

    /// Per-driver pre-seeded earnings histories (must be length `count`).
    pub fn earnings(mut self, histories: Vec<EarningsHistory>) -> Self {
        self.earnings = Some(histories);
        self
    }

    /// Validate lengths and construct the store.
    pub fn build(self) -> DriverResult<DriverStore> {
        let count = self.count;

        let behaviors = resolve(self.behaviors, count, "behaviors", || self.initial)?;
        let positions = resolve(self.positions, count, "positions", Point::default)?;
        let earnings  = resolve(self.earnings, count, "earnings histories", EarningsHistory::new)?;

        let drivers = behaviors
            .into_iter()
            .zip(positions)
            .zip(earnings)
            .enumerate()
            .map(|(i, ((kind, position), history))| {
                let id = DriverId(i as u32);
                let mut driver = Driver::new(id, position, self.params.instantiate(kind));
                driver.earnings = history;
                driver
            })
            .collect();

        Ok(DriverStore::new(drivers))
    }
}

fn resolve<T>(
    supplied: Option<Vec<T>>,
    count:    usize,
    what:     &'static str,
    default:  impl FnMut() -> T,
) -> DriverResult<Vec<T>> {
    match supplied {
        Some(v) if v.len() != count => Err(DriverError::DriverCountMismatch {
            expected: count,
            got:      v.len(),
            what,
        }),
        Some(v) => Ok(v),
        None    => Ok(std::iter::repeat_with(default).take(count).collect()),
    }
}
