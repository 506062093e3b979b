//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing logical `Tick` counter with no
//! wall-clock mapping.  Every engine and recorder call receives the tick
//! explicitly; nothing reads an ambient clock.
//!
//! # The elapsed-tick contract
//!
//! Within one iteration of the tick loop the phases run in this order:
//!
//! ```text
//!   tick T:  dispatch(T) → mutation(T) → clock.advance() → record(T)
//! ```
//!
//! Mutation events are stamped with `T`, the tick during which they were
//! decided.  By the time the metrics recorder runs the clock already reads
//! `T + 1`, so the recorder must look up the ledger with
//! [`SimClock::elapsed_tick`] (`current - 1`), never with
//! [`SimClock::current_tick`].  Reading the current tick there returns an
//! empty slice every time and the mutation metrics silently flatline.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0.saturating_add(n))
    }

    /// The tick immediately before `self`, or `None` at `Tick::ZERO`.
    #[inline]
    pub fn prev(self) -> Option<Tick> {
        self.0.checked_sub(1).map(Tick)
    }

    /// Ticks elapsed from `earlier` to `self`; zero if `earlier` is later.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        self.offset(rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The logical simulation clock.
///
/// `current_tick` is the tick currently being processed (or about to be).
/// It is advanced exactly once per loop iteration, after all per-driver
/// mutation evaluation for that tick has completed.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    current_tick: Tick,
}

impl SimClock {
    /// A clock at `Tick::ZERO`.
    pub fn new() -> Self {
        Self::default()
    }

    /// A clock positioned at `tick` (resuming a stepped run, tests).
    pub fn starting_at(tick: Tick) -> Self {
        Self { current_tick: tick }
    }

    /// The tick currently being processed.
    #[inline]
    pub fn current_tick(&self) -> Tick {
        self.current_tick
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = self.current_tick.offset(1);
    }

    /// The tick that most recently finished: `current_tick - 1`.
    ///
    /// This is the key every post-advance reader (the metrics recorder in
    /// particular) must use to look up ledger entries.  `None` until the
    /// first tick has elapsed.
    #[inline]
    pub fn elapsed_tick(&self) -> Option<Tick> {
        self.current_tick.prev()
    }

    /// Number of ticks that have fully elapsed since tick 0.
    #[inline]
    pub fn ticks_elapsed(&self) -> u64 {
        self.current_tick.0
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.elapsed_tick() {
            Some(prev) => write!(f, "{} (last elapsed {})", self.current_tick, prev),
            None       => write!(f, "{} (nothing elapsed)", self.current_tick),
        }
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically loaded from a JSON scenario file by the application crate and
/// passed to the simulation builder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct SimConfig {
    /// Total ticks to simulate.
    pub total_ticks: u64,

    /// Master RNG seed.  `Some(s)` always produces identical results;
    /// `None` seeds from OS entropy.
    pub seed: Option<u64>,

    /// Emit a driver snapshot every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            total_ticks:           500,
            seed:                  Some(42),
            output_interval_ticks: 50,
        }
    }
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new()
    }

    /// Reject configurations that cannot produce a meaningful run.
    pub fn validate(&self) -> crate::DsResult<()> {
        if self.total_ticks == 0 {
            return Err(crate::DsError::Config(
                "total_ticks must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }
}
