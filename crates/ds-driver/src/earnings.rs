//! Rolling window of a driver's most recent trip fares.

use std::collections::VecDeque;

use crate::{DriverError, DriverResult};

/// Number of fares a driver remembers.
pub const EARNINGS_WINDOW: usize = 10;

/// Fraction of the average that counts as "the same fare" for stagnation.
pub const DEFAULT_STAGNATION_BAND: f64 = 0.05;

/// The last ≤ `capacity` completed-trip fares, oldest first.
///
/// Appending to a full history evicts the oldest fare.  All statistics are
/// computed over the fares currently held.
#[derive(Clone, Debug, PartialEq)]
pub struct EarningsHistory {
    fares:    VecDeque<f64>,
    capacity: usize,
}

impl Default for EarningsHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl EarningsHistory {
    /// An empty history with the standard window of [`EARNINGS_WINDOW`].
    pub fn new() -> Self {
        Self::with_capacity(EARNINGS_WINDOW)
    }

    /// An empty history holding at most `capacity` fares (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { fares: VecDeque::with_capacity(capacity), capacity }
    }

    /// Seed a history from `fares`, oldest first.  Only the last `capacity`
    /// survive.
    pub fn from_fares<I: IntoIterator<Item = f64>>(fares: I) -> Self {
        let mut history = Self::new();
        for fare in fares {
            history.append(fare);
        }
        history
    }

    /// Record a completed-trip fare.  O(1).
    pub fn append(&mut self, fare: f64) {
        debug_assert!(fare.is_finite(), "fare must be finite, got {fare}");
        if self.fares.len() == self.capacity {
            self.fares.pop_front();
        }
        self.fares.push_back(fare);
    }

    pub fn len(&self) -> usize {
        self.fares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fares.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Fares currently held, oldest first.
    pub fn fares(&self) -> impl Iterator<Item = f64> + '_ {
        self.fares.iter().copied()
    }

    /// Arithmetic mean of the held fares.
    pub fn average(&self) -> DriverResult<f64> {
        if self.fares.is_empty() {
            return Err(DriverError::EmptyHistory);
        }
        Ok(self.fares.iter().sum::<f64>() / self.fares.len() as f64)
    }

    /// Population standard deviation of the held fares.
    pub fn std_dev(&self) -> DriverResult<f64> {
        let avg = self.average()?;
        let var = self.fares.iter().map(|f| (f - avg).powi(2)).sum::<f64>()
            / self.fares.len() as f64;
        Ok(var.sqrt())
    }

    /// Fraction of held fares within `±band` (relative) of the average.
    ///
    /// Returns 0.0 for an empty history.
    pub fn stagnation_ratio_with_band(&self, band: f64) -> f64 {
        let Ok(avg) = self.average() else {
            return 0.0;
        };
        let tolerance = (avg * band).abs();
        let within = self
            .fares
            .iter()
            .filter(|&&fare| (fare - avg).abs() <= tolerance)
            .count();
        within as f64 / self.fares.len() as f64
    }

    /// [`stagnation_ratio_with_band`](Self::stagnation_ratio_with_band) at
    /// the standard ±5 % band.
    pub fn stagnation_ratio(&self) -> f64 {
        self.stagnation_ratio_with_band(DEFAULT_STAGNATION_BAND)
    }
}
