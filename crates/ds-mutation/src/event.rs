//! Mutation events recorded in the ledger.

use std::fmt;

use ds_behavior::BehaviorKind;
use ds_core::{DriverId, Tick};

/// Why a driver switched policy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MutationReason {
    PerformanceLowEarnings,
    PerformanceHighEarnings,
    ExitGreedy,
    ExitEarnings,
    StagnationExploration,
}

impl MutationReason {
    pub const ALL: [MutationReason; 5] = [
        MutationReason::PerformanceLowEarnings,
        MutationReason::PerformanceHighEarnings,
        MutationReason::ExitGreedy,
        MutationReason::ExitEarnings,
        MutationReason::StagnationExploration,
    ];

    /// Position in [`MutationReason::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        match self {
            MutationReason::PerformanceLowEarnings  => 0,
            MutationReason::PerformanceHighEarnings => 1,
            MutationReason::ExitGreedy              => 2,
            MutationReason::ExitEarnings            => 3,
            MutationReason::StagnationExploration   => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MutationReason::PerformanceLowEarnings  => "performance_low_earnings",
            MutationReason::PerformanceHighEarnings => "performance_high_earnings",
            MutationReason::ExitGreedy              => "exit_greedy",
            MutationReason::ExitEarnings            => "exit_earnings",
            MutationReason::StagnationExploration   => "stagnation_exploration",
        }
    }
}

impl fmt::Display for MutationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One fired mutation.  Immutable once appended to the ledger.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MutationEvent {
    /// The tick during which the mutation was decided (not the tick from
    /// which it takes effect).
    pub tick:   Tick,
    pub driver: DriverId,
    pub from:   BehaviorKind,
    pub to:     BehaviorKind,
    pub reason: MutationReason,
}

impl fmt::Display for MutationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {} -> {} ({})",
            self.tick, self.driver, self.from, self.to, self.reason
        )
    }
}
