//! Five-band earnings classifier.

use std::fmt;

use ds_behavior::BehaviorKind;

use crate::{MutationReason, MutationRuleConfig};

/// Which earnings band a rolling average falls in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Zone {
    Struggling,
    Recovery,
    Normal,
    Good,
    Thriving,
}

impl Zone {
    /// Classify `avg` against the configured boundaries.  Bands are
    /// half-open `[low, high)`; the outer two are unbounded.
    pub fn classify(avg: f64, rules: &MutationRuleConfig) -> Zone {
        let p = rules.params();
        if avg < p.struggling_below {
            Zone::Struggling
        } else if avg < p.recovery_below {
            Zone::Recovery
        } else if avg < p.normal_below {
            Zone::Normal
        } else if avg < p.thriving_at {
            Zone::Good
        } else {
            Zone::Thriving
        }
    }

    /// The policy this zone pushes a driver towards, and why.  `None` for
    /// the three holding bands.
    pub fn primary_target(self) -> Option<(BehaviorKind, MutationReason)> {
        match self {
            Zone::Struggling => Some((BehaviorKind::Greedy, MutationReason::PerformanceLowEarnings)),
            Zone::Thriving   => Some((BehaviorKind::EarningsMax, MutationReason::PerformanceHighEarnings)),
            Zone::Recovery | Zone::Normal | Zone::Good => None,
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Zone::Struggling => "struggling",
            Zone::Recovery   => "recovery",
            Zone::Normal     => "normal",
            Zone::Good       => "good",
            Zone::Thriving   => "thriving",
        };
        f.write_str(name)
    }
}
