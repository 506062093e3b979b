//! The three acceptance policies and the parameters they are built from.

use std::fmt;

use crate::{BehaviorError, BehaviorResult, Decision, OfferContext};

// ── BehaviorKind ──────────────────────────────────────────────────────────────

/// Identity of a policy, without its parameters.
///
/// This is what the mutation engine reasons about and what the ledger
/// records; [`BehaviorPolicy`] carries the parameters the dispatch layer needs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BehaviorKind {
    Greedy,
    EarningsMax,
    Lazy,
}

impl BehaviorKind {
    pub const ALL: [BehaviorKind; 3] =
        [BehaviorKind::Greedy, BehaviorKind::EarningsMax, BehaviorKind::Lazy];

    /// Stable lower-case name used in logs and CSV output.
    pub fn as_str(self) -> &'static str {
        match self {
            BehaviorKind::Greedy      => "greedy",
            BehaviorKind::EarningsMax => "earnings_max",
            BehaviorKind::Lazy        => "lazy",
        }
    }

    /// Position in [`BehaviorKind::ALL`]; handy for per-kind count arrays.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            BehaviorKind::Greedy      => 0,
            BehaviorKind::EarningsMax => 1,
            BehaviorKind::Lazy        => 2,
        }
    }

    /// `true` for the two non-baseline policies.
    #[inline]
    pub fn is_active(self) -> bool {
        self != BehaviorKind::Lazy
    }
}

impl fmt::Display for BehaviorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── BehaviorPolicy ────────────────────────────────────────────────────────────

/// A driver's active acceptance policy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BehaviorPolicy {
    /// Take anything close enough.
    Greedy {
        max_distance_km: f64,
    },

    /// Take only offers that pay well per minute of driving.
    EarningsMax {
        min_reward_per_min: f64,
    },

    /// Take only nearby offers, and only after idling for a while.
    Lazy {
        min_idle_ticks:  u64,
        max_distance_km: f64,
    },
}

impl BehaviorPolicy {
    pub fn kind(&self) -> BehaviorKind {
        match self {
            BehaviorPolicy::Greedy { .. }      => BehaviorKind::Greedy,
            BehaviorPolicy::EarningsMax { .. } => BehaviorKind::EarningsMax,
            BehaviorPolicy::Lazy { .. }        => BehaviorKind::Lazy,
        }
    }

    /// Accept or reject `offer`.  No side effects.
    ///
    /// An `EarningsMax` policy rejects offers with a non-positive duration:
    /// their reward rate is undefined.
    pub fn decide(&self, offer: &OfferContext) -> Decision {
        let accept = match *self {
            BehaviorPolicy::Greedy { max_distance_km } => offer.distance_km <= max_distance_km,

            BehaviorPolicy::EarningsMax { min_reward_per_min } => {
                offer.expected_duration_min > 0.0
                    && offer.expected_reward / offer.expected_duration_min >= min_reward_per_min
            }

            BehaviorPolicy::Lazy { min_idle_ticks, max_distance_km } => {
                offer.idle_ticks >= min_idle_ticks && offer.distance_km <= max_distance_km
            }
        };
        Decision::from(accept)
    }
}

impl fmt::Display for BehaviorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BehaviorPolicy::Greedy { max_distance_km } => {
                write!(f, "greedy(max {max_distance_km} km)")
            }
            BehaviorPolicy::EarningsMax { min_reward_per_min } => {
                write!(f, "earnings_max(min {min_reward_per_min}/min)")
            }
            BehaviorPolicy::Lazy { min_idle_ticks, max_distance_km } => {
                write!(f, "lazy(idle >= {min_idle_ticks}, max {max_distance_km} km)")
            }
        }
    }
}

// ── PolicyParams ──────────────────────────────────────────────────────────────

/// Parameters for every policy variant.
///
/// The mutation engine holds one `PolicyParams` and instantiates a fresh
/// [`BehaviorPolicy`] from it whenever a driver switches.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct PolicyParams {
    /// Greedy: accept any offer whose pickup is within this distance (km).
    pub greedy_max_distance_km: f64,

    /// EarningsMax: minimum `reward / duration_min`.
    pub earnings_min_reward_per_min: f64,

    /// Lazy: minimum idle ticks before considering any offer.
    pub lazy_min_idle_ticks: u64,

    /// Lazy: maximum pickup distance (km).
    pub lazy_max_distance_km: f64,
}

impl Default for PolicyParams {
    fn default() -> Self {
        Self {
            greedy_max_distance_km:      5.0,
            earnings_min_reward_per_min: 0.5,
            lazy_min_idle_ticks:         2,
            lazy_max_distance_km:        2.0,
        }
    }
}

impl PolicyParams {
    /// Build the policy of the given kind from these parameters.
    pub fn instantiate(&self, kind: BehaviorKind) -> BehaviorPolicy {
        match kind {
            BehaviorKind::Greedy => BehaviorPolicy::Greedy {
                max_distance_km: self.greedy_max_distance_km,
            },
            BehaviorKind::EarningsMax => BehaviorPolicy::EarningsMax {
                min_reward_per_min: self.earnings_min_reward_per_min,
            },
            BehaviorKind::Lazy => BehaviorPolicy::Lazy {
                min_idle_ticks:  self.lazy_min_idle_ticks,
                max_distance_km: self.lazy_max_distance_km,
            },
        }
    }

    /// Reject negative or non-finite parameters.
    pub fn validate(&self) -> BehaviorResult<()> {
        let checks = [
            ("greedy_max_distance_km",      self.greedy_max_distance_km),
            ("earnings_min_reward_per_min", self.earnings_min_reward_per_min),
            ("lazy_max_distance_km",        self.lazy_max_distance_km),
        ];
        for (name, value) in checks {
            if !value.is_finite() || value < 0.0 {
                return Err(BehaviorError::Config(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}
