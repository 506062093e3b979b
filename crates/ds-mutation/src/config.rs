//! Mutation rule configuration.
//!
//! [`MutationRuleParams`] is the raw, freely editable list of every
//! recognised field with its default.  [`MutationRuleConfig`] is the
//! validated, immutable form the engine runs on; the only way to obtain one
//! is [`MutationRuleConfig::new`] (or `TryFrom`), so an inconsistent rule set
//! is rejected before the first tick.

use crate::ConfigurationError;

// ── MutationRuleParams ────────────────────────────────────────────────────────

/// Every tunable of the mutation engine.
///
/// Zone boundaries partition the rolling average into five half-open bands:
///
/// ```text
///   (-∞, struggling_below)           Struggling → Greedy
///   [struggling_below, recovery_below) Recovery
///   [recovery_below, normal_below)     Normal
///   [normal_below, thriving_at)        Good
///   [thriving_at, +∞)                  Thriving   → EarningsMax
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct MutationRuleParams {
    pub struggling_below: f64,
    pub recovery_below:   f64,
    pub normal_below:     f64,
    pub thriving_at:      f64,

    /// A Greedy driver exits to Lazy once `avg >= greedy_exit_at`.
    pub greedy_exit_at: f64,

    /// An EarningsMax driver exits to Lazy once `avg < earnings_exit_below`.
    pub earnings_exit_below: f64,

    /// Minimum ticks between two mutations of the same driver.
    pub cooldown_ticks: u64,

    /// Relative half-width of the "same fare" band around the average.
    pub stagnation_band: f64,

    /// Share of held fares inside the band at which a driver is stagnated.
    pub stagnation_ratio_threshold: f64,

    /// Probability a stagnated Lazy driver explores.
    pub lazy_exploration_probability: f64,

    /// Probability a stagnated Greedy/EarningsMax driver swaps to the other.
    pub active_exploration_probability: f64,

    /// When a Lazy driver explores, probability the target is Greedy
    /// (otherwise EarningsMax).
    pub lazy_greedy_share: f64,
}

impl Default for MutationRuleParams {
    fn default() -> Self {
        Self {
            struggling_below:               3.0,
            recovery_below:                 5.0,
            normal_below:                   7.5,
            thriving_at:                    10.0,
            greedy_exit_at:                 5.0,
            earnings_exit_below:            7.5,
            cooldown_ticks:                 10,
            stagnation_band:                0.05,
            stagnation_ratio_threshold:     0.70,
            lazy_exploration_probability:   1.0,
            active_exploration_probability: 0.30,
            lazy_greedy_share:              0.5,
        }
    }
}

impl MutationRuleParams {
    fn validate(&self) -> Result<(), ConfigurationError> {
        let finite = [
            ("struggling_below",    self.struggling_below),
            ("recovery_below",      self.recovery_below),
            ("normal_below",        self.normal_below),
            ("thriving_at",         self.thriving_at),
            ("greedy_exit_at",      self.greedy_exit_at),
            ("earnings_exit_below", self.earnings_exit_below),
            ("stagnation_band",     self.stagnation_band),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigurationError::NonFinite { field, value });
            }
        }

        let boundaries = [
            ("struggling_below", self.struggling_below),
            ("recovery_below",   self.recovery_below),
            ("normal_below",     self.normal_below),
            ("thriving_at",      self.thriving_at),
        ];
        for pair in boundaries.windows(2) {
            let (lower, lower_value) = pair[0];
            let (upper, upper_value) = pair[1];
            if lower_value >= upper_value {
                return Err(ConfigurationError::BoundaryOrder {
                    lower, lower_value, upper, upper_value,
                });
            }
        }

        // A Greedy driver is assigned below `struggling_below`; exiting at or
        // below that line would send it straight back on the next evaluation.
        if self.greedy_exit_at <= self.struggling_below {
            return Err(ConfigurationError::ExitThreshold {
                exit:           "greedy_exit_at",
                exit_value:     self.greedy_exit_at,
                boundary:       "struggling_below",
                boundary_value: self.struggling_below,
            });
        }
        // Symmetric for EarningsMax, assigned at `thriving_at` and above.
        if self.earnings_exit_below >= self.thriving_at {
            return Err(ConfigurationError::ExitThreshold {
                exit:           "earnings_exit_below",
                exit_value:     self.earnings_exit_below,
                boundary:       "thriving_at",
                boundary_value: self.thriving_at,
            });
        }

        if self.stagnation_band <= 0.0 {
            return Err(ConfigurationError::NonPositiveBand(self.stagnation_band));
        }

        let unit = [
            ("stagnation_ratio_threshold",     self.stagnation_ratio_threshold),
            ("lazy_exploration_probability",   self.lazy_exploration_probability),
            ("active_exploration_probability", self.active_exploration_probability),
            ("lazy_greedy_share",              self.lazy_greedy_share),
        ];
        for (field, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigurationError::OutOfUnitRange { field, value });
            }
        }

        if self.cooldown_ticks == 0 {
            return Err(ConfigurationError::ZeroCooldown);
        }
        Ok(())
    }
}

// ── MutationRuleConfig ────────────────────────────────────────────────────────

/// A validated, immutable [`MutationRuleParams`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "MutationRuleParams", into = "MutationRuleParams"))]
pub struct MutationRuleConfig {
    params: MutationRuleParams,
}

impl MutationRuleConfig {
    /// Validate `params`.
    pub fn new(params: MutationRuleParams) -> Result<Self, ConfigurationError> {
        params.validate()?;
        Ok(Self { params })
    }

    #[inline]
    pub fn params(&self) -> &MutationRuleParams {
        &self.params
    }
}

impl Default for MutationRuleConfig {
    fn default() -> Self {
        Self { params: MutationRuleParams::default() }
    }
}

impl TryFrom<MutationRuleParams> for MutationRuleConfig {
    type Error = ConfigurationError;

    fn try_from(params: MutationRuleParams) -> Result<Self, Self::Error> {
        Self::new(params)
    }
}

impl From<MutationRuleConfig> for MutationRuleParams {
    fn from(config: MutationRuleConfig) -> Self {
        config.params
    }
}
