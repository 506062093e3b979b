//! Configuration errors, raised once at construction time.

use ds_behavior::BehaviorError;
use thiserror::Error;

/// A mutation rule set or policy parameter set that cannot be used.
///
/// Every variant is detected when the configuration is built, never
/// mid-run.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("{field} must be finite, got {value}")]
    NonFinite {
        field: &'static str,
        value: f64,
    },

    #[error("{lower} ({lower_value}) must be strictly below {upper} ({upper_value})")]
    BoundaryOrder {
        lower:       &'static str,
        lower_value: f64,
        upper:       &'static str,
        upper_value: f64,
    },

    #[error("{exit} ({exit_value}) is inconsistent with zone boundary {boundary} ({boundary_value})")]
    ExitThreshold {
        exit:           &'static str,
        exit_value:     f64,
        boundary:       &'static str,
        boundary_value: f64,
    },

    #[error("{field} must lie in [0, 1], got {value}")]
    OutOfUnitRange {
        field: &'static str,
        value: f64,
    },

    #[error("stagnation_band must be positive, got {0}")]
    NonPositiveBand(f64),

    #[error("cooldown_ticks must be at least 1")]
    ZeroCooldown,

    #[error(transparent)]
    Policy(#[from] BehaviorError),
}
