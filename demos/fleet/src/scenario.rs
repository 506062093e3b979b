//! JSON scenario file: every knob of a demo run in one place.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use ds_behavior::{BehaviorKind, PolicyParams};
use ds_core::SimConfig;
use ds_mutation::MutationRuleConfig;

/// A complete demo scenario.  Every field is optional in the file; missing
/// ones take the defaults below and unknown ones are rejected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioConfig {
    pub sim:              SimConfig,
    /// Validated on load; a bad rule set fails before the run starts.
    pub rules:            MutationRuleConfig,
    pub policies:         PolicyParams,
    pub driver_count:     usize,
    pub initial_behavior: BehaviorKind,
    pub offers:           OfferParams,
}

/// Synthetic demand generated by the demo dispatcher.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OfferParams {
    /// Side of the square service area, km.
    pub area_km:           f64,
    /// Ride requests per tick, as a fraction of the fleet size.
    pub offers_per_driver: f64,
    pub base_fare:         f64,
    pub fare_per_km:       f64,
    /// Average driving speed used to derive trip durations, km/h.
    pub speed_kmh:         f64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            sim:              SimConfig::default(),
            rules:            MutationRuleConfig::default(),
            policies:         PolicyParams::default(),
            driver_count:     200,
            initial_behavior: BehaviorKind::Lazy,
            offers:           OfferParams::default(),
        }
    }
}

impl Default for OfferParams {
    fn default() -> Self {
        Self {
            area_km:           10.0,
            offers_per_driver: 0.6,
            base_fare:         2.5,
            fare_per_km:       1.2,
            speed_kmh:         30.0,
        }
    }
}

impl ScenarioConfig {
    /// Load from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("opening scenario {}", path.display()))?;
        let scenario: Self = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parsing scenario {}", path.display()))?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.driver_count > 0, "driver_count must be at least 1");
        let o = &self.offers;
        ensure!(o.area_km.is_finite() && o.area_km > 0.0, "offers.area_km must be positive");
        ensure!(
            o.offers_per_driver.is_finite() && o.offers_per_driver >= 0.0,
            "offers.offers_per_driver must be non-negative"
        );
        ensure!(o.speed_kmh.is_finite() && o.speed_kmh > 0.0, "offers.speed_kmh must be positive");
        ensure!(
            o.base_fare >= 0.0 && o.fare_per_km >= 0.0,
            "offers fares must be non-negative"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_tmp(json: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(json.as_bytes()).unwrap();
        f
    }

    #[test]
    fn partial_file_takes_defaults() {
        let f = write_tmp(r#"{ "driver_count": 12, "sim": { "total_ticks": 30 }, "rules": { "cooldown_ticks": 4 } }"#);
        let s = ScenarioConfig::load(f.path()).unwrap();
        assert_eq!(s.driver_count, 12);
        assert_eq!(s.sim.total_ticks, 30);
        assert_eq!(s.sim.seed, Some(42));
        assert_eq!(s.rules.params().cooldown_ticks, 4);
        assert_eq!(s.rules.params().thriving_at, 10.0);
        assert_eq!(s.offers, OfferParams::default());
    }

    #[test]
    fn invalid_rules_rejected() {
        let f = write_tmp(r#"{ "rules": { "struggling_below": 8.0, "recovery_below": 5.0 } }"#);
        assert!(ScenarioConfig::load(f.path()).is_err());
    }

    #[test]
    fn unknown_field_rejected() {
        let f = write_tmp(r#"{ "drivers": 10 }"#);
        assert!(ScenarioConfig::load(f.path()).is_err());
    }

    #[test]
    fn zero_drivers_rejected() {
        let f = write_tmp(r#"{ "driver_count": 0 }"#);
        assert!(ScenarioConfig::load(f.path()).is_err());
    }
}
