//! Fluent builder for constructing a [`Sim`].

use ds_behavior::PolicyParams;
use ds_core::{SimConfig, SimRng};
use ds_driver::DriverStore;
use ds_mutation::{MutationEngine, MutationLedger, MutationRuleConfig};

use crate::{Dispatcher, MetricsRecorder, Sim, SimResult};

/// Fluent builder for [`Sim<D>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: total ticks, seed, snapshot interval
/// - [`DriverStore`]: from [`ds_driver::DriverStoreBuilder`]
/// - `D: Dispatcher`: the offer/matching implementation
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                          |
/// |-----------------|----------------------------------|
/// | `.rules(r)`     | `MutationRuleConfig::default()`  |
/// | `.policies(p)`  | `PolicyParams::default()`        |
///
/// # Example
///
/// ```rust,ignore
/// let drivers = DriverStoreBuilder::new(n, PolicyParams::default()).build()?;
/// let mut sim = SimBuilder::new(config, drivers, NoopDispatcher)
///     .rules(rules)
///     .build()?;
/// sim.run(&mut NoopObserver);
/// ```
pub struct SimBuilder<D: Dispatcher> {
    config:     SimConfig,
    drivers:    DriverStore,
    dispatcher: D,
    rules:      Option<MutationRuleConfig>,
    policies:   Option<PolicyParams>,
}

impl<D: Dispatcher> SimBuilder<D> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, drivers: DriverStore, dispatcher: D) -> Self {
        Self {
            config,
            drivers,
            dispatcher,
            rules:    None,
            policies: None,
        }
    }

    /// Supply validated mutation rules.
    pub fn rules(mut self, rules: MutationRuleConfig) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Supply the parameters used when a mutation instantiates a new policy.
    ///
    /// These should match the parameters the fleet was built with.
    pub fn policies(mut self, policies: PolicyParams) -> Self {
        self.policies = Some(policies);
        self
    }

    /// Validate inputs, build the mutation engine, seed the generator, and
    /// return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<D>> {
        self.config.validate()?;

        let rules = self.rules.unwrap_or_default();
        let policies = self.policies.unwrap_or_default();
        let metrics = MetricsRecorder::new(&rules);
        let engine = MutationEngine::new(rules, policies)?;

        Ok(Sim {
            clock:      self.config.make_clock(),
            rng:        SimRng::from_seed_option(self.config.seed),
            config:     self.config,
            drivers:    self.drivers,
            engine,
            ledger:     MutationLedger::new(),
            metrics,
            dispatcher: self.dispatcher,
        })
    }
}
