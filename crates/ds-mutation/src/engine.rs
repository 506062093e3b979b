//! The hysteresis state machine that decides when a driver switches policy.

use ds_behavior::{BehaviorKind, PolicyParams};
use ds_core::{SimRng, Tick};
use ds_driver::{Driver, DriverStore, EarningsHistory};
use tracing::{debug, trace};

use crate::{ConfigurationError, MutationEvent, MutationLedger, MutationReason, MutationRuleConfig, Zone};

/// A switch the engine wants to make, before it is applied.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MutationDecision {
    pub to:     BehaviorKind,
    pub reason: MutationReason,
}

/// Evaluates drivers against the mutation rules.
///
/// The engine holds only immutable configuration; all per-driver state
/// lives in the [`Driver`] and all randomness comes from the caller's
/// [`SimRng`].
#[derive(Clone, Debug)]
pub struct MutationEngine {
    rules:    MutationRuleConfig,
    policies: PolicyParams,
}

impl MutationEngine {
    /// Build an engine.  `policies` is validated here so a bad parameter set
    /// fails before the run starts.
    pub fn new(rules: MutationRuleConfig, policies: PolicyParams) -> Result<Self, ConfigurationError> {
        policies.validate()?;
        Ok(Self { rules, policies })
    }

    pub fn rules(&self) -> &MutationRuleConfig {
        &self.rules
    }

    pub fn policies(&self) -> &PolicyParams {
        &self.policies
    }

    // ── Pure decision (steps ②–⑤) ─────────────────────────────────────────

    /// Decide whether a driver currently running `current` with `history`
    /// should switch, ignoring cooldown.
    ///
    /// Randomness is consumed only in the stagnation step.
    pub fn decide(
        &self,
        current: BehaviorKind,
        history: &EarningsHistory,
        rng:     &mut SimRng,
    ) -> Option<MutationDecision> {
        let Ok(avg) = history.average() else {
            return None;
        };

        if let Some(decision) = self.exit_decision(current, avg) {
            return Some(decision);
        }
        if let Some(decision) = self.primary_decision(current, avg) {
            return Some(decision);
        }
        self.stagnation_decision(current, history, rng)
    }

    fn exit_decision(&self, current: BehaviorKind, avg: f64) -> Option<MutationDecision> {
        let p = self.rules.params();
        let reason = match current {
            BehaviorKind::Greedy if avg >= p.greedy_exit_at => MutationReason::ExitGreedy,
            BehaviorKind::EarningsMax if avg < p.earnings_exit_below => MutationReason::ExitEarnings,
            _ => return None,
        };
        Some(MutationDecision { to: BehaviorKind::Lazy, reason })
    }

    fn primary_decision(&self, current: BehaviorKind, avg: f64) -> Option<MutationDecision> {
        let (to, reason) = Zone::classify(avg, &self.rules).primary_target()?;
        (to != current).then_some(MutationDecision { to, reason })
    }

    fn stagnation_decision(
        &self,
        current: BehaviorKind,
        history: &EarningsHistory,
        rng:     &mut SimRng,
    ) -> Option<MutationDecision> {
        let p = self.rules.params();
        let ratio = history.stagnation_ratio_with_band(p.stagnation_band);
        if ratio < p.stagnation_ratio_threshold {
            return None;
        }

        let to = match current {
            BehaviorKind::Lazy => {
                if !rng.gen_bool(p.lazy_exploration_probability) {
                    return None;
                }
                if rng.gen_bool(p.lazy_greedy_share) {
                    BehaviorKind::Greedy
                } else {
                    BehaviorKind::EarningsMax
                }
            }
            BehaviorKind::Greedy | BehaviorKind::EarningsMax => {
                if !rng.gen_bool(p.active_exploration_probability) {
                    return None;
                }
                if current == BehaviorKind::Greedy {
                    BehaviorKind::EarningsMax
                } else {
                    BehaviorKind::Greedy
                }
            }
        };
        Some(MutationDecision { to, reason: MutationReason::StagnationExploration })
    }

    // ── Application (step ① + side effects) ───────────────────────────────

    /// Evaluate one driver for `tick` and apply any mutation in place.
    ///
    /// Returns the event to record, stamped with `tick`.  A driver in
    /// cooldown is left untouched and consumes no randomness.
    pub fn evaluate(&self, driver: &mut Driver, tick: Tick, rng: &mut SimRng) -> Option<MutationEvent> {
        if driver.in_cooldown(tick) {
            return None;
        }

        let from = driver.behavior_kind();
        let decision = self.decide(from, &driver.earnings, rng)?;

        driver.behavior = self.policies.instantiate(decision.to);
        driver.cooldown_until = tick.offset(self.rules.params().cooldown_ticks);

        let event = MutationEvent {
            tick,
            driver: driver.id,
            from,
            to: decision.to,
            reason: decision.reason,
        };
        debug!(
            tick = tick.0,
            driver = driver.id.0,
            from = %from,
            to = %decision.to,
            reason = %decision.reason,
            "driver behavior mutated"
        );
        Some(event)
    }

    /// Evaluate every driver for `tick` in ascending `DriverId` order,
    /// appending fired mutations to `ledger`.  Returns the number fired.
    pub fn run_tick(
        &self,
        drivers: &mut DriverStore,
        tick:    Tick,
        ledger:  &mut MutationLedger,
        rng:     &mut SimRng,
    ) -> usize {
        let mut fired = 0;
        for driver in drivers.iter_mut() {
            if let Some(event) = self.evaluate(driver, tick, rng) {
                ledger.append(event);
                fired += 1;
            }
        }
        trace!(tick = tick.0, fired, "mutation phase complete");
        fired
    }
}
