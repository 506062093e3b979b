//! Unit tests for ds-mutation.

use ds_behavior::{BehaviorKind, PolicyParams};
use ds_core::{DriverId, Point, SimClock, SimRng, Tick};
use ds_driver::{Driver, DriverStoreBuilder, EarningsHistory};

use crate::{
    ConfigurationError, MutationDecision, MutationEngine, MutationEvent, MutationLedger,
    MutationReason, MutationRuleConfig, MutationRuleParams, Zone,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn engine() -> MutationEngine {
    MutationEngine::new(MutationRuleConfig::default(), PolicyParams::default()).unwrap()
}

/// Ten identical fares: average `avg`, stagnation ratio 1.0.
fn flat(avg: f64) -> EarningsHistory {
    EarningsHistory::from_fares([avg; 10])
}

/// Ten fares alternating ±50 % around `avg`: average `avg`, stagnation
/// ratio 0.0.
fn spread(avg: f64) -> EarningsHistory {
    EarningsHistory::from_fares((0..10).map(|i| if i % 2 == 0 { avg * 0.5 } else { avg * 1.5 }))
}

fn driver_with(kind: BehaviorKind, history: EarningsHistory) -> Driver {
    let mut d = Driver::new(DriverId(0), Point::default(), PolicyParams::default().instantiate(kind));
    d.earnings = history;
    d
}

fn event(tick: u64, driver: u32, reason: MutationReason) -> MutationEvent {
    MutationEvent {
        tick:   Tick(tick),
        driver: DriverId(driver),
        from:   BehaviorKind::Lazy,
        to:     BehaviorKind::Greedy,
        reason,
    }
}

// ── MutationRuleConfig ────────────────────────────────────────────────────────

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(MutationRuleConfig::new(MutationRuleParams::default()).is_ok());
        assert_eq!(MutationRuleConfig::default().params(), &MutationRuleParams::default());
    }

    #[test]
    fn low_threshold_above_high_rejected() {
        let params = MutationRuleParams { struggling_below: 12.0, ..MutationRuleParams::default() };
        assert!(matches!(
            MutationRuleConfig::new(params),
            Err(ConfigurationError::BoundaryOrder { lower: "struggling_below", .. })
        ));
    }

    #[test]
    fn equal_boundaries_rejected() {
        let params = MutationRuleParams { normal_below: 10.0, ..MutationRuleParams::default() };
        assert!(matches!(
            MutationRuleConfig::new(params),
            Err(ConfigurationError::BoundaryOrder { upper: "thriving_at", .. })
        ));
    }

    #[test]
    fn greedy_exit_inside_struggling_rejected() {
        let params = MutationRuleParams { greedy_exit_at: 2.0, ..MutationRuleParams::default() };
        assert!(matches!(
            MutationRuleConfig::new(params),
            Err(ConfigurationError::ExitThreshold { exit: "greedy_exit_at", .. })
        ));
    }

    #[test]
    fn earnings_exit_inside_thriving_rejected() {
        let params = MutationRuleParams { earnings_exit_below: 10.0, ..MutationRuleParams::default() };
        assert!(matches!(
            MutationRuleConfig::new(params),
            Err(ConfigurationError::ExitThreshold { exit: "earnings_exit_below", .. })
        ));
    }

    #[test]
    fn probability_out_of_range_rejected() {
        let params = MutationRuleParams {
            active_exploration_probability: 1.3,
            ..MutationRuleParams::default()
        };
        assert!(matches!(
            MutationRuleConfig::new(params),
            Err(ConfigurationError::OutOfUnitRange { field: "active_exploration_probability", .. })
        ));
    }

    #[test]
    fn nan_boundary_rejected() {
        let params = MutationRuleParams { recovery_below: f64::NAN, ..MutationRuleParams::default() };
        assert!(matches!(
            MutationRuleConfig::new(params),
            Err(ConfigurationError::NonFinite { field: "recovery_below", .. })
        ));
    }

    #[test]
    fn zero_cooldown_and_band_rejected() {
        let params = MutationRuleParams { cooldown_ticks: 0, ..MutationRuleParams::default() };
        assert!(matches!(MutationRuleConfig::new(params), Err(ConfigurationError::ZeroCooldown)));

        let params = MutationRuleParams { stagnation_band: 0.0, ..MutationRuleParams::default() };
        assert!(matches!(MutationRuleConfig::new(params), Err(ConfigurationError::NonPositiveBand(_))));
    }

    #[test]
    fn bad_policy_params_fail_engine_construction() {
        let policies = PolicyParams { lazy_max_distance_km: -2.0, ..PolicyParams::default() };
        assert!(matches!(
            MutationEngine::new(MutationRuleConfig::default(), policies),
            Err(ConfigurationError::Policy(_))
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let config: MutationRuleConfig =
            serde_json::from_str(r#"{ "cooldown_ticks": 4 }"#).unwrap();
        assert_eq!(config.params().cooldown_ticks, 4);
        assert_eq!(config.params().thriving_at, 10.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_inconsistent_thresholds_fail_at_load() {
        let result: Result<MutationRuleConfig, _> =
            serde_json::from_str(r#"{ "struggling_below": 20.0 }"#);
        assert!(result.is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_unknown_field_rejected() {
        let result: Result<MutationRuleConfig, _> =
            serde_json::from_str(r#"{ "cooldown": 4 }"#);
        assert!(result.is_err());
    }
}

// ── Zone ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod zone_tests {
    use super::*;

    #[test]
    fn half_open_boundaries() {
        let rules = MutationRuleConfig::default();
        let cases = [
            (-50.0, Zone::Struggling),
            (2.999, Zone::Struggling),
            (3.0,   Zone::Recovery),
            (4.999, Zone::Recovery),
            (5.0,   Zone::Normal),
            (7.499, Zone::Normal),
            (7.5,   Zone::Good),
            (9.999, Zone::Good),
            (10.0,  Zone::Thriving),
            (1e9,   Zone::Thriving),
        ];
        for (avg, zone) in cases {
            assert_eq!(Zone::classify(avg, &rules), zone, "avg {avg}");
        }
    }

    #[test]
    fn only_outer_zones_have_targets() {
        assert_eq!(
            Zone::Struggling.primary_target(),
            Some((BehaviorKind::Greedy, MutationReason::PerformanceLowEarnings))
        );
        assert_eq!(
            Zone::Thriving.primary_target(),
            Some((BehaviorKind::EarningsMax, MutationReason::PerformanceHighEarnings))
        );
        for zone in [Zone::Recovery, Zone::Normal, Zone::Good] {
            assert_eq!(zone.primary_target(), None);
        }
    }
}

// ── MutationEngine::decide ────────────────────────────────────────────────────

#[cfg(test)]
mod decide_tests {
    use super::*;

    fn decide(kind: BehaviorKind, history: &EarningsHistory) -> Option<MutationDecision> {
        engine().decide(kind, history, &mut SimRng::new(0))
    }

    #[test]
    fn empty_history_never_mutates() {
        for kind in BehaviorKind::ALL {
            assert_eq!(decide(kind, &EarningsHistory::new()), None);
        }
    }

    #[test]
    fn greedy_exit_at_threshold() {
        assert_eq!(decide(BehaviorKind::Greedy, &spread(4.99)), None);
        assert_eq!(
            decide(BehaviorKind::Greedy, &spread(5.0)),
            Some(MutationDecision { to: BehaviorKind::Lazy, reason: MutationReason::ExitGreedy })
        );
    }

    #[test]
    fn earnings_exit_below_threshold() {
        assert_eq!(decide(BehaviorKind::EarningsMax, &spread(7.5)), None);
        assert_eq!(
            decide(BehaviorKind::EarningsMax, &spread(7.49)),
            Some(MutationDecision { to: BehaviorKind::Lazy, reason: MutationReason::ExitEarnings })
        );
    }

    #[test]
    fn exit_takes_precedence_over_primary() {
        // Thriving average, but a Greedy driver leaves through the exit first.
        assert_eq!(
            decide(BehaviorKind::Greedy, &spread(12.0)).map(|d| d.reason),
            Some(MutationReason::ExitGreedy)
        );
        // Struggling average, EarningsMax exits rather than jumping to Greedy.
        assert_eq!(
            decide(BehaviorKind::EarningsMax, &spread(1.0)).map(|d| d.reason),
            Some(MutationReason::ExitEarnings)
        );
    }

    #[test]
    fn lazy_primary_mutations() {
        assert_eq!(
            decide(BehaviorKind::Lazy, &spread(2.0)),
            Some(MutationDecision { to: BehaviorKind::Greedy, reason: MutationReason::PerformanceLowEarnings })
        );
        assert_eq!(
            decide(BehaviorKind::Lazy, &spread(11.0)),
            Some(MutationDecision { to: BehaviorKind::EarningsMax, reason: MutationReason::PerformanceHighEarnings })
        );
    }

    #[test]
    fn holding_zones_without_stagnation_do_nothing() {
        for avg in [3.5, 6.0, 8.5] {
            assert_eq!(decide(BehaviorKind::Lazy, &spread(avg)), None, "avg {avg}");
        }
        assert_eq!(decide(BehaviorKind::Greedy, &spread(4.0)), None);
        assert_eq!(decide(BehaviorKind::EarningsMax, &spread(8.5)), None);
    }

    #[test]
    fn primary_skipped_when_already_on_target() {
        // Greedy in Struggling, not stagnated: nothing to do.
        assert_eq!(decide(BehaviorKind::Greedy, &spread(2.0)), None);
        // EarningsMax in Thriving, not stagnated: nothing to do.
        assert_eq!(decide(BehaviorKind::EarningsMax, &spread(20.0)), None);
    }

    #[test]
    fn zone_outcome_independent_of_rng() {
        let e = engine();
        for kind in BehaviorKind::ALL {
            for avg in [0.5, 2.9, 3.0, 4.2, 5.0, 6.3, 7.5, 9.9, 10.0, 42.0] {
                let history = spread(avg);
                let expected = e.decide(kind, &history, &mut SimRng::new(1));
                for seed in 2..20 {
                    assert_eq!(e.decide(kind, &history, &mut SimRng::new(seed)), expected);
                }
            }
        }
    }

    #[test]
    fn stagnated_lazy_always_explores() {
        let e = engine();
        let mut rng = SimRng::new(99);
        let mut to_greedy = 0;
        const TRIALS: usize = 10_000;
        for _ in 0..TRIALS {
            let d = e.decide(BehaviorKind::Lazy, &flat(6.0), &mut rng)
                .expect("stagnated lazy driver must explore");
            assert_eq!(d.reason, MutationReason::StagnationExploration);
            match d.to {
                BehaviorKind::Greedy      => to_greedy += 1,
                BehaviorKind::EarningsMax => {}
                BehaviorKind::Lazy        => panic!("exploration never targets lazy"),
            }
        }
        assert!((4_700..=5_300).contains(&to_greedy), "greedy share {to_greedy}/{TRIALS}");
    }

    #[test]
    fn stagnated_active_explores_about_thirty_percent() {
        let e = engine();
        let cases = [
            (BehaviorKind::Greedy, flat(4.0), BehaviorKind::EarningsMax),
            (BehaviorKind::EarningsMax, flat(8.5), BehaviorKind::Greedy),
        ];
        for (kind, history, other) in cases {
            let mut rng = SimRng::new(7);
            let mut fired = 0;
            const TRIALS: usize = 10_000;
            for _ in 0..TRIALS {
                if let Some(d) = e.decide(kind, &history, &mut rng) {
                    assert_eq!(d.to, other);
                    assert_eq!(d.reason, MutationReason::StagnationExploration);
                    fired += 1;
                }
            }
            assert!((2_700..=3_300).contains(&fired), "{kind}: fired {fired}/{TRIALS}");
        }
    }

    #[test]
    fn below_stagnation_ratio_does_not_explore() {
        // 6 of 10 fares at 6.0 and 4 far away: ratio 0.6 < 0.7.
        let history = EarningsHistory::from_fares([6.0, 6.0, 6.0, 6.0, 6.0, 6.0, 3.0, 9.0, 3.0, 9.0]);
        assert!((history.stagnation_ratio() - 0.6).abs() < 1e-12);
        let e = engine();
        let mut rng = SimRng::new(3);
        for _ in 0..100 {
            assert_eq!(e.decide(BehaviorKind::Lazy, &history, &mut rng), None);
        }
    }
}

// ── MutationEngine::evaluate / run_tick ───────────────────────────────────────

#[cfg(test)]
mod evaluate_tests {
    use super::*;

    #[test]
    fn cooldown_gate_leaves_driver_untouched() {
        let e = engine();
        let mut d = driver_with(BehaviorKind::Lazy, flat(11.0));
        d.cooldown_until = Tick(20);

        let mut rng = SimRng::new(5);
        assert_eq!(e.evaluate(&mut d, Tick(19), &mut rng), None);
        assert_eq!(d.behavior_kind(), BehaviorKind::Lazy);
        assert_eq!(d.cooldown_until, Tick(20));

        // No randomness consumed while gated.
        let mut fresh = SimRng::new(5);
        assert_eq!(rng.random::<u64>(), fresh.random::<u64>());
    }

    #[test]
    fn empty_history_skipped_without_cooldown() {
        let e = engine();
        let mut d = driver_with(BehaviorKind::Lazy, EarningsHistory::new());
        assert_eq!(e.evaluate(&mut d, Tick(3), &mut SimRng::new(0)), None);
        assert_eq!(d.cooldown_until, Tick::ZERO);
    }

    #[test]
    fn thriving_then_exit_scenario() {
        let e = engine();
        let mut rng = SimRng::new(0);
        let mut d = driver_with(BehaviorKind::Lazy, flat(11.0));

        let first = e.evaluate(&mut d, Tick(5), &mut rng).expect("thriving driver mutates");
        assert_eq!(first.tick, Tick(5));
        assert_eq!(first.from, BehaviorKind::Lazy);
        assert_eq!(first.to, BehaviorKind::EarningsMax);
        assert_eq!(first.reason, MutationReason::PerformanceHighEarnings);
        assert_eq!(d.behavior_kind(), BehaviorKind::EarningsMax);
        assert_eq!(d.cooldown_until, Tick(15));

        for _ in 0..10 {
            d.earnings.append(6.5);
        }
        for t in 6..15 {
            assert_eq!(e.evaluate(&mut d, Tick(t), &mut rng), None, "cooling down at tick {t}");
        }

        let second = e.evaluate(&mut d, Tick(15), &mut rng).expect("exit fires after cooldown");
        assert_eq!(second.tick, Tick(15));
        assert_eq!(second.to, BehaviorKind::Lazy);
        assert_eq!(second.reason, MutationReason::ExitEarnings);
        assert_eq!(d.cooldown_until, Tick(25));
    }

    #[test]
    fn swap_installs_fresh_policy_from_params() {
        let policies = PolicyParams { greedy_max_distance_km: 9.0, ..PolicyParams::default() };
        let e = MutationEngine::new(MutationRuleConfig::default(), policies).unwrap();
        let mut d = driver_with(BehaviorKind::Lazy, spread(1.0));
        e.evaluate(&mut d, Tick(0), &mut SimRng::new(0)).unwrap();
        assert_eq!(d.behavior, policies.instantiate(BehaviorKind::Greedy));
    }

    #[test]
    fn run_tick_appends_stamped_events_in_id_order() {
        let e = engine();
        let mut store = DriverStoreBuilder::new(4, PolicyParams::default())
            .earnings(vec![spread(11.0), spread(6.0), spread(1.0), EarningsHistory::new()])
            .build()
            .unwrap();
        let mut ledger = MutationLedger::new();

        let fired = e.run_tick(&mut store, Tick(7), &mut ledger, &mut SimRng::new(0));
        assert_eq!(fired, 2);
        let events = ledger.events_at(Tick(7));
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].driver, DriverId(0));
        assert_eq!(events[0].reason, MutationReason::PerformanceHighEarnings);
        assert_eq!(events[1].driver, DriverId(2));
        assert_eq!(events[1].reason, MutationReason::PerformanceLowEarnings);
    }

    #[test]
    fn cooldown_and_hysteresis_hold_over_long_run() {
        let e = engine();
        let cooldown = e.rules().params().cooldown_ticks;
        let mut store = DriverStoreBuilder::new(40, PolicyParams::default()).build().unwrap();
        let mut ledger = MutationLedger::new();
        let mut rng = SimRng::new(2024);

        for t in 0..400u64 {
            let tick = Tick(t);
            // Each driver earns a fare around its own drifting level.
            for driver in store.iter_mut() {
                let level = 1.0 + ((driver.id.0 as u64 * 7 + t / 25) % 12) as f64;
                let fare = level * rng.gen_range(0.97..1.03);
                driver.record_trip(fare, tick);
            }
            let averages: Vec<f64> = store
                .iter()
                .map(|d| d.earnings.average().unwrap_or(f64::NAN))
                .collect();

            e.run_tick(&mut store, tick, &mut ledger, &mut rng);

            for ev in ledger.events_at(tick) {
                let avg = averages[ev.driver.index()];
                match ev.reason {
                    MutationReason::ExitGreedy   => assert!(avg >= 5.0, "greedy exit at {avg}"),
                    MutationReason::ExitEarnings => assert!(avg < 7.5, "earnings exit at {avg}"),
                    _ => {}
                }
            }
        }

        assert!(!ledger.is_empty(), "a drifting fleet should mutate");
        for id in store.driver_ids() {
            let ticks: Vec<Tick> = ledger.events_for(id).map(|ev| ev.tick).collect();
            for pair in ticks.windows(2) {
                assert!(pair[1] - pair[0] >= cooldown, "{id}: {:?} too close", pair);
            }
        }
    }
}

// ── MutationLedger ────────────────────────────────────────────────────────────

#[cfg(test)]
mod ledger_tests {
    use super::*;

    #[test]
    fn empty_ledger_queries() {
        let ledger = MutationLedger::new();
        assert!(ledger.is_empty());
        assert!(ledger.events_at(Tick(0)).is_empty());
        assert_eq!(ledger.last_tick(), None);
    }

    #[test]
    fn events_at_selects_exact_tick() {
        let mut ledger = MutationLedger::new();
        ledger.append(event(1, 0, MutationReason::ExitGreedy));
        ledger.append(event(3, 1, MutationReason::ExitEarnings));
        ledger.append(event(3, 2, MutationReason::StagnationExploration));
        ledger.append(event(8, 0, MutationReason::PerformanceLowEarnings));

        assert_eq!(ledger.events_at(Tick(1)).len(), 1);
        let at_three = ledger.events_at(Tick(3));
        assert_eq!(at_three.len(), 2);
        assert_eq!(at_three[0].driver, DriverId(1), "append order preserved");
        assert_eq!(at_three[1].driver, DriverId(2));
        assert!(ledger.events_at(Tick(2)).is_empty());
        assert!(ledger.events_at(Tick(100)).is_empty(), "future tick is empty, not an error");
        assert_eq!(ledger.len(), 4);
        assert_eq!(ledger.last_tick(), Some(Tick(8)));
    }

    #[test]
    fn count_by_reason_and_totals() {
        let mut ledger = MutationLedger::new();
        ledger.append(event(2, 0, MutationReason::StagnationExploration));
        ledger.append(event(2, 1, MutationReason::StagnationExploration));
        ledger.append(event(2, 2, MutationReason::ExitGreedy));
        ledger.append(event(5, 3, MutationReason::ExitGreedy));

        let counts = ledger.count_by_reason(Tick(2));
        assert_eq!(counts[MutationReason::StagnationExploration.index()], 2);
        assert_eq!(counts[MutationReason::ExitGreedy.index()], 1);
        assert_eq!(counts.iter().sum::<usize>(), 3);
        assert_eq!(ledger.total_for(MutationReason::ExitGreedy), 2);
    }

    #[test]
    fn events_for_driver_in_order() {
        let mut ledger = MutationLedger::new();
        ledger.append(event(0, 4, MutationReason::PerformanceLowEarnings));
        ledger.append(event(1, 5, MutationReason::PerformanceLowEarnings));
        ledger.append(event(12, 4, MutationReason::ExitGreedy));
        let ticks: Vec<Tick> = ledger.events_for(DriverId(4)).map(|e| e.tick).collect();
        assert_eq!(ticks, vec![Tick(0), Tick(12)]);
    }

    #[test]
    fn event_recorded_at_t_readable_after_clock_advances() {
        let mut clock = SimClock::new();
        let mut ledger = MutationLedger::new();
        for _ in 0..4 {
            clock.advance();
        }

        ledger.append(event(clock.current_tick().0, 9, MutationReason::ExitEarnings));
        clock.advance();

        let elapsed = clock.elapsed_tick().expect("a tick has elapsed");
        assert_eq!(elapsed, Tick(4));
        assert_eq!(ledger.events_at(elapsed).len(), 1);
        assert!(
            ledger.events_at(clock.current_tick()).is_empty(),
            "reading with the post-advance clock value misses the event"
        );
    }

    #[test]
    fn reason_names_match_ledger_vocabulary() {
        let names: Vec<&str> = MutationReason::ALL.iter().map(|r| r.as_str()).collect();
        assert_eq!(
            names,
            [
                "performance_low_earnings",
                "performance_high_earnings",
                "exit_greedy",
                "exit_earnings",
                "stagnation_exploration",
            ]
        );
        for (i, reason) in MutationReason::ALL.iter().enumerate() {
            assert_eq!(reason.index(), i);
        }
    }
}
