//! `ds-mutation` — the per-tick behavior-mutation engine.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                         |
//! |-------------|------------------------------------------------------------------|
//! | [`config`]  | `MutationRuleParams` (raw, defaulted), `MutationRuleConfig` (validated) |
//! | [`zone`]    | `Zone`: five-band classifier over a driver's rolling average     |
//! | [`event`]   | `MutationEvent`, `MutationReason`                                |
//! | [`ledger`]  | `MutationLedger`: append-only, queried by tick                  |
//! | [`engine`]  | `MutationEngine`, `MutationDecision`                             |
//! | [`error`]   | `ConfigurationError`                                             |
//!
//! # Evaluation order
//!
//! For every driver, once per tick, in ascending `DriverId` order:
//!
//! ```text
//!   ① cooldown gate      tick < cooldown_until          → untouched
//!   ② average            empty history                  → skip, no error
//!   ③ exit (hysteresis)  Greedy & avg ≥ greedy_exit     → Lazy  (exit_greedy)
//!                        EarningsMax & avg < earn_exit  → Lazy  (exit_earnings)
//!   ④ zone → primary     Struggling → Greedy            (performance_low_earnings)
//!                        Thriving   → EarningsMax       (performance_high_earnings)
//!   ⑤ stagnation         Lazy: explore to Greedy/EarningsMax
//!                        Greedy/EarningsMax: maybe swap (stagnation_exploration)
//! ```
//!
//! The first step that decides stops evaluation.  A fired mutation resets
//! the cooldown to `tick + cooldown_ticks` and is appended to the ledger
//! stamped with `tick`.  It takes effect for offers from `tick + 1` onward
//! because the dispatch phase of `tick` has already run.

pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod ledger;
pub mod zone;

#[cfg(test)]
mod tests;

pub use config::{MutationRuleConfig, MutationRuleParams};
pub use engine::{MutationDecision, MutationEngine};
pub use error::ConfigurationError;
pub use event::{MutationEvent, MutationReason};
pub use ledger::MutationLedger;
pub use zone::Zone;
