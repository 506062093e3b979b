//! `ds-behavior` — offer-acceptance policies a driver can run.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                          |
//! |------------|-------------------------------------------------------------------|
//! | [`offer`]  | `OfferContext` (what the dispatch layer shows a driver), `Decision` |
//! | [`policy`] | `BehaviorKind`, `BehaviorPolicy`, `PolicyParams`                  |
//! | [`error`]  | `BehaviorError`, `BehaviorResult<T>`                              |
//!
//! # Design notes
//!
//! A policy is a closed enum with exactly three cases.  Each instance is
//! immutable; the mutation engine swaps a driver's policy wholesale for a
//! freshly instantiated one and never edits it in place.
//!
//! [`BehaviorPolicy::decide`] is a pure function of the policy's own
//! parameters and the offer's attributes, so acceptance logic is testable
//! without any simulation state.

pub mod error;
pub mod offer;
pub mod policy;


pub use error::{BehaviorError, BehaviorResult};
pub use offer::{Decision, OfferContext};
pub use policy::{BehaviorKind, BehaviorPolicy, PolicyParams};
