//! The dispatch seam: where ride offers meet drivers.

use ds_core::{SimRng, Tick};
use ds_driver::DriverStore;

/// Offer generation and matching, run once per tick before mutation
/// evaluation.
///
/// Implementations build an [`OfferContext`][ds_behavior::OfferContext] per
/// offer, ask `driver.behavior.decide(&offer)`, and book accepted trips with
/// [`Driver::record_trip`][ds_driver::Driver::record_trip].  They must not
/// touch `behavior` or `cooldown_until`; those belong to the mutation engine.
///
/// All randomness must come from `rng` so runs stay reproducible.
pub trait Dispatcher {
    /// Run the dispatch phase for `tick`.  Returns the number of trips
    /// completed this tick.
    fn dispatch(&mut self, tick: Tick, drivers: &mut DriverStore, rng: &mut SimRng) -> usize;
}

/// A [`Dispatcher`] that never offers anything.
pub struct NoopDispatcher;

impl Dispatcher for NoopDispatcher {
    fn dispatch(&mut self, _tick: Tick, _drivers: &mut DriverStore, _rng: &mut SimRng) -> usize {
        0
    }
}
