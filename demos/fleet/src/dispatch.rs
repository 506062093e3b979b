//! Synthetic ride demand for the demo.

use ds_behavior::OfferContext;
use ds_core::{Point, SimRng, Tick};
use ds_driver::DriverStore;
use ds_sim::Dispatcher;

use crate::scenario::OfferParams;

/// Shortest trip the generator will produce, km.
const MIN_TRIP_KM: f64 = 0.5;

/// Generates uniformly placed ride requests and offers each one to free
/// drivers in turn until someone accepts.
///
/// The scan starts at a random driver and wraps around, so low ids are not
/// favoured.  A driver takes at most one trip per tick and is moved to the
/// dropoff point.
pub struct RandomOfferDispatcher {
    params: OfferParams,
    busy:   Vec<bool>,
}

impl RandomOfferDispatcher {
    pub fn new(params: OfferParams) -> Self {
        Self { params, busy: Vec::new() }
    }

    fn random_point(&self, rng: &mut SimRng) -> Point {
        Point::new(
            rng.gen_range(0.0..=self.params.area_km),
            rng.gen_range(0.0..=self.params.area_km),
        )
    }
}

impl Dispatcher for RandomOfferDispatcher {
    fn dispatch(&mut self, tick: Tick, drivers: &mut DriverStore, rng: &mut SimRng) -> usize {
        let n = drivers.count();
        if n == 0 {
            return 0;
        }
        self.busy.clear();
        self.busy.resize(n, false);

        let requests = (self.params.offers_per_driver * n as f64).round() as usize;
        let drivers = drivers.as_mut_slice();
        let mut trips = 0;

        for _ in 0..requests {
            let pickup = self.random_point(rng);
            let dropoff = self.random_point(rng);
            let trip_km = pickup.distance_km(dropoff).max(MIN_TRIP_KM);
            let fare = self.params.base_fare + self.params.fare_per_km * trip_km;
            let duration_min = trip_km / self.params.speed_kmh * 60.0;

            let start = rng.gen_range(0..n);
            for i in (start..n).chain(0..start) {
                if self.busy[i] {
                    continue;
                }
                let driver = &mut drivers[i];
                let offer = OfferContext {
                    distance_km:           driver.position.distance_km(pickup),
                    expected_reward:       fare,
                    expected_duration_min: duration_min,
                    idle_ticks:            driver.idle_ticks(tick),
                };
                if driver.behavior.decide(&offer).is_accept() {
                    driver.record_trip(fare, tick);
                    driver.position = dropoff;
                    self.busy[i] = true;
                    trips += 1;
                    break;
                }
            }
        }
        trips
    }
}
