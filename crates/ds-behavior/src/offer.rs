//! The offer a dispatch layer presents to a driver.

/// Attributes of one ride offer, as seen by the driver being asked.
///
/// Built by the dispatch layer; policies only read it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OfferContext {
    /// Distance from the driver's position to the pickup, km.
    pub distance_km: f64,

    /// Fare the driver will earn if the trip completes.
    pub expected_reward: f64,

    /// Expected trip duration, minutes.
    pub expected_duration_min: f64,

    /// Ticks since the driver last completed a trip.
    pub idle_ticks: u64,
}

/// Outcome of [`BehaviorPolicy::decide`][crate::BehaviorPolicy::decide].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    Accept,
    Reject,
}

impl Decision {
    #[inline]
    pub fn is_accept(self) -> bool {
        self == Decision::Accept
    }
}

impl From<bool> for Decision {
    #[inline]
    fn from(accept: bool) -> Self {
        if accept { Decision::Accept } else { Decision::Reject }
    }
}
