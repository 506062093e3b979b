//! Append-only chronological log of mutation events.

use ds_core::{DriverId, Tick};

use crate::{MutationEvent, MutationReason};

/// Every mutation that has fired, in the order it fired.
///
/// Events are appended with non-decreasing ticks (the engine only ever
/// appends for the tick being evaluated), so per-tick lookups are a binary
/// search.  Nothing is ever removed or edited.
#[derive(Clone, Debug, Default)]
pub struct MutationLedger {
    events: Vec<MutationEvent>,
}

impl MutationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `event`.  O(1) amortised.
    ///
    /// `event.tick` must not be earlier than the last appended tick.
    pub fn append(&mut self, event: MutationEvent) {
        debug_assert!(
            self.last_tick().is_none_or(|last| event.tick >= last),
            "ledger appends must be chronological: {} after {:?}",
            event.tick,
            self.last_tick(),
        );
        self.events.push(event);
    }

    /// All events stamped with `tick`, in append order.
    ///
    /// A tick that has not elapsed yet (or never saw a mutation) yields an
    /// empty slice.
    pub fn events_at(&self, tick: Tick) -> &[MutationEvent] {
        let start = self.events.partition_point(|e| e.tick < tick);
        let end   = self.events.partition_point(|e| e.tick <= tick);
        &self.events[start..end]
    }

    /// Per-reason counts for `tick`, in [`MutationReason::ALL`] order.
    pub fn count_by_reason(&self, tick: Tick) -> [usize; 5] {
        let mut counts = [0; 5];
        for event in self.events_at(tick) {
            counts[event.reason.index()] += 1;
        }
        counts
    }

    /// Every event for one driver, oldest first.
    pub fn events_for(&self, driver: DriverId) -> impl Iterator<Item = &MutationEvent> + '_ {
        self.events.iter().filter(move |e| e.driver == driver)
    }

    /// Tick of the most recent event.
    pub fn last_tick(&self) -> Option<Tick> {
        self.events.last().map(|e| e.tick)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MutationEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Occurrences of `reason` across the whole run.
    pub fn total_for(&self, reason: MutationReason) -> usize {
        self.events.iter().filter(|e| e.reason == reason).count()
    }
}

impl<'a> IntoIterator for &'a MutationLedger {
    type Item = &'a MutationEvent;
    type IntoIter = std::slice::Iter<'a, MutationEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
