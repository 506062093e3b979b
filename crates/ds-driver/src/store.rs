//! Fleet storage: every driver, indexed by `DriverId`.

use ds_core::DriverId;

use crate::Driver;

/// All drivers in the simulation.
///
/// `drivers[i].id == DriverId(i)` for every `i`; iteration is in ascending
/// `DriverId` order, which fixes the order of RNG draws within a tick.
#[derive(Clone, Debug, Default)]
pub struct DriverStore {
    drivers: Vec<Driver>,
}

impl DriverStore {
    pub(crate) fn new(drivers: Vec<Driver>) -> Self {
        debug_assert!(
            drivers.iter().enumerate().all(|(i, d)| d.id.index() == i),
            "driver ids must match their index"
        );
        Self { drivers }
    }

    /// Number of drivers.
    #[inline]
    pub fn count(&self) -> usize {
        self.drivers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }

    /// Iterator over all `DriverId`s in ascending order.
    pub fn driver_ids(&self) -> impl Iterator<Item = DriverId> + '_ {
        self.drivers.iter().map(|d| d.id)
    }

    pub fn get(&self, id: DriverId) -> Option<&Driver> {
        self.drivers.get(id.index())
    }

    pub fn get_mut(&mut self, id: DriverId) -> Option<&mut Driver> {
        self.drivers.get_mut(id.index())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Driver> {
        self.drivers.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Driver> {
        self.drivers.iter_mut()
    }

    pub fn as_slice(&self) -> &[Driver] {
        &self.drivers
    }

    /// Mutable slice access for dispatchers that index drivers directly.
    /// The store cannot grow or shrink through it, so ids stay dense.
    pub fn as_mut_slice(&mut self) -> &mut [Driver] {
        &mut self.drivers
    }

    /// Number of drivers currently running each policy, in
    /// [`BehaviorKind::ALL`](ds_behavior::BehaviorKind::ALL) order.
    pub fn behavior_counts(&self) -> [usize; 3] {
        let mut counts = [0; 3];
        for driver in &self.drivers {
            counts[driver.behavior_kind().index()] += 1;
        }
        counts
    }
}

impl<'a> IntoIterator for &'a DriverStore {
    type Item = &'a Driver;
    type IntoIter = std::slice::Iter<'a, Driver>;

    fn into_iter(self) -> Self::IntoIter {
        self.drivers.iter()
    }
}

impl<'a> IntoIterator for &'a mut DriverStore {
    type Item = &'a mut Driver;
    type IntoIter = std::slice::IterMut<'a, Driver>;

    fn into_iter(self) -> Self::IntoIter {
        self.drivers.iter_mut()
    }
}
