//! Strongly typed, zero-cost identifier wrappers.
//!
//! IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  The inner integer is `pub` to allow
//! direct indexing into the driver store via `id.0 as usize`, but callers
//! should prefer the `.index()` helper for clarity.

use std::fmt;

/// Index of a driver in the fleet.  Max ~4.3 billion drivers.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DriverId(pub u32);

impl DriverId {
    /// Sentinel meaning "no valid ID"; equal to `u32::MAX`.
    pub const INVALID: DriverId = DriverId(u32::MAX);

    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Default for DriverId {
    /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
    #[inline(always)]
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for DriverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DriverId({})", self.0)
    }
}

impl From<DriverId> for usize {
    #[inline(always)]
    fn from(id: DriverId) -> usize {
        id.0 as usize
    }
}

impl TryFrom<usize> for DriverId {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<DriverId, Self::Error> {
        u32::try_from(n).map(DriverId)
    }
}
