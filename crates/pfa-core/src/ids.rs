//! Strongly typed identifier wrappers for vehicles and PF sessions.
//!
//! Both IDs are `Copy + Ord + Hash` so they can be used as map keys and
//! sorted collection elements without ceremony.  The inner integer is `pub`
//! because the columnar sources read and write it directly.

use std::fmt;

/// Identifier of one vehicle in the simulation.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleId(pub u32);

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "veh{}", self.0)
    }
}

/// Identifier of one PF session, scoped to a vehicle.
///
/// The log uses `0` as a sentinel for rows that are not part of any session
/// (lifecycle markers, barrier events).  Sources exclude such rows at read
/// time; [`SessionId::is_session`] lets downstream code re-check cheaply.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionId(pub u32);

impl SessionId {
    /// Sentinel meaning "this row belongs to no session".
    pub const NONE: SessionId = SessionId(0);

    /// `true` for every ID except the [`NONE`][Self::NONE] sentinel.
    #[inline]
    pub fn is_session(self) -> bool {
        self != Self::NONE
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sid{}", self.0)
    }
}
