//! The experiment-parameter key.

use std::fmt;

/// The 5-dimensional key identifying one simulation run within a sweep.
///
/// Every output record is tagged with the `ExpParams` of the run it came
/// from, so merged summary tables can always be re-grouped downstream.
///
/// `penetration` is compared with plain float equality when filtering: the
/// swept values are exact binary fractions (0.25, 0.5, …) written unchanged
/// into the event table by the simulation.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExpParams {
    /// Platoon-formation request rate, in vehicles per minute.
    pub request_rate: u32,

    /// Maximum platoon size allowed by the coordinator.
    pub max_platoon_size: u32,

    /// Maximum allowed maneuver distance, in meters.
    pub max_distance: u32,

    /// Fraction of vehicles equipped with the PF application.
    pub penetration: f64,

    /// Repetition index of the run (independent RNG seed).
    pub repetition: u32,
}

impl fmt::Display for ExpParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(rate={} size={} dist={} pen={} rep={})",
            self.request_rate,
            self.max_platoon_size,
            self.max_distance,
            self.penetration,
            self.repetition,
        )
    }
}
