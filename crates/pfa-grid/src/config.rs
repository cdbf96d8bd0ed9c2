//! Grid sweep configuration.

use serde::{Deserialize, Serialize};

/// What to do when the event source fails for one combination.
///
/// Per-session validation failures are data and never reach this policy;
/// it only governs true faults (unreadable file, broken table).
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Report the failure via the observer, count it, keep sweeping.
    /// Loses one combination instead of the whole grid.
    #[default]
    Continue,
    /// Stop dispatching new combinations and propagate the first failure.
    /// In-flight workers run to completion.
    Abort,
}

/// Axis value-lists and execution knobs for one sweep.
///
/// The grid is the Cartesian product of the five axis vectors; an empty
/// axis yields an empty grid.  Typically deserialized from a JSON/TOML
/// file by the application.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GridConfig {
    /// Request-rate axis, vehicles per minute.
    pub request_rates: Vec<u32>,

    /// Maximum-platoon-size axis.
    pub max_platoon_sizes: Vec<u32>,

    /// Maximum-maneuver-distance axis, meters.
    pub max_distances: Vec<u32>,

    /// Penetration-rate axis.
    pub penetrations: Vec<f64>,

    /// Repetition indices (independent runs per grid point).
    pub repetitions: Vec<u32>,

    /// Worker thread count.  `None` uses all logical cores; `Some(1)` forces
    /// strictly sequential execution.
    #[serde(default)]
    pub num_threads: Option<usize>,

    /// Failure policy for unreadable combinations.
    #[serde(default)]
    pub on_source_error: ErrorPolicy,
}

impl GridConfig {
    /// Number of combinations the grid will enumerate.
    pub fn combinations(&self) -> usize {
        self.request_rates.len()
            * self.max_platoon_sizes.len()
            * self.max_distances.len()
            * self.penetrations.len()
            * self.repetitions.len()
    }
}
