//! One operation-log row.

use crate::ids::{SessionId, VehicleId};
use crate::op::PfOp;

/// A single row of the per-vehicle operation log.
///
/// Events are immutable once decoded.  The three `session_*` fields are
/// written by the simulation only on the terminal row of a session; on every
/// other row their content is unspecified and must not be read.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PfEvent {
    /// Simulation time the row was logged, in seconds.
    pub time: f64,

    /// Vehicle that logged the row.
    pub vehicle: VehicleId,

    /// Session the row belongs to; [`SessionId::NONE`] for lifecycle rows.
    pub session: SessionId,

    /// Why the row was logged.
    pub op: PfOp,

    /// Session start time as recorded by the vehicle (terminal rows only).
    pub session_start: f64,

    /// Session end time as recorded by the vehicle (terminal rows only).
    pub session_end: f64,

    /// Longitudinal position at session end (terminal rows only).
    pub session_end_x: f64,
}
