//! Flattened session records and the verdict types that carry them.
//!
//! Validation failures are data, not faults: a session that fails a check
//! still produces a [`SessionRecord`], tagged with a [`SessionFault`] label
//! instead of an operation name, so it stays queryable downstream.  The one
//! exception is the non-positive-duration case, which is excluded from
//! output entirely ([`SessionVerdict::Dropped`]).

use crate::error::CoreError;
use crate::ids::{SessionId, VehicleId};
use crate::op::PfOp;
use crate::params::ExpParams;

// ── SessionFault ──────────────────────────────────────────────────────────────

/// Why a session group failed validation.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionFault {
    /// The group did not contain exactly two events.
    WrongEventCount,
    /// The earlier event was not the session-opening request.
    NotStartingWithRequest,
    /// The two independently derived durations disagree beyond tolerance.
    DurationMismatch,
}

impl SessionFault {
    /// The error tag written to summary tables.
    pub fn label(self) -> &'static str {
        match self {
            SessionFault::WrongEventCount        => "PROC ERROR",
            SessionFault::NotStartingWithRequest => "SID NOT STARTING WITH REQ",
            SessionFault::DurationMismatch       => "SID WRONG DURATION",
        }
    }

    /// Parse an error tag back into a fault.
    pub fn from_label(label: &str) -> Option<SessionFault> {
        [
            SessionFault::WrongEventCount,
            SessionFault::NotStartingWithRequest,
            SessionFault::DurationMismatch,
        ]
        .into_iter()
        .find(|f| f.label() == label)
    }
}

// ── SessionOutcome ────────────────────────────────────────────────────────────

/// What the `outcome` column of a summary row holds: the terminal operation
/// of a valid session, or the fault tag of an invalid one.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionOutcome {
    Op(PfOp),
    Fault(SessionFault),
}

impl SessionOutcome {
    /// The string written to the `outcome` column.
    pub fn label(self) -> &'static str {
        match self {
            SessionOutcome::Op(op)       => op.name(),
            SessionOutcome::Fault(fault) => fault.label(),
        }
    }

    /// Parse an `outcome` column value.  Lossless inverse of [`label`][Self::label].
    pub fn from_label(label: &str) -> Result<SessionOutcome, CoreError> {
        PfOp::from_name(label)
            .map(SessionOutcome::Op)
            .or_else(|| SessionFault::from_label(label).map(SessionOutcome::Fault))
            .ok_or_else(|| CoreError::UnknownOutcomeLabel(label.to_owned()))
    }

    /// `true` when this outcome is a validation fault tag.
    #[inline]
    pub fn is_fault(self) -> bool {
        matches!(self, SessionOutcome::Fault(_))
    }
}

// ── SessionRecord ─────────────────────────────────────────────────────────────

/// One flattened output row describing the outcome of a session.
///
/// For fault records, the three float fields are `NaN` placeholders.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionRecord {
    /// The run the session belongs to.
    pub params: ExpParams,

    /// Vehicle that drove the session.
    pub vehicle: VehicleId,

    /// Session identifier, scoped to the vehicle.
    pub session: SessionId,

    /// Seconds from the request row to the terminal row.
    pub duration: f64,

    /// Longitudinal position at session end.
    pub end_x: f64,

    /// Session end time as recorded on the terminal row.
    pub end_time: f64,

    /// Terminal operation, or fault tag.
    pub outcome: SessionOutcome,
}

impl SessionRecord {
    /// Build a fault record: `NaN` in every float field, tag in `outcome`.
    pub fn fault(
        params:  ExpParams,
        vehicle: VehicleId,
        session: SessionId,
        fault:   SessionFault,
    ) -> SessionRecord {
        SessionRecord {
            params,
            vehicle,
            session,
            duration: f64::NAN,
            end_x:    f64::NAN,
            end_time: f64::NAN,
            outcome:  SessionOutcome::Fault(fault),
        }
    }

    /// `true` when this record carries a fault tag instead of numeric fields.
    #[inline]
    pub fn is_fault(&self) -> bool {
        self.outcome.is_fault()
    }
}

// ── Verdicts ──────────────────────────────────────────────────────────────────

/// Result of reconciling one session's event group.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionVerdict {
    /// A valid two-event session.
    Valid(SessionRecord),
    /// Validation failed; the record carries the fault tag.
    Faulted(SessionRecord),
    /// Non-positive duration: excluded from output entirely.
    Dropped,
}

impl SessionVerdict {
    /// The record to emit, if any.
    pub fn into_record(self) -> Option<SessionRecord> {
        match self {
            SessionVerdict::Valid(r) | SessionVerdict::Faulted(r) => Some(r),
            SessionVerdict::Dropped => None,
        }
    }
}

/// Result of processing one vehicle's full event sequence.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VehicleVerdict {
    /// The vehicle never reached the switch-off marker; no records.
    Incomplete,
    /// Records for every session group of the vehicle.
    Processed(Vec<SessionRecord>),
}

impl VehicleVerdict {
    /// The records to emit; empty for [`Incomplete`][Self::Incomplete].
    pub fn into_records(self) -> Vec<SessionRecord> {
        match self {
            VehicleVerdict::Incomplete => Vec::new(),
            VehicleVerdict::Processed(records) => records,
        }
    }
}
