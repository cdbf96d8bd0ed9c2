//! PF operation codes.
//!
//! Every operation-log row carries one of 16 codes describing why it was
//! written.  The numeric code is the on-disk representation; the name is the
//! human-readable form used in summary tables.  Both directions of the
//! lookup are compile-time constants — there is no runtime registration.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

// ── PfOp ──────────────────────────────────────────────────────────────────────

/// Operation code of one log row.
///
/// Discriminants are the wire codes and must never be reordered: the
/// simulation writes them as integers and summary consumers rely on the
/// names staying attached to the same codes.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum PfOp {
    RequestSent            = 0,
    AbortCoordTimeout      = 1,
    CompleteCoord          = 2,
    AbortIntruderDetected  = 3,
    AbortTooLongLaneChange = 4,
    AbortRequesterTimeout  = 5,
    RespDenied             = 6,
    AuthDenied             = 7,
    PfCompleted            = 8,
    AbortMsgReceived       = 9,
    TxFailure              = 10,
    PfRequestTxFailure     = 11,
    EndSimulation          = 12,
    BarrierCooldown        = 13,
    BarrierSwitchoff       = 14,
    AbortCloseToEndRoute   = 15,
}

impl PfOp {
    /// All codes, indexed by their wire value.
    pub const ALL: [PfOp; 16] = [
        PfOp::RequestSent,
        PfOp::AbortCoordTimeout,
        PfOp::CompleteCoord,
        PfOp::AbortIntruderDetected,
        PfOp::AbortTooLongLaneChange,
        PfOp::AbortRequesterTimeout,
        PfOp::RespDenied,
        PfOp::AuthDenied,
        PfOp::PfCompleted,
        PfOp::AbortMsgReceived,
        PfOp::TxFailure,
        PfOp::PfRequestTxFailure,
        PfOp::EndSimulation,
        PfOp::BarrierCooldown,
        PfOp::BarrierSwitchoff,
        PfOp::AbortCloseToEndRoute,
    ];

    /// The wire code of this operation.
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Look an operation up by wire code.
    #[inline]
    pub fn from_code(code: u8) -> Option<PfOp> {
        Self::ALL.get(code as usize).copied()
    }

    /// The log name of this operation, as it appears in summary tables.
    pub fn name(self) -> &'static str {
        match self {
            PfOp::RequestSent           => "REQUEST_SENT",
            PfOp::AbortCoordTimeout     => "ABORT_COORD_TIMEOUT",
            PfOp::CompleteCoord         => "COMPLETE_COORD",
            PfOp::AbortIntruderDetected => "ABORT_INTRUDERDETECTED",
            PfOp::AbortTooLongLaneChange => "ABORT_TOOLONGLANECHANGE",
            PfOp::AbortRequesterTimeout => "ABORT_REQUESTER_TIMEOUT",
            PfOp::RespDenied            => "RESP_DENIED",
            PfOp::AuthDenied            => "AUTH_DENIED",
            PfOp::PfCompleted           => "PF_COMPLETED",
            PfOp::AbortMsgReceived      => "ABORTMSGRECEIVED",
            PfOp::TxFailure             => "TX_FAILURE",
            PfOp::PfRequestTxFailure    => "PFREQUEST_TX_FAILURE",
            PfOp::EndSimulation         => "END_SIMULATION",
            PfOp::BarrierCooldown       => "BARRIERCOOLDOWN",
            PfOp::BarrierSwitchoff      => "BARRIERSWITCHOFF",
            PfOp::AbortCloseToEndRoute  => "ABORT_CLOSE_TO_END_ROUTE",
        }
    }

    /// Look an operation up by its log name.
    pub fn from_name(name: &str) -> Option<PfOp> {
        Self::ALL.iter().copied().find(|op| op.name() == name)
    }

    /// The outcome class of this operation.
    pub fn class(self) -> OpClass {
        match self {
            PfOp::RequestSent => OpClass::Start,
            PfOp::PfCompleted => OpClass::Completed,
            PfOp::CompleteCoord => OpClass::Coordination,
            PfOp::RespDenied | PfOp::AuthDenied => OpClass::Denied,
            PfOp::EndSimulation | PfOp::BarrierCooldown | PfOp::BarrierSwitchoff => {
                OpClass::Lifecycle
            }
            _ => OpClass::Aborted,
        }
    }

    /// `true` for markers that bound a vehicle's observed window rather than
    /// describe a session outcome.
    #[inline]
    pub fn is_lifecycle(self) -> bool {
        matches!(self.class(), OpClass::Lifecycle)
    }

    /// `true` for operations that can terminate a session (anything that is
    /// neither the start code nor a lifecycle marker).
    #[inline]
    pub fn is_terminal(self) -> bool {
        !self.is_lifecycle() && self != PfOp::RequestSent
    }
}

impl TryFrom<u32> for PfOp {
    type Error = CoreError;

    fn try_from(code: u32) -> Result<PfOp, CoreError> {
        u8::try_from(code)
            .ok()
            .and_then(PfOp::from_code)
            .ok_or(CoreError::UnknownOpCode(code))
    }
}

impl FromStr for PfOp {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<PfOp, CoreError> {
        PfOp::from_name(s).ok_or_else(|| CoreError::UnknownOpName(s.to_owned()))
    }
}

impl fmt::Display for PfOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── OpClass ───────────────────────────────────────────────────────────────────

/// Coarse grouping of operation codes, used when summarizing outcomes.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OpClass {
    /// The session-opening request.
    Start,
    /// The maneuver completed.
    Completed,
    /// The maneuver was aborted mid-flight.
    Aborted,
    /// The request was denied before the maneuver began.
    Denied,
    /// Coordination finished without a full maneuver.
    Coordination,
    /// Markers bounding the vehicle's observed window.
    Lifecycle,
}
