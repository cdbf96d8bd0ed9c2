//! Session reconciliation — from one event group to one verdict.

use pfa_core::{
    ExpParams, PfEvent, PfOp, SessionFault, SessionId, SessionOutcome, SessionRecord,
    SessionVerdict, VehicleId,
};

/// Maximum allowed disagreement, in seconds, between the duration derived
/// from row timestamps and the duration the vehicle recorded on the terminal
/// row.  Larger gaps indicate a logging or clock inconsistency.
pub const DURATION_TOLERANCE: f64 = 0.1;

/// Validate one session's events and derive its outcome.
///
/// `events` must be every row of (`vehicle`, `session`) within the observed
/// window, ordered by time.  A valid session is exactly two rows: the
/// opening request and a terminal row carrying the session's end fields.
///
/// Checks run in order; the first failure wins:
///
/// 1. exactly 2 events, else `"PROC ERROR"`;
/// 2. the earlier event is `REQUEST_SENT`, else `"SID NOT STARTING WITH REQ"`;
/// 3. the timestamp-derived duration and the duration recorded on the
///    terminal row agree within [`DURATION_TOLERANCE`], else
///    `"SID WRONG DURATION"`;
/// 4. the duration is strictly positive, else the session is dropped with
///    no record at all ([`SessionVerdict::Dropped`]).
///
/// Pure function of its input; never panics on data.
pub fn reconcile_session(
    params:  &ExpParams,
    vehicle: VehicleId,
    session: SessionId,
    events:  &[PfEvent],
) -> SessionVerdict {
    if events.len() != 2 {
        return SessionVerdict::Faulted(SessionRecord::fault(
            *params,
            vehicle,
            session,
            SessionFault::WrongEventCount,
        ));
    }
    let (opening, terminal) = (&events[0], &events[1]);

    if opening.op != PfOp::RequestSent {
        return SessionVerdict::Faulted(SessionRecord::fault(
            *params,
            vehicle,
            session,
            SessionFault::NotStartingWithRequest,
        ));
    }

    let duration = terminal.time - opening.time;
    let recorded = terminal.session_end - terminal.session_start;
    // NaN in the recorded bounds fails the comparison and lands here too.
    if !((duration - recorded).abs() <= DURATION_TOLERANCE) {
        return SessionVerdict::Faulted(SessionRecord::fault(
            *params,
            vehicle,
            session,
            SessionFault::DurationMismatch,
        ));
    }

    if duration <= 0.0 {
        return SessionVerdict::Dropped;
    }

    SessionVerdict::Valid(SessionRecord {
        params:   *params,
        vehicle,
        session,
        duration,
        end_x:    terminal.session_end_x,
        end_time: terminal.session_end,
        outcome:  SessionOutcome::Op(terminal.op),
    })
}
