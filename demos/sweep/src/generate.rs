//! Synthetic operation-log generator.
//!
//! Emits the same row mix a real run produces: mostly well-formed two-row
//! sessions, a sprinkle of orphaned openings (terminal row lost), skewed
//! recorded durations, zero-length sessions, and vehicles that never reach
//! the switch-off barrier.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use pfa_core::{ExpParams, PfEvent, PfOp, SessionId, VehicleId};

/// Terminal draw pool, skewed toward completion like a healthy run.
const TERMINALS: [PfOp; 8] = [
    PfOp::PfCompleted,
    PfOp::PfCompleted,
    PfOp::PfCompleted,
    PfOp::PfCompleted,
    PfOp::AbortCoordTimeout,
    PfOp::AbortMsgReceived,
    PfOp::RespDenied,
    PfOp::TxFailure,
];

fn opening(params: ExpParams, vehicle: VehicleId, session: SessionId, time: f64) -> (ExpParams, PfEvent) {
    (
        params,
        PfEvent {
            time,
            vehicle,
            session,
            op: PfOp::RequestSent,
            session_start: f64::NAN,
            session_end:   f64::NAN,
            session_end_x: f64::NAN,
        },
    )
}

/// Append one run's worth of log rows for `vehicles` vehicles.
pub fn generate_run(
    params:   ExpParams,
    vehicles: u32,
    seed:     u64,
    rows:     &mut Vec<(ExpParams, PfEvent)>,
) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut next_sid = 1u32;

    for v in 1..=vehicles {
        let vehicle = VehicleId(v);
        let mut t = rng.gen_range(0.0..60.0);
        let mut x = rng.gen_range(0.0..500.0);

        for _ in 0..rng.gen_range(1..=3) {
            let session = SessionId(next_sid);
            next_sid += 1;

            rows.push(opening(params, vehicle, session, t));

            if rng.gen_bool(0.05) {
                // Terminal row lost: surfaces downstream as "PROC ERROR".
                t += rng.gen_range(10.0..30.0);
                continue;
            }

            let duration = if rng.gen_bool(0.02) { 0.0 } else { rng.gen_range(2.0..30.0) };
            // Skewed bookkeeping on ~3% of terminals: "SID WRONG DURATION".
            let recorded_end = if rng.gen_bool(0.03) { t + duration + 1.0 } else { t + duration };
            x += duration * rng.gen_range(20.0..30.0);
            rows.push((
                params,
                PfEvent {
                    time:          t + duration,
                    vehicle,
                    session,
                    op:            TERMINALS[rng.gen_range(0..TERMINALS.len())],
                    session_start: t,
                    session_end:   recorded_end,
                    session_end_x: x,
                },
            ));
            t += duration + rng.gen_range(10.0..40.0);
        }

        // ~10% of vehicles leave the window before switching off; the
        // processor skips them wholesale.
        if rng.gen_bool(0.9) {
            rows.push((
                params,
                PfEvent {
                    time:          t + rng.gen_range(1.0..10.0),
                    vehicle,
                    session:       SessionId::NONE,
                    op:            PfOp::BarrierSwitchoff,
                    session_start: f64::NAN,
                    session_end:   f64::NAN,
                    session_end_x: f64::NAN,
                },
            ));
        }
    }
}
