//! Per-vehicle log preparation — truncation and session grouping.

use rustc_hash::FxHashMap;

use pfa_core::{ExpParams, PfEvent, PfOp, SessionId, VehicleId, VehicleVerdict};

use crate::reconcile::reconcile_session;

/// Prepare one vehicle's full event sequence and reconcile every session.
///
/// `events` must be every row the vehicle logged within one experiment
/// scope, ordered by time.  The sequence is complete only if its last row is
/// the `BARRIERSWITCHOFF` marker — a vehicle that never switched off left
/// the observed window early and is skipped wholesale
/// ([`VehicleVerdict::Incomplete`], no records, not an error).
///
/// Rows at or after the switch-off time are discarded before grouping: they
/// carry no session content and would otherwise surface as spurious
/// one-event groups.  Remaining rows are grouped by session (first-seen
/// order, [`SessionId::NONE`] excluded) and each group is reconciled
/// independently.
///
/// Pure function: running it twice on the same input yields identical
/// output.
pub fn process_vehicle(
    params:  &ExpParams,
    vehicle: VehicleId,
    events:  &[PfEvent],
) -> VehicleVerdict {
    let Some(last) = events.last() else {
        return VehicleVerdict::Incomplete;
    };
    if last.op != PfOp::BarrierSwitchoff {
        return VehicleVerdict::Incomplete;
    }
    let switchoff_time = last.time;

    // Group the observed window by session, preserving first-seen order so
    // output ordering is stable across runs.
    let mut order:  Vec<SessionId> = Vec::new();
    let mut groups: FxHashMap<SessionId, Vec<PfEvent>> = FxHashMap::default();
    for event in events {
        if event.time >= switchoff_time || !event.session.is_session() {
            continue;
        }
        groups
            .entry(event.session)
            .or_insert_with(|| {
                order.push(event.session);
                Vec::with_capacity(2)
            })
            .push(*event);
    }

    let mut records = Vec::with_capacity(order.len());
    for session in order {
        let verdict = reconcile_session(params, vehicle, session, &groups[&session]);
        if let Some(record) = verdict.into_record() {
            records.push(record);
        }
    }
    VehicleVerdict::Processed(records)
}
