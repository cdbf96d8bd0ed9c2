//! One combination's worth of work: load, sort, process every vehicle.

use rustc_hash::FxHashMap;

use pfa_core::{ExpParams, PfEvent, SessionRecord, VehicleId};
use pfa_session::process_vehicle;
use pfa_source::{EventSource, SourceError};

/// Output of [`process_combination`].
///
/// `event_count` is the size of the loaded (filtered) event set — zero
/// usually means the simulation run crashed upstream and warrants a
/// diagnostic, which the orchestrator emits via the observer.
#[derive(Debug)]
pub struct CombinationResult {
    /// Session records for every complete vehicle, successes and faults.
    pub records: Vec<SessionRecord>,

    /// Rows the source returned for this combination.
    pub event_count: usize,
}

/// Materialize the event table for one parameter point and process every
/// vehicle.
///
/// Per-vehicle and per-session validation failures surface as tagged
/// records inside `Ok`; only true source faults return `Err`.  An empty
/// event set is `Ok` with no records.
pub fn process_combination<S: EventSource + ?Sized>(
    source: &S,
    params: &ExpParams,
) -> Result<CombinationResult, SourceError> {
    let mut events = source.load(params)?;
    let event_count = events.len();
    events.sort_by(|a, b| a.time.total_cmp(&b.time));

    // Partition by vehicle in first-seen order.
    let mut order:      Vec<VehicleId> = Vec::new();
    let mut by_vehicle: FxHashMap<VehicleId, Vec<PfEvent>> = FxHashMap::default();
    for event in events {
        by_vehicle
            .entry(event.vehicle)
            .or_insert_with(|| {
                order.push(event.vehicle);
                Vec::new()
            })
            .push(event);
    }

    let mut records = Vec::new();
    for vehicle in order {
        let verdict = process_vehicle(params, vehicle, &by_vehicle[&vehicle]);
        records.extend(verdict.into_records());
    }
    Ok(CombinationResult { records, event_count })
}
