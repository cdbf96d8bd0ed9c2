//! `pfa-session` — the session lifecycle reconstruction core.
//!
//! Two pure functions, layered:
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`reconcile`] | [`reconcile_session`] — validates one session's event group and derives its outcome |
//! | [`vehicle`]   | [`process_vehicle`] — truncates one vehicle's log and runs the reconciler over every session group |
//!
//! Both functions are side-effect-free: validation failures come back as
//! tagged records inside the verdict types from `pfa-core`, never as errors,
//! so one malformed session can never abort a batch.

pub mod reconcile;
pub mod vehicle;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use reconcile::{reconcile_session, DURATION_TOLERANCE};
pub use vehicle::process_vehicle;
