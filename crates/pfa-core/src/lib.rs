//! `pfa-core` — foundational types for the platoon-formation session
//! analysis toolkit.
//!
//! This crate is a dependency of every other `pfa-*` crate.  It has no
//! `pfa-*` dependencies and minimal external ones (only `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                |
//! |-------------|---------------------------------------------------------|
//! | [`ids`]     | `VehicleId`, `SessionId`                                |
//! | [`op`]      | `PfOp` operation codes, `OpClass` outcome classes       |
//! | [`event`]   | `PfEvent` — one operation-log row                       |
//! | [`params`]  | `ExpParams` — the 5-dimensional experiment key          |
//! | [`record`]  | `SessionRecord`, outcome/fault enums, verdict types     |
//! | [`error`]   | `CoreError`, `CoreResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                      |
//! |---------|-------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.         |

pub mod error;
pub mod event;
pub mod ids;
pub mod op;
pub mod params;
pub mod record;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use event::PfEvent;
pub use ids::{SessionId, VehicleId};
pub use op::{OpClass, PfOp};
pub use params::ExpParams;
pub use record::{
    SessionFault, SessionOutcome, SessionRecord, SessionVerdict, VehicleVerdict,
};
