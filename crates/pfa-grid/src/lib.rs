//! `pfa-grid` — experiment-grid orchestration.
//!
//! One task per experiment-parameter tuple, no shared mutable state between
//! tasks, results merged at the end:
//!
//! ```text
//! param_grid(config)                 # Cartesian product of axis values
//!   → dispatch across pool           # rayon, or sequential fallback
//!       process_combination(...)     # load + sort + per-vehicle processing
//!   → fold into GridSummary          # concat records, count failures
//! ```
//!
//! | Module           | Contents                                            |
//! |------------------|-----------------------------------------------------|
//! | [`config`]       | `GridConfig`, `ErrorPolicy`                         |
//! | [`grid`]         | [`param_grid`] — axis enumeration                   |
//! | [`worker`]       | [`process_combination`] — one parameter point       |
//! | [`orchestrator`] | [`run_grid`] — pool dispatch, merging, fault counts |
//! | [`observer`]     | `GridObserver` progress/diagnostic callbacks        |
//! | [`error`]        | `GridError`, `GridResult`                           |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                   |
//! |------------|----------------------------------------------------------|
//! | `parallel` | Dispatches combination workers on Rayon (default).       |

pub mod config;
pub mod error;
pub mod grid;
pub mod observer;
pub mod orchestrator;
pub mod worker;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{ErrorPolicy, GridConfig};
pub use error::{GridError, GridResult};
pub use grid::param_grid;
pub use observer::{GridObserver, NoopObserver};
pub use orchestrator::{run_grid, GridStats, GridSummary};
pub use worker::{process_combination, CombinationResult};
