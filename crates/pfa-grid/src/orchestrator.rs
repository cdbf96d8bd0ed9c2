//! Grid dispatch, result merging, and fault accounting.

use pfa_core::{ExpParams, SessionRecord};
use pfa_source::{EventSource, SourceError};

use crate::config::{ErrorPolicy, GridConfig};
use crate::error::{GridError, GridResult};
use crate::grid::param_grid;
use crate::observer::GridObserver;
use crate::worker::{process_combination, CombinationResult};

// ── Results ───────────────────────────────────────────────────────────────────

/// Coarse counters for one grid run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GridStats {
    /// Combinations in the grid.
    pub total: usize,

    /// Combinations that produced a result table.
    pub completed: usize,

    /// Combinations whose source read failed (policy `Continue` only).
    pub failed: usize,

    /// Session records across all completed combinations.
    pub records: usize,
}

/// Merged output of one grid run.
#[derive(Debug)]
pub struct GridSummary {
    /// Concatenated records of all completed combinations, in no particular
    /// order; each carries its own parameter tag.
    pub records: Vec<SessionRecord>,

    /// Run counters.
    pub stats: GridStats,
}

type Outcome = (ExpParams, Result<CombinationResult, SourceError>);

// ── run_grid ──────────────────────────────────────────────────────────────────

/// Enumerate the configured grid and drive one worker per combination.
///
/// Dispatch runs on a Rayon pool sized by `config.num_threads` (`parallel`
/// feature), or strictly sequentially when `num_threads` is `Some(1)` or
/// the feature is disabled.  Both paths produce the same multiset of
/// records.
///
/// Source failures follow `config.on_source_error`: `Continue` counts them
/// in [`GridStats::failed`] and keeps going; `Abort` stops dispatching new
/// combinations and returns [`GridError::Source`] for the first failure.
pub fn run_grid<S, O>(config: &GridConfig, source: &S, observer: &mut O) -> GridResult<GridSummary>
where
    S: EventSource + ?Sized,
    O: GridObserver + Send,
{
    let grid = param_grid(config);
    let total = grid.len();
    observer.on_grid_start(total);

    let outcomes = dispatch(config, &grid, source, observer, total)?;

    let mut records = Vec::new();
    let mut completed = 0;
    let mut failed = 0;
    for (params, result) in outcomes {
        match result {
            Ok(combination) => {
                completed += 1;
                records.extend(combination.records);
            }
            Err(source) => {
                if config.on_source_error == ErrorPolicy::Abort {
                    return Err(GridError::Source { params, source });
                }
                failed += 1;
            }
        }
    }

    let stats = GridStats { total, completed, failed, records: records.len() };
    observer.on_grid_end(&stats);
    Ok(GridSummary { records, stats })
}

// ── Dispatch ──────────────────────────────────────────────────────────────────

#[cfg(feature = "parallel")]
fn dispatch<S, O>(
    config:   &GridConfig,
    grid:     &[ExpParams],
    source:   &S,
    observer: &mut O,
    total:    usize,
) -> GridResult<Vec<Outcome>>
where
    S: EventSource + ?Sized,
    O: GridObserver + Send,
{
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    use rayon::prelude::*;

    if config.num_threads == Some(1) {
        return Ok(dispatch_sequential(config, grid, source, observer, total));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = config.num_threads {
        builder = builder.num_threads(n);
    }
    let pool = builder
        .build()
        .map_err(|e| GridError::Pool(e.to_string()))?;

    let policy = config.on_source_error;
    let done = AtomicUsize::new(0);
    let abort = AtomicBool::new(false);
    let observer = Mutex::new(observer);

    let outcomes = pool.install(|| {
        grid.par_iter()
            .filter_map(|&params| {
                // Under Abort, skip combinations not yet started; in-flight
                // workers run to completion.
                if abort.load(Ordering::Relaxed) {
                    return None;
                }
                let result = process_combination(source, &params);
                if result.is_err() && policy == ErrorPolicy::Abort {
                    abort.store(true, Ordering::Relaxed);
                }
                let done_now = done.fetch_add(1, Ordering::SeqCst) + 1;
                let mut guard = observer.lock().unwrap_or_else(|e| e.into_inner());
                notify(&mut **guard, &params, &result, done_now, total);
                Some((params, result))
            })
            .collect()
    });
    Ok(outcomes)
}

#[cfg(not(feature = "parallel"))]
fn dispatch<S, O>(
    config:   &GridConfig,
    grid:     &[ExpParams],
    source:   &S,
    observer: &mut O,
    total:    usize,
) -> GridResult<Vec<Outcome>>
where
    S: EventSource + ?Sized,
    O: GridObserver + Send,
{
    Ok(dispatch_sequential(config, grid, source, observer, total))
}

fn dispatch_sequential<S, O>(
    config:   &GridConfig,
    grid:     &[ExpParams],
    source:   &S,
    observer: &mut O,
    total:    usize,
) -> Vec<Outcome>
where
    S: EventSource + ?Sized,
    O: GridObserver + Send,
{
    let mut outcomes = Vec::with_capacity(grid.len());
    let mut done = 0;
    for &params in grid {
        let result = process_combination(source, &params);
        done += 1;
        notify(observer, &params, &result, done, total);
        let failed = result.is_err();
        outcomes.push((params, result));
        if failed && config.on_source_error == ErrorPolicy::Abort {
            break;
        }
    }
    outcomes
}

fn notify<O: GridObserver + ?Sized>(
    observer: &mut O,
    params:   &ExpParams,
    result:   &Result<CombinationResult, SourceError>,
    done:     usize,
    total:    usize,
) {
    match result {
        Ok(combination) => {
            if combination.event_count == 0 {
                observer.on_combination_empty(params);
            }
            observer.on_combination_done(params, &combination.records, done, total);
        }
        Err(error) => observer.on_combination_failed(params, error),
    }
}
