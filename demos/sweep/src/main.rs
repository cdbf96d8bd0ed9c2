//! sweep — end-to-end demo of the PF session analysis pipeline.
//!
//! Synthesizes operation logs for a small parameter grid, writes them to a
//! Parquet event table, sweeps the grid through the Parquet source with the
//! summary streamed to disk as combinations complete, then reloads the
//! summary and prints outcome-class counts.
//!
//! Run with:
//!   cargo run -p sweep --release

mod generate;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use pfa_core::{ExpParams, SessionOutcome, SessionRecord};
use pfa_grid::{param_grid, run_grid, ErrorPolicy, GridConfig, GridObserver, GridStats};
use pfa_output::{read_summary_parquet, GridOutputObserver, ParquetSummaryWriter};
use pfa_source::{write_event_table, ParquetEventSource, SourceError};

use generate::generate_run;

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:             u64 = 42;
const VEHICLES_PER_RUN: u32 = 200;
const OUT_DIR:          &str = "output";

// ── Progress observer ─────────────────────────────────────────────────────────

/// Prints progress lines and delegates persistence to the output bridge.
struct SweepObserver {
    output: GridOutputObserver<ParquetSummaryWriter>,
}

impl GridObserver for SweepObserver {
    fn on_grid_start(&mut self, total: usize) {
        println!("sweeping {total} combinations...");
    }

    fn on_combination_done(
        &mut self,
        params:  &ExpParams,
        records: &[SessionRecord],
        done:    usize,
        total:   usize,
    ) {
        println!("  [{done:>2}/{total}] {params}  {:>4} records", records.len());
        self.output.on_combination_done(params, records, done, total);
    }

    fn on_combination_empty(&mut self, params: &ExpParams) {
        println!("  {params}: 0 events — upstream run missing?");
    }

    fn on_combination_failed(&mut self, params: &ExpParams, error: &SourceError) {
        eprintln!("  {params}: source failure: {error}");
    }

    fn on_grid_end(&mut self, stats: &GridStats) {
        self.output.on_grid_end(stats);
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let out_dir = Path::new(OUT_DIR);
    fs::create_dir_all(out_dir)?;
    let events_path = out_dir.join("events.parquet");
    let summary_path = out_dir.join("summary.parquet");

    let config = GridConfig {
        request_rates:     vec![5, 30],
        max_platoon_sizes: vec![8],
        max_distances:     vec![50, 200],
        penetrations:      vec![0.25, 1.0],
        repetitions:       vec![0, 1],
        num_threads:       None,
        on_source_error:   ErrorPolicy::Continue,
    };

    // ── Generate the event table ──────────────────────────────────────────
    let mut rows = Vec::new();
    for (i, params) in param_grid(&config).into_iter().enumerate() {
        generate_run(params, VEHICLES_PER_RUN, SEED + i as u64, &mut rows);
    }
    write_event_table(&events_path, &rows)?;
    println!("wrote {} log rows to {}", rows.len(), events_path.display());

    // ── Sweep ─────────────────────────────────────────────────────────────
    let source = ParquetEventSource::new(&events_path);
    let writer = ParquetSummaryWriter::new(&summary_path)?;
    let mut observer = SweepObserver { output: GridOutputObserver::new(writer) };

    let start = Instant::now();
    let summary = run_grid(&config, &source, &mut observer)?;
    if let Some(error) = observer.output.take_error() {
        return Err(error.into());
    }
    println!(
        "{} records from {}/{} combinations in {:.2?} ({} failed)",
        summary.stats.records,
        summary.stats.completed,
        summary.stats.total,
        start.elapsed(),
        summary.stats.failed,
    );

    // ── Reload and summarize ──────────────────────────────────────────────
    let reloaded = read_summary_parquet(&summary_path)?;
    assert_eq!(reloaded.len(), summary.records.len());

    let mut by_class: BTreeMap<String, usize> = BTreeMap::new();
    for record in &reloaded {
        let key = match record.outcome {
            SessionOutcome::Op(op)       => format!("{:?}", op.class()),
            SessionOutcome::Fault(fault) => format!("fault \"{}\"", fault.label()),
        };
        *by_class.entry(key).or_default() += 1;
    }
    println!("outcome classes in {}:", summary_path.display());
    for (class, count) in by_class {
        println!("  {class:<28} {count:>5}");
    }
    Ok(())
}
