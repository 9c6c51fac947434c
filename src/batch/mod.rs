// src/batch/mod.rs
//
// The batch loop itself. Strictly sequential: one animal at a time, stop at
// the first failure. Finished animals are recognised by their COMPLETE
// marker, so an interrupted batch can simply be started again.

pub mod discovery;

pub use discovery::{completed_animals, discover_animals, COMPLETE_MARKER};

use colored::Colorize;
use std::fs::{self, File};
use std::path::PathBuf;
use std::time::Instant;

use crate::analysis::SummaryPlotter;
use crate::config::BatchConfig;
use crate::sessions::{scan_sessions, SessionKind};
use crate::utils::log::{self, BatchRecord};
use crate::SanityError;

#[derive(Debug)]
pub struct BatchReport {
    /// Animals processed in this run.
    pub processed: usize,
    /// Animals skipped because their marker was already present.
    pub skipped: usize,
}

/// Removes a leftover COMPLETE marker if the scope is exited without
/// `disarm` being called. The marker for the in-flight animal must never
/// survive a failed attempt.
struct MarkerGuard {
    path: PathBuf,
    armed: bool,
}

impl MarkerGuard {
    fn arm(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for MarkerGuard {
    fn drop(&mut self) {
        if self.armed && self.path.is_file() {
            // Only the deletion itself is suppressed; the error that got us
            // here keeps propagating.
            let _ = fs::remove_file(&self.path);
        }
    }
}

/// Runs the sanity check for every animal under `source_root` that is not
/// yet marked complete under `output_root`. Fail-fast: the first error ends
/// the batch; whatever was already marked complete stays marked.
pub fn run_batch(
    config: &BatchConfig,
    plotter: &dyn SummaryPlotter,
) -> Result<BatchReport, SanityError> {
    let animals = discover_animals(&config.source_root)?;
    let done = completed_animals(&config.output_root)?;

    let total = animals.len();
    let work: Vec<String> = animals
        .into_iter()
        .filter(|name| !done.contains(name))
        .collect();
    let skipped = total - work.len();

    log::log_to_file(
        &config.output_root,
        &format!(
            "batch started: {} to process, {} already complete",
            work.len(),
            skipped
        ),
    )?;

    for (i, name) in work.iter().enumerate() {
        println!("processing {} ({} of {})...", name.bold(), i + 1, work.len());

        let started = Instant::now();
        let outcome = process_animal(config, plotter, name);
        let duration_ms = started.elapsed().as_millis() as u64;

        match outcome {
            Ok(session_count) => {
                log::append_batch_record(
                    &config.output_root,
                    &BatchRecord {
                        animal: name,
                        sessions: session_count,
                        status: "ok",
                        duration_ms,
                    },
                )?;
                log::log_to_file(
                    &config.output_root,
                    &format!("{name}: ok ({session_count} sessions)"),
                )?;
                println!("  {} ({} sessions)", "complete".green(), session_count);
            }
            Err(err) => {
                // Best-effort record; the original error must come out, not
                // a logging failure.
                let _ = log::append_batch_record(
                    &config.output_root,
                    &BatchRecord {
                        animal: name,
                        sessions: 0,
                        status: "failed",
                        duration_ms,
                    },
                );
                let _ = log::log_to_file(&config.output_root, &format!("{name}: failed: {err}"));
                println!("  {}", "failed".red());
                return Err(err);
            }
        }
    }

    Ok(BatchReport {
        processed: work.len(),
        skipped,
    })
}

fn process_animal(
    config: &BatchConfig,
    plotter: &dyn SummaryPlotter,
    name: &str,
) -> Result<usize, SanityError> {
    let folder_path = config.source_root.join(name);
    let output_folder = config.output_root.join(name);
    let complete_tag = output_folder.join(COMPLETE_MARKER);

    // From here until disarm, any exit path removes a marker left behind by
    // an earlier run. A half-written output folder must not look complete.
    let guard = MarkerGuard::arm(complete_tag.clone());

    let sessions = scan_sessions(&folder_path)?;
    if sessions.is_empty() {
        println!("  {}", "no .nwb files in this folder".yellow());
    } else {
        let count = |kind: SessionKind| sessions.iter().filter(|s| s.kind == kind).count();
        println!(
            "  {} task / {} resting-state / {} sensory-stim",
            count(SessionKind::Task),
            count(SessionKind::RestingState),
            count(SessionKind::SensoryStim)
        );
    }

    plotter
        .plot_summary_within_animal(&folder_path, &output_folder)
        .map_err(|source| SanityError::Analysis {
            animal: name.to_string(),
            source,
        })?;

    guard.disarm();

    // The plotting routine usually creates the output folder itself, but an
    // animal with nothing to plot may not have one yet.
    fs::create_dir_all(&output_folder)?;
    File::create(&complete_tag)?;

    Ok(sessions.len())
}
