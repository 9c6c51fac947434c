// src/analysis/mod.rs
//
// The actual sanity-check analysis (NaN/outlier detection, summary figures)
// lives in the external `sanity_check_nwb` library. This module only defines
// the seam through which it is invoked.

use std::path::Path;
use std::process::Command;

use crate::config::AnalysisConfig;

#[derive(Debug, thiserror::Error)]
pub enum PlotError {
    /// The plotting program could not be started at all.
    #[error("failed to launch '{program}': {source}")]
    Launch {
        program: String,
        source: std::io::Error,
    },

    /// The plotting program ran and reported failure.
    #[error("'{program}' exited with {status}")]
    Exited {
        program: String,
        status: std::process::ExitStatus,
    },
}

/// One opaque call per animal: plot summary figures for every session in
/// `folder_path`, writing into `output_folder`. The routine may create
/// `output_folder` and any files inside it; the only contract is that it
/// returns `Ok` on success.
pub trait SummaryPlotter {
    fn plot_summary_within_animal(
        &self,
        folder_path: &Path,
        output_folder: &Path,
    ) -> Result<(), PlotError>;
}

/// Runs the configured plotting program as a child process, with the animal
/// folder and the output folder appended to the configured arguments.
pub struct CommandPlotter {
    config: AnalysisConfig,
}

impl CommandPlotter {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }
}

impl SummaryPlotter for CommandPlotter {
    fn plot_summary_within_animal(
        &self,
        folder_path: &Path,
        output_folder: &Path,
    ) -> Result<(), PlotError> {
        // stdout/stderr are inherited so the routine's own progress output
        // lands on the console next to ours.
        let status = Command::new(&self.config.program)
            .args(&self.config.args)
            .arg(folder_path)
            .arg(output_folder)
            .status()
            .map_err(|source| PlotError::Launch {
                program: self.config.program.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(PlotError::Exited {
                program: self.config.program.clone(),
                status,
            })
        }
    }
}
