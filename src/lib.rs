//! Batch sanity checks over BDBC NWB recordings.
//!
//! Animal recording folders live one level below a source root. For each
//! animal the external summary-plotting routine is run once; a zero-byte
//! `COMPLETE` marker in the matching output folder records success, so a
//! re-run only processes animals that are not marked done yet.

pub mod analysis;
pub mod batch;
pub mod config;
pub mod sessions;
pub mod utils;

use std::path::PathBuf;

pub use analysis::{CommandPlotter, PlotError, SummaryPlotter};
pub use batch::{run_batch, BatchReport};
pub use config::{load_config, Config};

/// Errors surfaced by the batch runner.
#[derive(Debug, thiserror::Error)]
pub enum SanityError {
    /// Source root missing at startup.
    #[error("source root does not exist: {0}")]
    SourceRootMissing(PathBuf),

    /// Config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Config file could not be parsed or serialized.
    #[error("bad config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// Config file could not be written.
    #[error("failed to write config file {path}: {source}")]
    ConfigWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Animal folder name does not end in a numeric id.
    #[error("animal folder name does not end in '-<number>': {0}")]
    AnimalName(String),

    /// NWB file name does not follow the session naming scheme.
    #[error("session file does not match '<animal>_<date>_<type>-day<n>': {0}")]
    SessionName(String),

    /// The external plotting routine failed; the batch stops here.
    #[error("sanity check failed for {animal}")]
    Analysis {
        animal: String,
        #[source]
        source: PlotError,
    },

    /// Run-log CSV could not be written.
    #[error("failed to write run log: {0}")]
    Log(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
