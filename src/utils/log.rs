// src/utils/log.rs
//
// Run log for the batch, kept next to the outputs under
// `<output_root>/logs/`: a plain text log plus one CSV row per animal.

use chrono::Local;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const LOG_DIR: &str = "logs";
const RUN_LOG: &str = "batch.log";
const RUN_CSV: &str = "batch_runs.csv";

pub struct BatchRecord<'a> {
    pub animal: &'a str,
    pub sessions: usize,
    pub status: &'a str,
    pub duration_ms: u64,
}

fn log_path(output_root: &Path, filename: &str) -> io::Result<PathBuf> {
    let log_dir = output_root.join(LOG_DIR);
    if !log_dir.exists() {
        fs::create_dir_all(&log_dir)?;
    }
    Ok(log_dir.join(filename))
}

/// Appends one timestamped line to the run log.
pub fn log_to_file(output_root: &Path, message: &str) -> io::Result<()> {
    let path = log_path(output_root, RUN_LOG)?;

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(
        file,
        "[{}] {}",
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        message
    )?;
    file.flush()
}

/// Appends one row to the batch CSV, writing the header first if the file
/// is new.
pub fn append_batch_record(output_root: &Path, record: &BatchRecord) -> Result<(), csv::Error> {
    let path = log_path(output_root, RUN_CSV)?;
    let file_exists = path.exists();

    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    if !file_exists {
        writer.write_record(["timestamp", "animal", "sessions", "status", "duration_ms"])?;
    }
    writer.write_record([
        Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        record.animal.to_string(),
        record.sessions.to_string(),
        record.status.to_string(),
        record.duration_ms.to_string(),
    ])?;
    writer.flush()?;
    Ok(())
}
