// src/batch/discovery.rs
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::SanityError;

/// Zero-byte file written into an animal's output folder once its summary
/// figures were produced without error. Presence is the only signal.
pub const COMPLETE_MARKER: &str = "COMPLETE";

/// Animal folders carry a numeric id after the last '-' (`VG1GC-12` -> 12).
/// A folder that does not fit is a fatal error before any processing starts,
/// never a silent skip.
fn animal_number(name: &str) -> Result<u64, SanityError> {
    name.rsplit_once('-')
        .and_then(|(_, digits)| digits.parse().ok())
        .ok_or_else(|| SanityError::AnimalName(name.to_string()))
}

/// Lists the animal folders directly under `source_root`, sorted by their
/// numeric id (so `VG1GC-2` comes before `VG1GC-10`).
pub fn discover_animals(source_root: &Path) -> Result<Vec<String>, SanityError> {
    if !source_root.is_dir() {
        return Err(SanityError::SourceRootMissing(source_root.to_path_buf()));
    }

    let mut animals = Vec::new();
    for entry in fs::read_dir(source_root)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            let name = entry.file_name().to_string_lossy().into_owned();
            let number = animal_number(&name)?;
            animals.push((number, name));
        }
    }

    animals.sort();
    Ok(animals.into_iter().map(|(_, name)| name).collect())
}

/// Animal names whose output folder already carries a `COMPLETE` marker.
/// A missing `output_root` means nothing is done yet.
pub fn completed_animals(output_root: &Path) -> Result<HashSet<String>, SanityError> {
    let mut done = HashSet::new();
    if !output_root.is_dir() {
        return Ok(done);
    }

    for entry in fs::read_dir(output_root)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() && entry.path().join(COMPLETE_MARKER).is_file() {
            done.insert(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(done)
}
