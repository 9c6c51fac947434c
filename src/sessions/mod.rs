// src/sessions/mod.rs
//
// NWB session files are named `<animal>_<date>_<type>-day<n>.nwb`, e.g.
// `VG1GC-2_2024-03-18_resting-state-day2.nwb`. Scanning an animal folder
// yields its sessions in a stable order so the progress output and run log
// match what the plotting routine will see.

use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::SanityError;

const SESSION_PATTERN: &str = r"^([A-Za-z0-9-]+)_([0-9-]+)_(task|resting-state|sensory-stim)-day([0-9]+)";

/// Session types, in the order they sort within one recording day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SessionKind {
    Task,
    RestingState,
    SensoryStim,
}

impl SessionKind {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "task" => Some(SessionKind::Task),
            "resting-state" => Some(SessionKind::RestingState),
            "sensory-stim" => Some(SessionKind::SensoryStim),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SessionKind::Task => "task",
            SessionKind::RestingState => "resting-state",
            SessionKind::SensoryStim => "sensory-stim",
        }
    }
}

/// One `.nwb` file inside an animal folder.
///
/// Field order is the sort order: animal, date, session type, day.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SessionFile {
    pub animal: String,
    pub date: String,
    pub kind: SessionKind,
    pub day: u32,
    pub path: PathBuf,
}

impl SessionFile {
    fn parse(path: PathBuf, matcher: &Regex) -> Result<Self, SanityError> {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let captures = matcher
            .captures(&stem)
            .ok_or_else(|| SanityError::SessionName(stem.clone()))?;

        let kind = SessionKind::from_tag(&captures[3])
            .ok_or_else(|| SanityError::SessionName(stem.clone()))?;
        let day: u32 = captures[4]
            .parse()
            .map_err(|_| SanityError::SessionName(stem.clone()))?;

        Ok(SessionFile {
            animal: captures[1].to_string(),
            date: captures[2].to_string(),
            kind,
            day,
            path,
        })
    }
}

fn collect_nwb_files(dir: &Path, found: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            collect_nwb_files(&path, found)?;
        } else if path.extension().map_or(false, |ext| ext == "nwb") {
            found.push(path);
        }
    }
    Ok(())
}

/// Finds every `.nwb` file under `folder` (recursively) and returns the
/// sessions sorted by animal, date, type and day. A file name that does not
/// match the session naming scheme is a fatal error.
pub fn scan_sessions(folder: &Path) -> Result<Vec<SessionFile>, SanityError> {
    let matcher = Regex::new(SESSION_PATTERN).expect("session pattern is valid");

    let mut files = Vec::new();
    collect_nwb_files(folder, &mut files)?;

    let mut sessions = files
        .into_iter()
        .map(|path| SessionFile::parse(path, &matcher))
        .collect::<Result<Vec<_>, _>>()?;
    sessions.sort();
    Ok(sessions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse_stem(stem: &str) -> Result<SessionFile, SanityError> {
        let matcher = Regex::new(SESSION_PATTERN).unwrap();
        SessionFile::parse(PathBuf::from(format!("{stem}.nwb")), &matcher)
    }

    #[test]
    fn parses_a_task_session() {
        let session = parse_stem("VG1GC-2_2024-03-18_task-day1").unwrap();
        assert_eq!(session.animal, "VG1GC-2");
        assert_eq!(session.date, "2024-03-18");
        assert_eq!(session.kind, SessionKind::Task);
        assert_eq!(session.day, 1);
    }

    #[test]
    fn parses_resting_and_sensory_tags() {
        assert_eq!(
            parse_stem("VG1GC-2_2024-03-18_resting-state-day2")
                .unwrap()
                .kind,
            SessionKind::RestingState
        );
        assert_eq!(
            parse_stem("VG1GC-2_2024-03-18_sensory-stim-day3")
                .unwrap()
                .kind,
            SessionKind::SensoryStim
        );
    }

    #[test]
    fn rejects_a_non_conforming_name() {
        let err = parse_stem("VG1GC-2_notes").unwrap_err();
        assert!(matches!(err, SanityError::SessionName(_)));
    }

    #[test]
    fn task_sorts_before_resting_before_sensory() {
        let mut kinds = vec![
            SessionKind::SensoryStim,
            SessionKind::Task,
            SessionKind::RestingState,
        ];
        kinds.sort();
        assert_eq!(
            kinds,
            [
                SessionKind::Task,
                SessionKind::RestingState,
                SessionKind::SensoryStim
            ]
        );
    }

    #[test]
    fn scan_sorts_by_date_then_kind_then_day() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("day2");
        fs::create_dir_all(&nested).unwrap();

        fs::write(
            temp.path().join("VG1GC-1_2024-03-19_task-day2.nwb"),
            b"nwb",
        )
        .unwrap();
        fs::write(
            nested.join("VG1GC-1_2024-03-18_resting-state-day1.nwb"),
            b"nwb",
        )
        .unwrap();
        fs::write(
            temp.path().join("VG1GC-1_2024-03-18_task-day1.nwb"),
            b"nwb",
        )
        .unwrap();
        // non-NWB files are ignored entirely
        fs::write(temp.path().join("notes.txt"), b"ignore me").unwrap();

        let sessions = scan_sessions(temp.path()).unwrap();
        let stems: Vec<String> = sessions
            .iter()
            .map(|s| s.path.file_stem().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            stems,
            [
                "VG1GC-1_2024-03-18_task-day1",
                "VG1GC-1_2024-03-18_resting-state-day1",
                "VG1GC-1_2024-03-19_task-day2",
            ]
        );
    }

    #[test]
    fn scan_fails_on_a_bad_nwb_name() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("leftover.nwb"), b"nwb").unwrap();

        let err = scan_sessions(temp.path()).unwrap_err();
        assert!(matches!(err, SanityError::SessionName(_)));
    }
}
