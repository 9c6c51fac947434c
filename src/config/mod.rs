// src/config/mod.rs
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::SanityError;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    pub batch: BatchConfig,
    pub analysis: AnalysisConfig,
}

/// Where the recordings are and where the summaries go. Both fields are
/// required; there are no fallback paths.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BatchConfig {
    /// Root folder holding one subfolder per animal.
    pub source_root: PathBuf,
    /// Root folder for summary output, one subfolder per animal.
    pub output_root: PathBuf,
}

/// How to launch the external summary-plotting routine. The animal folder
/// and its output folder are appended to `args` at call time.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AnalysisConfig {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, SanityError> {
    let path = path.as_ref();
    let config_str = fs::read_to_string(path).map_err(|source| SanityError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    serde_yaml::from_str(&config_str).map_err(|source| SanityError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn save_config<P: AsRef<Path>>(config: &Config, path: P) -> Result<(), SanityError> {
    let path = path.as_ref();
    let yaml = serde_yaml::to_string(config).map_err(|source| SanityError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;

    fs::write(path, yaml).map_err(|source| SanityError::ConfigWrite {
        path: path.to_path_buf(),
        source,
    })
}
