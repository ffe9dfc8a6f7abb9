//! YAML description of a release for headless submission.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReleaseFileError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid release file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TrackEntry {
    pub song_title: String,
    pub isrc: String,
    pub audio: Option<String>,
    pub credits: String,
}

/// Genre is kept as text so unknown names are rejected by the wizard.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReleaseFile {
    pub title: String,
    pub genre: Option<String>,
    pub release_date: String,
    pub upc: String,
    pub cover_art: Option<String>,
    pub tracks: Vec<TrackEntry>,
}

impl ReleaseFile {
    pub fn load(path: &Path) -> Result<Self, ReleaseFileError> {
        let content = std::fs::read_to_string(path).map_err(|source| ReleaseFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ReleaseFileError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }
}
