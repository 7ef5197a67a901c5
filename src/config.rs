//! Recorder configuration.
//!
//! Everything is fixed at construction time; nothing is read from the
//! environment or from disk.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default artifact location, relative to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "./playback.json";

/// Encoding used for the `frames` entry of the artifact.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SerializeMode {
    /// One record per frame.
    #[default]
    Row,
    /// One list per frame field.
    Column,
    /// Delimited text, one record per frame.
    Compact,
}

/// Recorder configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Deep-walk composite variables instead of recording a reference marker
    pub walk_locals: bool,
    /// Encoding of the frame timeline in the artifact
    pub serialize_mode: SerializeMode,
    /// Files under this prefix belong to the traced project
    pub project_root: String,
    /// Where the convenience wrapper writes the artifact
    pub output_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            walk_locals: true,
            serialize_mode: SerializeMode::default(),
            project_root: default_project_root(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

impl Config {
    pub fn new(project_root: impl Into<String>) -> Self {
        Self {
            project_root: project_root.into(),
            ..Self::default()
        }
    }

    pub fn with_walk_locals(mut self, walk_locals: bool) -> Self {
        self.walk_locals = walk_locals;
        self
    }

    pub fn with_serialize_mode(mut self, mode: SerializeMode) -> Self {
        self.serialize_mode = mode;
        self
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }
}

/// `file!()` paths are relative to the package root, so `src/` covers the
/// crate being built.
fn default_project_root() -> String {
    "src/".to_string()
}
