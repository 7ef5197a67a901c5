//! Artifact encoding: frame projections bundled with captured sources.

pub mod columns;
pub mod compact;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::capture::Session;
use crate::config::SerializeMode;
use crate::error::{PlaybackError, Result};
use crate::frame::Frame;

pub use columns::Columns;

/// The `frames` entry of an artifact, in one of three encodings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Projection {
    Rows(Vec<Frame>),
    Columns(Columns),
    Compact(String),
}

impl Projection {
    pub fn project(frames: &[Frame], mode: SerializeMode) -> Result<Self> {
        Ok(match mode {
            SerializeMode::Row => Projection::Rows(frames.to_vec()),
            SerializeMode::Column => Projection::Columns(Columns::from_frames(frames)),
            SerializeMode::Compact => Projection::Compact(compact::encode(frames)?),
        })
    }

    /// Recover the frame sequence regardless of encoding.
    pub fn into_frames(self) -> Result<Vec<Frame>> {
        match self {
            Projection::Rows(frames) => Ok(frames),
            Projection::Columns(columns) => columns.into_frames(),
            Projection::Compact(stream) => Ok(compact::decode(&stream)?),
        }
    }
}

/// Persisted recording: `{"frames": ..., "files": {path: text}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    pub frames: Projection,
    pub files: BTreeMap<String, String>,
}

impl Artifact {
    pub fn build(session: &Session, mode: SerializeMode) -> Result<Self> {
        Ok(Self {
            frames: Projection::project(session.frames(), mode)?,
            files: session.files().clone(),
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Encode fully before touching the file, so an encoding failure leaves
    /// no partial output.
    pub fn write_to_path(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|e| PlaybackError::io(path, e))?;
        tracing::info!(path = %path.display(), "Wrote playback artifact");
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| PlaybackError::io(path, e))?;
        Ok(serde_json::from_str(&text)?)
    }
}
