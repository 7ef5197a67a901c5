//! Shared test utilities for playback
//!
//! - Instrumented sample workloads
//! - Config helpers that write into a temporary directory

pub mod workloads;

use std::path::PathBuf;

use playback::{Config, SerializeMode};
use tempfile::TempDir;

/// `file!()` prefix of the instrumented fixtures.
pub const FIXTURE_ROOT: &str = "tests/common/";

/// Config rooted at the fixtures, writing its artifact into a fresh temp dir.
///
/// Keep the returned `TempDir` alive until the artifact has been read.
pub fn temp_config(mode: SerializeMode, walk_locals: bool) -> (Config, TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("playback.json");
    let config = Config::new(FIXTURE_ROOT)
        .with_serialize_mode(mode)
        .with_walk_locals(walk_locals)
        .with_output_path(&output);
    (config, dir, output)
}
