//! Integration tests for playback
//!
//! These tests drive instrumented workloads through the public API and check
//! the persisted artifact.

pub use crate::common;

pub mod artifact;
pub mod end_to_end;
