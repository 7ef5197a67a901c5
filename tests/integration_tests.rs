//! Main entry point for integration tests
//!
//! Run with: `cargo test --test integration_tests`
//!
//! Note: The `common` module is loaded here via `#[path]` (so `file!()` in the
//! fixtures reads `tests/common/...`) and re-exported by the integration module
//! to avoid duplicate module loading issues.

#[path = "common/mod.rs"]
pub mod common;

mod integration;

pub use integration::*;
