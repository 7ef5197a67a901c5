//! One-call recording: run, print, persist.

use std::io::{self, Write};

use crate::capture::{Hook, Recorder};
use crate::config::Config;
use crate::error::{PlaybackError, Result};

/// Run `workload` in a fresh session, print the frame listing to stdout,
/// and write the artifact to `config.output_path`.
///
/// The workload's own result is returned unchanged; recording errors (reading
/// sources, encoding, writing) are reported instead of it.
pub fn run_traced<R>(config: Config, workload: impl FnOnce(&Hook<'_>) -> R) -> Result<R> {
    run_traced_to(config, &mut io::stdout(), workload)
}

/// Like [`run_traced`], with the listing written to `out`.
///
/// The listing is written before any source file is read, so it survives a
/// failure to collect sources or save the artifact.
pub fn run_traced_to<R>(
    config: Config,
    out: &mut impl Write,
    workload: impl FnOnce(&Hook<'_>) -> R,
) -> Result<R> {
    let mut recorder = Recorder::new(config);
    let value = recorder.record(workload);
    recorder
        .write_listing(out)
        .map_err(PlaybackError::Listing)?;

    let mode = recorder.config().serialize_mode;
    let output_path = recorder.config().output_path.clone();
    let session = recorder.finish()?;
    session.save(mode, &output_path)?;
    Ok(value)
}
