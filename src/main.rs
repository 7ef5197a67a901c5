use anyhow::Result;
use clap::{Parser, ValueEnum};
use playback::{run_traced, Config, SerializeMode};
use tracing_subscriber::EnvFilter;

mod demo;
mod numeric;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    Row,
    Column,
    Compact,
}

impl From<Mode> for SerializeMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Row => SerializeMode::Row,
            Mode::Column => SerializeMode::Column,
            Mode::Compact => SerializeMode::Compact,
        }
    }
}

/// Record the bundled demo workload and write ./playback.json
#[derive(Debug, Parser)]
#[command(name = "playback", version)]
struct Cli {
    /// Encoding of the frame timeline
    #[arg(long, value_enum, default_value_t = Mode::Row)]
    mode: Mode,

    /// Record composite variables as reference markers instead of walking them
    #[arg(long)]
    shallow: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the frame listing.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::new(demo::PROJECT_ROOT)
        .with_walk_locals(!cli.shallow)
        .with_serialize_mode(cli.mode.into());

    run_traced(config, demo::main)?;
    Ok(())
}
