use std::{fs::File, io, path::Path, sync::Mutex};

use anyhow::Context;
use tracing_subscriber::{EnvFilter, fmt::writer::BoxMakeWriter};

/// Where log events go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
    /// Events are dropped. Used while the terminal dashboard owns the screen.
    Discard,
}

/// Installs the global subscriber. `RUST_LOG` selects the level, `info` by default.
pub fn init(target: LogTarget<'_>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (writer, ansi) = match target {
        LogTarget::Stderr => (BoxMakeWriter::new(io::stderr), true),
        LogTarget::File(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        LogTarget::Discard => (BoxMakeWriter::new(io::sink), false),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("Failed to initialize logging: {err}"))
}
