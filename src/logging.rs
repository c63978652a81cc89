//! Tracing setup for the server.
//!
//! Events go to stdout in compact form and are mirrored, without ANSI colors, to a log file.
//! The file comes from `Config::log_file` and defaults to `logs/schoolapi.log`.
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Flushes the file writer when the process exits.
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

const DEFAULT_LOG_PATH: &str = "logs/schoolapi.log";

/// Install the global subscriber.
///
/// `RUST_LOG` controls filtering (default `info`). A log file that cannot be opened only
/// disables the file copy; stdout logging still comes up. Calling this twice keeps the
/// first subscriber.
pub fn init_tracing(log_file: Option<&Path>) {
    let path = log_file.map_or_else(|| PathBuf::from(DEFAULT_LOG_PATH), Path::to_path_buf);
    let file_layer = match file_writer(&path) {
        Ok((writer, guard)) => {
            if FILE_GUARD.set(guard).is_err() {
                eprintln!("File logging already initialized; ignoring {}", path.display());
            }
            Some(fmt::layer().with_writer(writer).with_ansi(false).compact())
        }
        Err(err) => {
            eprintln!("File logging disabled, cannot open {}: {err}", path.display());
            None
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .with(file_layer)
        .try_init();
    if let Err(err) = installed {
        eprintln!("Tracing subscriber already installed: {err}");
    }
}

/// Open `path` for appending, creating parent directories, behind a non-blocking writer.
fn file_writer(path: &Path) -> io::Result<(NonBlocking, WorkerGuard)> {
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(tracing_appender::non_blocking(file))
}
