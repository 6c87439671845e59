//! Logging configuration using tracing
//!
//! The terminal belongs to the board, so log lines go to a file instead of
//! stderr. A log file that cannot be opened never stops the board: logging
//! is switched off and a note goes to stderr.

use crate::constants::{DEFAULT_LOG_FILE, LOG_FILE_ENV};
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::{
    fmt::{self, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Targets that are too chatty below `warn`
const QUIET_TARGETS: &[&str] = &["hyper=warn", "hyper_util=warn", "reqwest=warn", "rustls=warn"];

/// Log file named by `QUOTE_BOARD_LOG`, or the default
pub fn log_path() -> PathBuf {
    std::env::var_os(LOG_FILE_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE))
}

/// Builds the filter: `RUST_LOG` if set, `default_level` otherwise
pub fn env_filter(default_level: Level) -> EnvFilter {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    build_filter(default_level, rust_log.as_deref())
}

/// An explicit `RUST_LOG` is taken as is. Without one, the HTTP stack is
/// held at `warn`.
fn build_filter(default_level: Level, rust_log: Option<&str>) -> EnvFilter {
    let builder = EnvFilter::builder().with_default_directive(default_level.into());
    match rust_log.filter(|dirs| !dirs.trim().is_empty()) {
        Some(dirs) => builder.parse_lossy(dirs),
        None => QUIET_TARGETS
            .iter()
            .fold(builder.parse_lossy(""), |filter, directive| match directive.parse() {
                Ok(d) => filter.add_directive(d),
                Err(_) => filter,
            }),
    }
}

fn open_log_file(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Initialize logging to the file named by `QUOTE_BOARD_LOG`, appending
///
/// Returns the path being written, or `None` when logging is off.
pub fn init_file_logging(default_level: Level) -> Option<PathBuf> {
    init_logging_at(&log_path(), default_level)
}

/// Initialize logging to `path`, appending
///
/// Falls back to discarding log lines when the file cannot be opened.
pub fn init_logging_at(path: &Path, default_level: Level) -> Option<PathBuf> {
    let (writer, written) = match open_log_file(path) {
        Ok(file) => (BoxMakeWriter::new(Mutex::new(file)), Some(path.to_path_buf())),
        Err(e) => {
            eprintln!(
                "quote-board: cannot open log file {}: {}; logging disabled",
                path.display(),
                e
            );
            (BoxMakeWriter::new(io::sink), None)
        }
    };

    let installed = tracing_subscriber::registry()
        .with(env_filter(default_level))
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false),
        )
        .try_init();

    match installed {
        Ok(()) => written,
        Err(e) => {
            eprintln!("quote-board: logging not initialized: {}", e);
            None
        }
    }
}
