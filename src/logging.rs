use std::fs;
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Keeps the background log writer alive; drop it last.
pub struct LogGuard {
    _guard: WorkerGuard,
}

pub fn log_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tango")
        .join("logs")
}

/// File-only subscriber: the terminal UI owns stdout.
///
/// `RUST_LOG` wins over `default_level`. Returns `None` when the log
/// directory cannot be created, in which case nothing is logged.
pub fn init(default_level: &str) -> Option<LogGuard> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let dir = log_dir();
    fs::create_dir_all(&dir).ok()?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &dir, "tango.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .ok()?;

    Some(LogGuard { _guard: guard })
}
