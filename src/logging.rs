use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "liga_dashboard.log";

/// File logging for the terminal UI (stdout belongs to the renderer).
/// Returns the writer guard; dropping it flushes and stops the writer.
/// `None` when the directory is not writable, in which case tracing stays off
/// and only the on-screen console remains.
pub fn init_file_logging(dir: &Path) -> Option<WorkerGuard> {
    // `rolling::daily` panics if it cannot create the first file.
    fs::create_dir_all(dir).ok()?;
    let probe = dir.join(".write_test");
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&probe)
        .ok()?;
    let _ = fs::remove_file(&probe);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,liga_dashboard=debug"));
    let appender = tracing_appender::rolling::daily(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .ok()?;
    Some(guard)
}

/// Stderr logging for the headless tools.
pub fn init_stderr_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
