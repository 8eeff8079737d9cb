//! Structured logging (C10, ambient), gated behind the `cli` feature.
//!
//! Shaped after the teacher's `tracing-subscriber` + `tracing-appender`
//! setup, but stderr is the default sink rather than a log file: stdout
//! carries the planner's program-text protocol (§6), and a log writer
//! competing for it would corrupt that contract.

use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

static INIT: OnceLock<Option<WorkerGuard>> = OnceLock::new();

/// Initializes the global tracing subscriber, once. Writes to the file
/// named by `PAIV_LOG_FILE` if set, else to stderr. Filter comes from
/// `RUST_LOG` if set, else defaults to `"paiv=info"`. Safe to call more
/// than once; only the first call takes effect.
pub fn init_logging() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("paiv=info"));

        match std::env::var("PAIV_LOG_FILE") {
            Ok(path) => {
                let file = std::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&path)
                    .expect("failed to open PAIV_LOG_FILE");
                let (writer, guard) = tracing_appender::non_blocking(file);
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(writer)
                    .init();
                Some(guard)
            }
            Err(_) => {
                let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(writer)
                    .init();
                Some(guard)
            }
        }
    });
}
