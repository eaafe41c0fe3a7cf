//! Logging bootstrap.
//!
//! The library only emits through the `log` facade. Binaries call
//! [`init_logging`] once to route those events to stderr via `flexi_logger`.
//!
//! # Invariants
//! - Initialization is idempotent: later calls return `Ok(())` and keep the
//!   first configuration.
//! - Initialization never panics.
//! - `RUST_LOG`, when set, overrides the requested level.

use flexi_logger::{Logger, LoggerHandle};
use log::info;
use once_cell::sync::OnceCell;

static LOGGER: OnceCell<LoggerHandle> = OnceCell::new();

/// Maps a `-v` count to a level spec: 0 → warn, 1 → info, 2 → debug, 3+ → trace.
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

pub fn init_logging(level: &str) -> Result<(), String> {
    LOGGER
        .get_or_try_init(|| -> Result<LoggerHandle, String> {
            let handle = Logger::try_with_env_or_str(level)
                .map_err(|err| format!("invalid log level `{level}`: {err}"))?
                .log_to_stderr()
                .format_for_stderr(flexi_logger::default_format)
                .start()
                .map_err(|err| format!("failed to start logger: {err}"))?;
            info!(
                "event=app_start version={} level={}",
                env!("CARGO_PKG_VERSION"),
                level
            );
            Ok(handle)
        })
        .map(|_| ())
}
