//! File logging
//!
//! Logs go to a daily rolling file under the log directory so that stdout
//! stays reserved for command output. `RUST_LOG` controls the filter.

use tracing::debug;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::NomadPaths;
use crate::error::{FinanceError, FinanceResult};

/// Filter used when `RUST_LOG` is unset or invalid
pub const DEFAULT_FILTER: &str = "nomad_finance=info";

/// File name prefix; the date is appended on rotation
pub const LOG_FILE: &str = "nomad.log";

/// Install the global subscriber
///
/// Installing twice is not an error; the first subscriber stays.
pub fn init_logging(paths: &NomadPaths) -> FinanceResult<()> {
    let log_dir = paths.log_dir();
    std::fs::create_dir_all(&log_dir)
        .map_err(|e| FinanceError::Io(format!("Failed to create log directory: {}", e)))?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE);

    let installed = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)))
        .try_init()
        .is_ok();

    if installed {
        debug!(?log_dir, "logging initialised");
    }
    Ok(())
}
