//! Structured logging for the referee listener.
//!
//! Installs a `tracing` subscriber with console output and, in debug builds,
//! a JSON log file for replaying what the referee box sent during a match.

use std::path::Path;

use refbox_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config supplies one.
pub const DEFAULT_FILTER: &str = "info";

/// File name of the JSON log inside the log directory.
pub const LOG_FILE_NAME: &str = "refbox.log";

/// Resolve the filter string from the config, falling back to [`DEFAULT_FILTER`].
pub fn filter_directive(config: Option<&Config>) -> String {
    config
        .map(|c| c.debug.log_level.trim())
        .filter(|level| !level.is_empty())
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

/// Whether the JSON file layer should be installed.
///
/// Only debug builds write a log file, and only when the config has not
/// turned it off. Without a config the file is written.
pub fn file_logging_enabled(debug_build: bool, config: Option<&Config>) -> bool {
    debug_build && config.is_none_or(|c| c.debug.log_to_file)
}

/// Create `log_dir` and open a fresh [`LOG_FILE_NAME`] inside it.
fn open_log_file(log_dir: &Path) -> Option<std::fs::File> {
    std::fs::create_dir_all(log_dir).ok()?;
    std::fs::File::create(log_dir.join(LOG_FILE_NAME)).ok()
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. When `debug_build`
/// is set, `log_dir` is given, and the config allows it, a JSON file layer
/// is added alongside the console.
///
/// ```no_run
/// use refbox_config::Config;
/// use refbox_log::init_logging;
///
/// let config = Config::default();
/// init_logging(None, false, Some(&config));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let filter_str = filter_directive(config);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if file_logging_enabled(debug_build, config)
        && let Some(log_file) = log_dir.and_then(open_log_file)
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}
