//! File-based logging for the CLI
//!
//! Log output goes to a file so it never mixes with command output or the
//! interactive menu. The level comes from `JOT_LOG` (default `info`).

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing::info;
use tracing_subscriber::EnvFilter;

use jot_core::Config;

/// Environment variable holding the log level
const LOG_LEVEL_ENV: &str = "JOT_LOG";

/// Initialize logging to the configured log file
///
/// Failing to open the log file prints a warning and leaves logging off.
pub fn init(config: &Config) {
    let log_level = std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| "info".to_string());
    let log_path = config.log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = match OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not open log file {:?}: {}", log_path, e);
            return;
        }
    };

    let env_filter = EnvFilter::new(filter_directives(&log_level));

    // Ignore error if already initialized
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(log_file))
        .try_init();

    info!("Logging initialized to {:?}", log_path);
}

fn filter_directives(level: &str) -> String {
    format!("jot={},jot_core={}", level, level)
}
