/*!
 * Logging Module
 * Centralized logging configuration and utilities
 */
pub mod config;
pub mod middleware;

use std::io;
use tracing::Subscriber;
use tracing_appender::{
    non_blocking,
    non_blocking::{NonBlocking, WorkerGuard},
    rolling,
};
use tracing_subscriber::{
    filter::LevelFilter, fmt, layer::SubscriberExt, registry::LookupSpan,
    util::SubscriberInitExt, EnvFilter, Layer,
};

pub use config::{LogConfig, LogLevel};

/// Background writer guards. Buffered lines are flushed when this drops, so
/// keep it alive for the life of the process.
#[must_use = "dropping the guards stops the log writers"]
pub struct LogGuards {
    _guards: Vec<WorkerGuard>,
}

/// JSON lines at ERROR only, for `error.log`.
fn error_layer<S>(writer: NonBlocking) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .json()
        .with_writer(writer)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(LevelFilter::ERROR)
}

/// Initialize the logging system
pub fn init(config: &LogConfig) -> LogGuards {
    if let Err(e) = std::fs::create_dir_all(&config.dir) {
        eprintln!("could not create log directory {}: {}", config.dir, e);
    }

    // All events
    let (file_writer, file_guard) = non_blocking(rolling::daily(&config.dir, "app.log"));
    // Errors only
    let (error_writer, error_guard) = non_blocking(rolling::daily(&config.dir, "error.log"));
    let (console_writer, console_guard) = non_blocking(io::stdout());

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_directives()));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    let result = if config.production {
        // JSON format for production
        let file_layer = fmt::layer()
            .json()
            .with_writer(file_writer)
            .with_target(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_file(true)
            .with_line_number(true);

        let console_layer = fmt::layer()
            .json()
            .with_writer(console_writer)
            .with_target(false);

        subscriber
            .with(file_layer)
            .with(error_layer(error_writer))
            .with(console_layer)
            .try_init()
    } else {
        // Pretty format for development
        let file_layer = fmt::layer()
            .with_writer(file_writer)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false);

        let console_layer = fmt::layer()
            .with_writer(console_writer)
            .with_target(true)
            .pretty();

        subscriber
            .with(file_layer)
            .with(error_layer(error_writer))
            .with(console_layer)
            .try_init()
    };

    match result {
        Ok(()) => tracing::info!(
            environment = config.environment_name(),
            level = %config.level,
            dir = %config.dir,
            "logging initialized"
        ),
        Err(e) => eprintln!("logging already initialized: {e}"),
    }

    LogGuards {
        _guards: vec![file_guard, error_guard, console_guard],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_creates_log_dir_and_keeps_guards() {
        let dir = std::env::temp_dir().join(format!("editor-portfolio-logs-{}", uuid::Uuid::new_v4()));
        let dir = dir.to_string_lossy().to_string();

        for environment in ["production", "development"] {
            let config = LogConfig::from_values(Some(environment), Some("info"), Some(&dir));
            let guards = init(&config);
            assert_eq!(guards._guards.len(), 3);
        }

        assert!(std::path::Path::new(&dir).is_dir());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
