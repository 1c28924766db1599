use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level: {other}")),
        }
    }
}

/// Logging settings from `ENVIRONMENT`, `LOG_LEVEL` and `LOG_DIR`.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub production: bool,
    /// Defaults to `info` in production and `debug` elsewhere.
    pub level: LogLevel,
    pub dir: String,
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var("ENVIRONMENT").ok().as_deref(),
            std::env::var("LOG_LEVEL").ok().as_deref(),
            std::env::var("LOG_DIR").ok().as_deref(),
        )
    }

    pub fn from_values(environment: Option<&str>, level: Option<&str>, dir: Option<&str>) -> Self {
        let production = environment == Some("production");
        let default_level = if production {
            LogLevel::Info
        } else {
            LogLevel::Debug
        };

        Self {
            production,
            level: level.and_then(|l| l.parse().ok()).unwrap_or(default_level),
            dir: dir
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .unwrap_or("logs")
                .to_string(),
        }
    }

    pub fn environment_name(&self) -> &'static str {
        if self.production {
            "production"
        } else {
            "development"
        }
    }

    /// Filter used when `RUST_LOG` is not set.
    pub fn default_directives(&self) -> String {
        format!(
            "editor_portfolio={},tower_http=debug,axum=debug,reqwest=info",
            self.level
        )
    }
}
