//! Tracing subscriber setup.
//!
//! Diagnostics always go to stderr so that stdout carries only results
//! (a single JSON document in `--json` mode).

use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: String,
    pub format: LogFormat,
    pub stderr: bool,
}

impl LogConfig {
    /// Build from `KCI_LOG` / `RUST_LOG` and `KCI_LOG_FORMAT`, falling back to
    /// `default_level`.
    pub fn from_env(default_level: &str) -> Self {
        let level = std::env::var("KCI_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| default_level.to_string());
        let format = match std::env::var("KCI_LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };
        Self {
            level,
            format,
            stderr: false,
        }
    }

    pub fn with_level(mut self, level: &str) -> Self {
        self.level = level.to_string();
        self
    }

    pub fn with_stderr(mut self) -> Self {
        self.stderr = true;
        self
    }
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| anyhow!("invalid log filter '{}': {}", config.level, e))?;

    let result = match (config.format, config.stderr) {
        (LogFormat::Json, true) => tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(filter)
            .try_init(),
        (LogFormat::Json, false) => tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .try_init(),
        (LogFormat::Pretty, true) => tracing_subscriber::registry()
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .with(filter)
            .try_init(),
        (LogFormat::Pretty, false) => tracing_subscriber::registry()
            .with(fmt::layer().with_target(false))
            .with(filter)
            .try_init(),
    };

    result.map_err(|e| anyhow!("failed to install tracing subscriber: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides() {
        let config = LogConfig::from_env("warn").with_level("debug").with_stderr();
        assert_eq!(config.level, "debug");
        assert!(config.stderr);
    }

    #[test]
    fn test_invalid_filter_is_rejected() {
        let config = LogConfig {
            level: "kci=notalevel".to_string(),
            format: LogFormat::Pretty,
            stderr: true,
        };
        assert!(init_logging(&config).is_err());
    }
}
