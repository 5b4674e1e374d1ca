//! Environment-driven configuration.
//!
//! All variables share the `KCI_` prefix. Parse problems are collected by
//! [`EnvParser`] rather than failing fast, so every bad value can be reported
//! at once and the defaults stay in effect.

use std::env;
use thiserror::Error;

/// Default dashboard API root.
pub const DEFAULT_API_URL: &str = "https://dashboard.kernelci.org/api/";
/// Default dashboard web root used for per-record links.
pub const DEFAULT_DASHBOARD_URL: &str = "https://dashboard.kernelci.org";
/// Default retry budget for transient HTTP statuses.
pub const DEFAULT_MAX_RETRIES: u32 = 3;
/// Default KCIDB origin.
pub const DEFAULT_ORIGIN: &str = "maestro";

/// Errors that can occur during environment variable parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvError {
    #[error("Invalid value for {var}: expected {expected}, got '{value}'")]
    InvalidValue {
        var: String,
        expected: String,
        value: String,
    },

    #[error("Value out of range for {var}: {value} (valid: {min}..={max})")]
    OutOfRange {
        var: String,
        value: String,
        min: String,
        max: String,
    },
}

type Lookup = Box<dyn Fn(&str) -> Option<String>>;

/// Type-safe environment variable parser.
pub struct EnvParser {
    prefix: &'static str,
    lookup: Lookup,
    errors: Vec<EnvError>,
}

impl EnvParser {
    /// Parser reading the process environment with the `KCI_` prefix.
    pub fn new() -> Self {
        Self::with_lookup(|name| env::var(name).ok())
    }

    /// Parser reading variables through `lookup` instead of the process
    /// environment.
    pub fn with_lookup(lookup: impl Fn(&str) -> Option<String> + 'static) -> Self {
        Self {
            prefix: "KCI_",
            lookup: Box::new(lookup),
            errors: Vec::new(),
        }
    }

    pub fn take_errors(&mut self) -> Vec<EnvError> {
        std::mem::take(&mut self.errors)
    }

    fn var_name(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }

    /// Get a string value with default. Blank values count as unset.
    pub fn get_string(&mut self, name: &str, default: &str) -> String {
        match (self.lookup)(&self.var_name(name)) {
            Some(value) if !value.trim().is_empty() => value.trim().to_string(),
            _ => default.to_string(),
        }
    }

    /// Get an http(s) URL with default.
    pub fn get_url(&mut self, name: &str, default: &str) -> String {
        let var_name = self.var_name(name);
        let value = self.get_string(name, default);
        if value.starts_with("https://") || value.starts_with("http://") {
            value
        } else {
            self.errors.push(EnvError::InvalidValue {
                var: var_name,
                expected: "http(s) URL".to_string(),
                value,
            });
            default.to_string()
        }
    }

    /// Get a u32 value with default and range validation.
    pub fn get_u32_range(&mut self, name: &str, default: u32, min: u32, max: u32) -> u32 {
        let var_name = self.var_name(name);
        let Some(value) = (self.lookup)(&var_name) else {
            return default;
        };
        match value.trim().parse::<u32>() {
            Ok(n) if n >= min && n <= max => n,
            Ok(n) => {
                self.errors.push(EnvError::OutOfRange {
                    var: var_name,
                    value: n.to_string(),
                    min: min.to_string(),
                    max: max.to_string(),
                });
                default
            }
            Err(_) => {
                self.errors.push(EnvError::InvalidValue {
                    var: var_name,
                    expected: "unsigned 32-bit integer".to_string(),
                    value,
                });
                default
            }
        }
    }
}

impl Default for EnvParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Runtime configuration for the results client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KciConfig {
    /// Dashboard API root, always ending in `/`.
    pub api_url: String,
    /// Dashboard web root, without a trailing `/`.
    pub dashboard_url: String,
    /// Additional attempts allowed after a retryable HTTP status.
    pub max_retries: u32,
}

impl Default for KciConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            dashboard_url: DEFAULT_DASHBOARD_URL.to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl KciConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> (Self, Vec<EnvError>) {
        Self::from_parser(EnvParser::new())
    }

    /// Load configuration through an explicit parser.
    pub fn from_parser(mut parser: EnvParser) -> (Self, Vec<EnvError>) {
        let mut api_url = parser.get_url("API_URL", DEFAULT_API_URL);
        if !api_url.ends_with('/') {
            api_url.push('/');
        }
        let dashboard_url = parser
            .get_url("DASHBOARD_URL", DEFAULT_DASHBOARD_URL)
            .trim_end_matches('/')
            .to_string();
        let max_retries = parser.get_u32_range("MAX_RETRIES", DEFAULT_MAX_RETRIES, 0, 10);

        let config = Self {
            api_url,
            dashboard_url,
            max_retries,
        };
        (config, parser.take_errors())
    }

    /// Dashboard link for a build record.
    pub fn build_link(&self, id: &str) -> String {
        format!("{}/build/{}", self.dashboard_url, id)
    }

    /// Dashboard link for a boot or test record.
    pub fn test_link(&self, id: &str) -> String {
        format!("{}/test/{}", self.dashboard_url, id)
    }
}
