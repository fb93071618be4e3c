//! # Configuration
//!
//! Settings loaded from environment variables.

use crate::constants::{DEFAULT_LOG_FORMAT, DEFAULT_LOG_LEVEL, DEFAULT_SECRET_NAMESPACE};
use std::str::FromStr;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{other}' (expected 'text' or 'json')")),
        }
    }
}

/// Process-level configuration
///
/// All settings have defaults and can be overridden via environment variables.
#[derive(Debug, Clone)]
pub struct ShareOptionsConfig {
    /// Global log level (ERROR, WARN, INFO, DEBUG, TRACE)
    /// `RUST_LOG` takes precedence when set
    pub log_level: String,
    /// Log format (json, text)
    pub log_format: LogFormat,
    /// Enable color in text format logs
    pub log_enable_color: bool,
    /// Namespace used for secret references without one
    pub default_namespace: String,
}

impl Default for ShareOptionsConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_format: LogFormat::Text,
            log_enable_color: true,
            default_namespace: DEFAULT_SECRET_NAMESPACE.to_string(),
        }
    }
}

impl ShareOptionsConfig {
    /// Load configuration from environment variables with defaults
    ///
    /// `SECRET_NAMESPACE` wins over `POD_NAMESPACE` for the default namespace.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            log_level: var_or_default_str(&lookup, "LOG_LEVEL", DEFAULT_LOG_LEVEL),
            log_format: var_or_default_str(&lookup, "LOG_FORMAT", DEFAULT_LOG_FORMAT)
                .parse()
                .unwrap_or(LogFormat::Text),
            log_enable_color: var_or_default_bool(&lookup, "LOG_ENABLE_COLOR", true),
            default_namespace: lookup("SECRET_NAMESPACE").unwrap_or_else(|| {
                var_or_default_str(&lookup, "POD_NAMESPACE", DEFAULT_SECRET_NAMESPACE)
            }),
        }
    }
}

/// Read variable as string or return default
fn var_or_default_str(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> String {
    lookup(key).unwrap_or_else(|| default.to_string())
}

/// Read variable as boolean or return default
fn var_or_default_bool(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: bool) -> bool {
    lookup(key).map_or(default, |v| parse_bool(&v))
}

fn parse_bool(value: &str) -> bool {
    let v_lower = value.to_lowercase();
    v_lower == "true" || v_lower == "1" || v_lower == "yes" || v_lower == "on"
}
