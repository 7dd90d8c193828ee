//! Configuration Module
//!
//! Handles loading the cache engine and test module settings from
//! environment variables.

use std::env;
use std::str::FromStr;

/// How the hosting process is being run.
///
/// Command-line runs are gated by the engine's separate CLI switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Run from a command-line test runner
    Cli,
    /// Embedded in a long-running host process
    Embedded,
}

impl FromStr for ExecutionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cli" => Ok(ExecutionMode::Cli),
            "embedded" | "server" => Ok(ExecutionMode::Embedded),
            other => Err(format!("unknown execution mode '{}'", other)),
        }
    }
}

/// Cache engine and test module configuration.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// General engine enable switch
    pub enabled: bool,
    /// Engine enable switch for command-line runs
    pub enable_cli: bool,
    /// Mode the module checks the engine against
    pub execution_mode: ExecutionMode,
    /// Maximum number of entries the cache can hold, None = unbounded
    pub max_entries: Option<usize>,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_ENABLED` - General enable switch (default: true)
    /// - `CACHE_ENABLE_CLI` - Enable switch for CLI runs (default: false)
    /// - `CACHE_EXECUTION_MODE` - `cli` or `embedded` (default: cli)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: unbounded)
    /// - `CACHE_CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 1)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: env::var("CACHE_ENABLED")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.enabled),
            enable_cli: env::var("CACHE_ENABLE_CLI")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.enable_cli),
            execution_mode: env::var("CACHE_EXECUTION_MODE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.execution_mode),
            max_entries: env::var("CACHE_MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .or(defaults.max_entries),
            cleanup_interval: env::var("CACHE_CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cleanup_interval),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enabled: true,
            enable_cli: false,
            execution_mode: ExecutionMode::Cli,
            max_entries: None,
            cleanup_interval: 1,
        }
    }
}

/// Parses an ini-style boolean flag.
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.enabled);
        assert!(!config.enable_cli);
        assert_eq!(config.execution_mode, ExecutionMode::Cli);
        assert_eq!(config.max_entries, None);
        assert_eq!(config.cleanup_interval, 1);
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag(" YES "), Some(true));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag(""), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn test_execution_mode_parse() {
        assert_eq!("CLI".parse::<ExecutionMode>(), Ok(ExecutionMode::Cli));
        assert_eq!("server".parse::<ExecutionMode>(), Ok(ExecutionMode::Embedded));
        assert!("daemon".parse::<ExecutionMode>().is_err());
    }
}
