//! Logging configuration from environment variables

use std::env;
use std::path::PathBuf;

pub const DEFAULT_LOG_FILTER: &str = "rewear_client=info,warn";
pub const LOG_FILE_NAME: &str = "rewear-client.log";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Directory holding the daily-rotated log files
    pub log_dir: PathBuf,
    /// Filter directives (e.g. "rewear_client=debug,info")
    pub log_level: String,
    /// Mirror log lines to stderr
    pub log_to_stderr: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            log_level: DEFAULT_LOG_FILTER.to_string(),
            log_to_stderr: false,
        }
    }
}

impl LogConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            log_dir: lookup("REWEAR_LOG_DIR")
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            log_level: lookup("RUST_LOG")
                .filter(|level| !level.trim().is_empty())
                .unwrap_or(defaults.log_level),
            log_to_stderr: lookup("REWEAR_LOG_STDERR")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(defaults.log_to_stderr),
        }
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join(LOG_FILE_NAME)
    }

    /// Check if debug logging is enabled
    pub fn is_debug_enabled(&self) -> bool {
        self.log_level.contains("debug") || self.log_level.contains("trace")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = LogConfig::from_lookup(lookup(&[]));
        assert_eq!(config, LogConfig::default());
        assert_eq!(config.log_file(), PathBuf::from("logs/rewear-client.log"));
        assert!(!config.is_debug_enabled());
    }

    #[test]
    fn test_reads_overrides() {
        let config = LogConfig::from_lookup(lookup(&[
            ("REWEAR_LOG_DIR", "/tmp/rewear"),
            ("RUST_LOG", "rewear_client=debug"),
            ("REWEAR_LOG_STDERR", "1"),
        ]));
        assert_eq!(config.log_dir, PathBuf::from("/tmp/rewear"));
        assert!(config.is_debug_enabled());
        assert!(config.log_to_stderr);
    }
}
