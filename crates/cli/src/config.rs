//! Runtime configuration for the `habitual` binary.

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

/// Snapshot location used when neither `--data` nor `HABITUAL_DATA` is set.
pub const DEFAULT_DATA_PATH: &str = ".habitual/snapshot.json";

/// Log filter used when neither `--log`, `HABITUAL_LOG` nor `RUST_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Resolved CLI settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Snapshot file
    pub data_path: PathBuf,
    /// `tracing` filter directive
    pub log_filter: String,
}

impl CliConfig {
    /// Resolve settings from parsed flags. Clap already folds in the
    /// `HABITUAL_*` variables; `rust_log` is consulted only for the filter.
    pub fn resolve(data: Option<PathBuf>, log: Option<String>, rust_log: Option<String>) -> Self {
        Self {
            data_path: data.unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH)),
            log_filter: log
                .or(rust_log)
                .filter(|f| !f.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }

    /// Build the subscriber filter, falling back to the default on a bad
    /// directive.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.log_filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    }

    /// Install the global `fmt` subscriber on stderr.
    pub fn init_tracing(&self) {
        tracing_subscriber::fmt()
            .with_env_filter(self.env_filter())
            .with_writer(std::io::stderr)
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::resolve(None, None, None);
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_flag_wins_over_rust_log() {
        let config = CliConfig::resolve(
            Some(PathBuf::from("/tmp/h.json")),
            Some("debug".to_string()),
            Some("trace".to_string()),
        );
        assert_eq!(config.data_path, PathBuf::from("/tmp/h.json"));
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_rust_log_fallback_and_blank_filter() {
        let config = CliConfig::resolve(None, None, Some("info".to_string()));
        assert_eq!(config.log_filter, "info");

        let config = CliConfig::resolve(None, Some("  ".to_string()), None);
        assert_eq!(config.log_filter, "warn");
    }
}
