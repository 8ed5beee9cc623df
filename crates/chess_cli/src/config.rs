//! Optional TOML configuration file.

use std::path::Path;

use anyhow::{Context, Result};
use chess_rules::STARTPOS_FEN;
use serde::{Deserialize, Serialize};

/// Settings read from `--config <path>`; flags on the command line win.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Position used when a command gets no `--fen`.
    pub start_fen: String,
    /// `tracing` filter directives, used when `RUST_LOG` and `--log` are absent.
    pub log_filter: String,
    pub perft_depth: u8,
    pub json: bool,
    /// Thinking budget written into search requests.
    pub think_time_ms: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            start_fen: STARTPOS_FEN.to_string(),
            log_filter: "warn".to_string(),
            perft_depth: 3,
            json: false,
            think_time_ms: 5000,
        }
    }
}

impl CliConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        assert_eq!(CliConfig::from_toml("").unwrap(), CliConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let cfg = CliConfig::from_toml("perft_depth = 5\njson = true\n").unwrap();
        assert_eq!(cfg.perft_depth, 5);
        assert!(cfg.json);
        assert_eq!(cfg.start_fen, STARTPOS_FEN);
        assert_eq!(cfg.log_filter, "warn");
        assert_eq!(cfg.think_time_ms, 5000);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(CliConfig::from_toml("depth = 4").is_err());
    }

    #[test]
    fn test_wrong_type_rejected() {
        assert!(CliConfig::from_toml("perft_depth = \"deep\"").is_err());
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let err = CliConfig::load(Path::new("/nonexistent/chess.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/chess.toml"));
    }
}
