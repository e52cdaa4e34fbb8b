//! Runtime configuration loaded from `config.toml`.
//!
//! Holds the knobs the pipeline consumes but does not own: the
//! transaction-count limit that bounds each pass's query budget and the
//! replay-mode flag. CLI flags override file values; a missing file means
//! defaults, so the binary works without any config.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Default upper bound on fetched transactions per run.
pub const DEFAULT_LIMIT: usize = 20_000;

/// Top-level configuration.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Config {
    /// Upper bound on fetched transactions; each fetch pass issues at most
    /// `ceil(limit / page size)` requests.
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Replay mode: reuse a captured run when its cache file exists, and
    /// capture fresh runs for later replay.
    #[serde(default)]
    pub replay: bool,
}

const fn default_limit() -> usize {
    DEFAULT_LIMIT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            replay: false,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// Returns [`Config::default`] if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text =
            std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.limit, DEFAULT_LIMIT, "default limit applies");
        assert!(!config.replay, "replay defaults to off");
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "limit = 500\nreplay = true\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.limit, 500, "limit taken from file");
        assert!(config.replay, "replay taken from file");
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "replay = true\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.limit, DEFAULT_LIMIT, "unset limit falls back");
        assert!(config.replay, "set flag honored");
    }
}
