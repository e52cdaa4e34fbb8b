//! File-backed replay cache for debugging.
//!
//! Replay mode substitutes a previously captured raw-action file for all
//! network fetches. The cache has no expiry, versioning, or invalidation;
//! a stale file is removed by the operator.

use std::path::{Path, PathBuf};

use iotex_history::HistoryError;
use iotex_history::types::RawAction;

/// Whole-file JSON cache of one wallet's merged raw actions.
///
/// The path is derived deterministically from the wallet address, so
/// repeated runs for the same wallet hit the same file. Each capture fully
/// overwrites the previous content.
#[derive(Debug, Clone)]
pub struct ReplayCache {
    path: PathBuf,
}

impl ReplayCache {
    /// Cache handle for `wallet`, stored under `dir`.
    #[must_use]
    pub fn for_wallet(dir: &Path, wallet: &str) -> Self {
        Self {
            path: dir.join(format!("replay.{wallet}.json")),
        }
    }

    /// Whether a captured file exists for this wallet.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Location of the cache file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the captured actions verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Cache`] if the file is missing, unreadable,
    /// or not a valid raw-action array.
    pub fn load(&self) -> Result<Vec<RawAction>, HistoryError> {
        let data = std::fs::read_to_string(&self.path)
            .map_err(|e| HistoryError::Cache(format!("reading {}: {e}", self.path.display())))?;
        serde_json::from_str(&data)
            .map_err(|e| HistoryError::Cache(format!("parsing {}: {e}", self.path.display())))
    }

    /// Overwrite the cache with a fresh capture (temp file + rename).
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Cache`] on any I/O or serialization failure;
    /// the previous capture is left intact in that case.
    pub fn save(&self, actions: &[RawAction]) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| HistoryError::Cache(format!("creating {}: {e}", parent.display())))?;
        }

        let data = serde_json::to_string_pretty(actions)
            .map_err(|e| HistoryError::Cache(format!("encoding capture: {e}")))?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, data)
            .map_err(|e| HistoryError::Cache(format!("writing {}: {e}", tmp.display())))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| {
            HistoryError::Cache(format!(
                "renaming {} to {}: {e}",
                tmp.display(),
                self.path.display()
            ))
        })?;

        tracing::info!(path = %self.path.display(), actions = actions.len(), "wrote replay cache");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample(hash: &str) -> RawAction {
        serde_json::from_value(json!({
            "action_hash": hash,
            "action": { "core": { "transfer": { "amount": "1" } } }
        }))
        .unwrap()
    }

    #[test]
    fn path_is_derived_from_wallet() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ReplayCache::for_wallet(dir.path(), "io1wallet");
        assert!(
            cache.path().ends_with("replay.io1wallet.json"),
            "file name embeds the wallet address"
        );
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ReplayCache::for_wallet(dir.path(), "io1wallet");

        let actions = vec![sample("0xa"), sample("0xb")];
        cache.save(&actions).unwrap();

        assert!(cache.exists(), "capture creates the file");
        assert_eq!(cache.load().unwrap(), actions, "contents replay verbatim");
    }

    #[test]
    fn save_overwrites_prior_capture() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ReplayCache::for_wallet(dir.path(), "io1wallet");

        cache.save(&[sample("0xa"), sample("0xb")]).unwrap();
        cache.save(&[sample("0xc")]).unwrap();

        let loaded = cache.load().unwrap();
        assert_eq!(loaded.len(), 1, "second capture replaces the first");
        assert_eq!(loaded[0].action_hash.as_deref(), Some("0xc"), "newest content wins");
    }

    #[test]
    fn load_missing_file_is_a_cache_error() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ReplayCache::for_wallet(dir.path(), "io1nobody");
        assert!(
            matches!(cache.load(), Err(HistoryError::Cache(_))),
            "missing capture surfaces as a cache error"
        );
    }
}
