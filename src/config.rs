//! Stream configuration loading.
//!
//! The configuration file is a JSON document mapping human-readable stream
//! names to provider-specific identifiers, partitioned by provider:
//!
//! ```json
//! {
//!     "youtube": {"main-stage": "dQw4w9WgXcQ"},
//!     "panda": {"backstage": 10300}
//! }
//! ```
//!
//! It is read once at startup; a malformed or unreadable file is a fatal
//! error.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Static stream configuration, one map per provider.
///
/// Files written for earlier deployments used capitalized provider keys, so
/// `YouTube` and `Panda` are accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Stream name -> YouTube video id.
    #[serde(default, alias = "YouTube")]
    pub youtube: BTreeMap<String, String>,

    /// Stream name -> Panda TV room id.
    #[serde(default, alias = "Panda")]
    pub panda: BTreeMap<String, u64>,
}

impl Config {
    /// Total number of configured streams across all providers.
    pub fn len(&self) -> usize {
        self.youtube.len() + self.panda.len()
    }

    /// Check whether any streams are configured.
    pub fn is_empty(&self) -> bool {
        self.youtube.is_empty() && self.panda.is_empty()
    }
}

/// Load and parse the configuration file.
pub fn load(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "youtube": {{"main-stage": "abc123"}},
                "panda": {{"backstage": 10300}}
            }}"#
        )
        .unwrap();

        let config = load(file.path()).unwrap();
        assert_eq!(config.len(), 2);
        assert_eq!(config.youtube.get("main-stage").unwrap(), "abc123");
        assert_eq!(config.panda.get("backstage"), Some(&10300));
    }

    #[test]
    fn test_load_accepts_legacy_capitalized_keys() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "YouTube": {{"main-stage": "abc123"}},
                "Panda": {{"backstage": 10300}}
            }}"#
        )
        .unwrap();

        let config = load(file.path()).unwrap();
        assert_eq!(config.youtube.get("main-stage").unwrap(), "abc123");
        assert_eq!(config.panda.get("backstage"), Some(&10300));
    }

    #[test]
    fn test_missing_providers_default_to_empty() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"youtube": {{"only": "abc"}}}}"#).unwrap();

        let config = load(file.path()).unwrap();
        assert_eq!(config.youtube.len(), 1);
        assert!(config.panda.is_empty());
    }

    #[test]
    fn load_fails_on_missing_file() {
        let err = load(Path::new("/nonexistent/scrobbler.config.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn load_fails_on_malformed_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = load(file.path()).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
    }
}
