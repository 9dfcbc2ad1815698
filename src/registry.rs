//! Source registry - the fixed name -> adapter binding.
//!
//! Built once at startup from [`crate::config::Config`] and never modified
//! afterwards. Provider-setup failures here (a configured YouTube stream with
//! no API key, for instance) are fatal: a process that silently dropped a
//! configured stream would record a history with a hole nobody asked for.

use std::collections::BTreeMap;

use anyhow::{bail, Context, Result};

use streamwatch_adapters::{PandaAdapter, ViewCountSource, YouTubeAdapter};

use crate::config::Config;

/// The set of viewer-count sources to poll each cycle, keyed by stream name.
#[derive(Default)]
pub struct SourceRegistry {
    sources: BTreeMap<String, Box<dyn ViewCountSource>>,
}

impl SourceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from configuration.
    ///
    /// `youtube_api_key` is only required when at least one YouTube stream is
    /// configured; a Panda-only deployment runs without it.
    pub fn from_config(config: &Config, youtube_api_key: Option<&str>) -> Result<Self> {
        let mut registry = Self::new();

        for (name, video_id) in &config.youtube {
            let Some(api_key) = youtube_api_key else {
                bail!("{name}: YouTube source {video_id:?} requires an API key");
            };

            let adapter = YouTubeAdapter::builder()
                .api_key(api_key)
                .video_id(video_id)
                .build()
                .with_context(|| format!("{name}: YouTube({video_id:?})"))?;
            registry.insert(name, adapter);
        }

        for (name, room_id) in &config.panda {
            let adapter = PandaAdapter::builder()
                .room_id(*room_id)
                .build()
                .with_context(|| format!("{name}: Panda({room_id})"))?;
            registry.insert(name, adapter);
        }

        Ok(registry)
    }

    /// Register a source under a stream name.
    ///
    /// Exposed so embedders and tests can assemble registries with their own
    /// [`ViewCountSource`] implementations.
    pub fn insert(&mut self, name: impl Into<String>, source: impl ViewCountSource + 'static) {
        self.sources.insert(name.into(), Box::new(source));
    }

    /// Iterate over `(name, source)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &(dyn ViewCountSource + 'static))> {
        self.sources.iter().map(|(name, source)| (name, &**source))
    }

    /// Number of registered sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Check whether any sources are registered.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl std::fmt::Debug for SourceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceRegistry")
            .field("streams", &self.sources.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_youtube() -> Config {
        let mut config = Config::default();
        config
            .youtube
            .insert("main-stage".to_string(), "abc123".to_string());
        config
    }

    #[test]
    fn test_from_config_builds_all_sources() {
        let mut config = config_with_youtube();
        config.panda.insert("backstage".to_string(), 10300);

        let registry = SourceRegistry::from_config(&config, Some("test-key")).unwrap();
        assert_eq!(registry.len(), 2);

        let names: Vec<&str> = registry.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["backstage", "main-stage"]);
    }

    #[test]
    fn youtube_stream_without_api_key_is_fatal() {
        let config = config_with_youtube();

        let err = SourceRegistry::from_config(&config, None).unwrap_err();
        assert!(err.to_string().contains("main-stage"));
        assert!(err.to_string().contains("API key"));
    }

    #[test]
    fn panda_only_config_needs_no_api_key() {
        let mut config = Config::default();
        config.panda.insert("backstage".to_string(), 10300);

        let registry = SourceRegistry::from_config(&config, None).unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn empty_config_builds_empty_registry() {
        let registry = SourceRegistry::from_config(&Config::default(), None).unwrap();
        assert!(registry.is_empty());
    }
}
