//! Ordered loading of configuration sources.

use crate::ConfigMap;
use crate::backend::RawFetcher;
use crate::core::merge::deep_merge;
use crate::error::{ConfigError, Result};
use crate::resource::is_resource_identifier;
use crate::sources::{ConfigSource, FileSource, ResourceSource};
use std::sync::Arc;

/// Bookkeeping for one ordered load.
///
/// Remembers the source most recently attempted so a failure can be
/// attributed after the fact.
#[derive(Debug, Clone, Default)]
pub struct LoadSession {
    source_used: Option<String>,
}

impl LoadSession {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// The source most recently attempted, if any.
    pub fn source_used(&self) -> Option<&str> {
        self.source_used.as_deref()
    }

    fn reset(&mut self) {
        self.source_used = None;
    }

    fn record(&mut self, source: &str) {
        self.source_used = Some(source.to_string());
    }
}

/// Loads source strings in order and deep-merges them.
///
/// Resource identifiers are fetched through the configured [`RawFetcher`];
/// everything else is treated as a local file path.
pub struct SourceLoader {
    fetcher: Option<Arc<dyn RawFetcher>>,
}

impl SourceLoader {
    /// Create a loader. Without a fetcher, identifier sources fail.
    pub fn new(fetcher: Option<Arc<dyn RawFetcher>>) -> Self {
        Self { fetcher }
    }

    /// Build the source for one source string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FeatureNotEnabled`] for an identifier when no
    /// fetcher is available.
    pub fn source_for(&self, source: &str) -> Result<Box<dyn ConfigSource>> {
        if !is_resource_identifier(source) {
            return Ok(Box::new(FileSource::new(source)));
        }

        let fetcher = self
            .fetcher
            .clone()
            .ok_or(ConfigError::FeatureNotEnabled("aws"))?;
        Ok(Box::new(ResourceSource::new(source, fetcher)))
    }

    /// Load `sources` in order, deep-merging each into `aggregate`.
    ///
    /// Later sources override earlier ones. The first failure stops the load
    /// and is returned as [`ConfigError::SourceLoadFailed`]; whatever earlier
    /// sources merged stays in `aggregate`. An empty list does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SourceLoadFailed`] naming the failing source.
    pub async fn load_sources<S>(
        &self,
        aggregate: &mut ConfigMap,
        session: &mut LoadSession,
        sources: &[S],
    ) -> Result<()>
    where
        S: AsRef<str>,
    {
        session.reset();

        for source in sources {
            let source = source.as_ref();
            session.record(source);

            let values = match self.load_one(source).await {
                Ok(values) => values,
                Err(cause) => {
                    tracing::warn!(source, error = %cause, "failed to load configuration source");
                    return Err(ConfigError::SourceLoadFailed {
                        src: source.to_string(),
                        cause: Box::new(cause),
                    });
                }
            };

            deep_merge(aggregate, values);
        }

        Ok(())
    }

    async fn load_one(&self, source: &str) -> Result<ConfigMap> {
        let source = self.source_for(source)?;
        tracing::debug!(source = %source.name(), "loading configuration source");
        source.load().await
    }
}
