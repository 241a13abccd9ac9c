//! Remote configuration source addressed by a resource identifier.

use super::ConfigSource;
use crate::ConfigMap;
use crate::backend::{RawFetcher, fetch_resolved};
use crate::error::Result;
use crate::resource::{format_tag, materialize, resolve};
use async_trait::async_trait;
use std::sync::Arc;

/// Configuration stored in a secret or parameter.
///
/// The identifier picks the backend, and its trailing extension picks the
/// parser, e.g. `arn:aws:secretsmanager:::secret:app/config.yaml` is read from
/// Secrets Manager and parsed as YAML.
///
/// # Examples
///
/// ```rust,no_run
/// # #[cfg(feature = "aws")]
/// # fn example() {
/// use hiss::backend::aws::{AwsBackend, AwsOptions};
/// use hiss::sources::ResourceSource;
///
/// let source = ResourceSource::new(
///     "arn:aws:ssm:::parameter/test/animal/config.yaml",
///     AwsBackend::shared(&AwsOptions::new()),
/// );
/// # }
/// ```
pub struct ResourceSource {
    identifier: String,
    fetcher: Arc<dyn RawFetcher>,
}

impl ResourceSource {
    /// Create a source for `identifier`, fetched through `fetcher`.
    pub fn new(identifier: impl Into<String>, fetcher: Arc<dyn RawFetcher>) -> Self {
        Self {
            identifier: identifier.into(),
            fetcher,
        }
    }

    /// The identifier as given.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

#[async_trait]
impl ConfigSource for ResourceSource {
    async fn load(&self) -> Result<ConfigMap> {
        let resolved = resolve(&self.identifier)?;
        tracing::debug!(
            backend = %resolved.backend,
            name = %resolved.name,
            "fetching configuration"
        );

        let text = fetch_resolved(self.fetcher.as_ref(), &resolved).await?;
        // Sniff from the identifier as given, not the resolved name.
        materialize(format_tag(&self.identifier), &text)
    }

    fn name(&self) -> String {
        format!("resource:{}", self.identifier)
    }
}
