//! Builder for constructing Hiss instances.

use crate::backend::RawFetcher;
use crate::core::Hiss;
use crate::core::loader::SourceLoader;
use crate::core::settings::EnvOverrides;
use std::sync::Arc;

#[cfg(feature = "aws")]
use crate::backend::aws::{AwsBackend, AwsOptions};

/// Builder for constructing a [`Hiss`] instance.
///
/// # Examples
///
/// ```rust,no_run
/// use hiss::prelude::*;
///
/// # async fn example() -> Result<()> {
/// let mut hiss = Hiss::builder()
///     .with_env_overrides("APP", "__")
///     .build();
///
/// hiss.read_in_sources(&["./fixtures/config-1.yaml", "./fixtures/config-2.yaml"])
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct HissBuilder {
    fetcher: Option<Arc<dyn RawFetcher>>,
    env: Option<EnvOverrides>,
    #[cfg(feature = "aws")]
    aws_options: AwsOptions,
}

impl HissBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            fetcher: None,
            env: None,
            #[cfg(feature = "aws")]
            aws_options: AwsOptions::default(),
        }
    }

    /// Fetch resource identifiers through `fetcher` instead of AWS.
    pub fn with_fetcher(mut self, fetcher: Arc<dyn RawFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Use these endpoint/region overrides for the default AWS backend.
    ///
    /// Ignored when a fetcher is set with [`HissBuilder::with_fetcher`].
    #[cfg(feature = "aws")]
    pub fn with_aws_options(mut self, options: AwsOptions) -> Self {
        self.aws_options = options;
        self
    }

    /// Let environment variables override settings at read time.
    ///
    /// # Arguments
    ///
    /// * `prefix` - Prefix for environment variables (e.g., "APP")
    /// * `separator` - Separator for nested keys (e.g., "__" for APP_DB__HOST)
    ///
    /// With `("APP", "__")`, `APP_SNAKE__SOUND=rattle` overrides `snake.sound`.
    /// An empty prefix behaves like [`HissBuilder::with_automatic_env`].
    pub fn with_env_overrides(mut self, prefix: &str, separator: &str) -> Self {
        self.env = Some(EnvOverrides {
            prefix: (!prefix.is_empty()).then(|| prefix.to_string()),
            separator: separator.to_string(),
        });
        self
    }

    /// Let unprefixed environment variables override settings at read time.
    ///
    /// With `"_"`, `CHICKEN_SOUND=cluck` overrides `chicken.sound`. Every
    /// variable in the environment takes part, so keys that collide with
    /// unrelated variables can be shadowed.
    pub fn with_automatic_env(mut self, separator: &str) -> Self {
        self.env = Some(EnvOverrides {
            prefix: None,
            separator: separator.to_string(),
        });
        self
    }

    /// Build the handle. No sources are loaded yet.
    pub fn build(self) -> Hiss {
        #[cfg(feature = "aws")]
        let fetcher = self
            .fetcher
            .or_else(|| Some(AwsBackend::shared(&self.aws_options) as Arc<dyn RawFetcher>));

        #[cfg(not(feature = "aws"))]
        let fetcher = self.fetcher;

        Hiss::with_loader(SourceLoader::new(fetcher), self.env)
    }
}

impl Default for HissBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Hiss {
    /// Create a new builder for constructing a configuration handle.
    pub fn builder() -> HissBuilder {
        HissBuilder::new()
    }
}
