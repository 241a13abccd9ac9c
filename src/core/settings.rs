//! The configuration handle that owns the merged settings.

use crate::ConfigMap;
use crate::core::loader::{LoadSession, SourceLoader};
use crate::core::merge::deep_merge;
use crate::error::{ConfigError, Result};
use config::{Config, Environment, Source, Value};
use serde::de::DeserializeOwned;

#[cfg(feature = "aws")]
use crate::backend::aws::{AwsBackend, AwsOptions};

/// Environment variables that override settings at read time.
#[derive(Debug, Clone)]
pub(crate) struct EnvOverrides {
    /// `None` matches every variable, like `CHICKEN_SOUND` for `chicken.sound`
    pub(crate) prefix: Option<String>,
    pub(crate) separator: String,
}

/// Merged configuration from an ordered list of files and remote resources.
///
/// Sources are loaded with [`Hiss::read_in_sources`]; later sources override
/// earlier ones key by key. Reads go through the `config` crate, so dotted
/// key paths and typed deserialization work as usual.
///
/// # Examples
///
/// ```rust,no_run
/// use hiss::prelude::*;
///
/// # async fn example() -> Result<()> {
/// let mut hiss = Hiss::builder().with_env_overrides("APP", "__").build();
/// hiss.read_in_sources(&[
///     "./config/base.yaml",
///     "arn:aws:secretsmanager:::secret:prod/app/secrets.yaml",
/// ])
/// .await?;
///
/// let sound: String = hiss.get("snake.sound")?;
/// # Ok(())
/// # }
/// ```
pub struct Hiss {
    values: ConfigMap,
    session: LoadSession,
    loader: SourceLoader,
    env: Option<EnvOverrides>,
}

impl Hiss {
    pub(crate) fn with_loader(loader: SourceLoader, env: Option<EnvOverrides>) -> Self {
        Self {
            values: ConfigMap::new(),
            session: LoadSession::new(),
            loader,
            env,
        }
    }

    /// Load `sources` in order and merge them into the current settings.
    ///
    /// Each source is either a resource identifier
    /// (`arn:aws:secretsmanager:...` or `arn:aws:ssm:...`) or a file path.
    /// Loading stops at the first failure; settings merged before it are kept.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SourceLoadFailed`] naming the failing source.
    pub async fn read_in_sources<S>(&mut self, sources: &[S]) -> Result<()>
    where
        S: AsRef<str>,
    {
        self.loader
            .load_sources(&mut self.values, &mut self.session, sources)
            .await
    }

    /// Like [`Hiss::read_in_sources`], but fetch identifiers through the
    /// shared AWS backend for `options` instead of the configured fetcher.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SourceLoadFailed`] naming the failing source.
    #[cfg(feature = "aws")]
    pub async fn read_in_sources_with<S>(&mut self, sources: &[S], options: &AwsOptions) -> Result<()>
    where
        S: AsRef<str>,
    {
        SourceLoader::new(Some(AwsBackend::shared(options)))
            .load_sources(&mut self.values, &mut self.session, sources)
            .await
    }

    /// The source most recently attempted by the last load.
    ///
    /// After a failed load this is the source that failed.
    pub fn config_src_used(&self) -> Option<&str> {
        self.session.source_used()
    }

    /// Deep-merge a map into the current settings.
    pub fn merge_config_map(&mut self, map: ConfigMap) {
        deep_merge(&mut self.values, map);
    }

    /// All merged settings, without environment overrides.
    pub fn all_settings(&self) -> &ConfigMap {
        &self.values
    }

    /// Build a [`Config`] from the merged settings with environment
    /// overrides applied on top.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment overrides cannot be applied.
    pub fn to_config(&self) -> Result<Config> {
        let mut builder = Config::builder().add_source(Snapshot(self.values.clone()));

        if let Some(env) = &self.env {
            let environment = match &env.prefix {
                Some(prefix) => Environment::with_prefix(prefix).prefix_separator("_"),
                None => Environment::default(),
            };
            builder = builder.add_source(environment.separator(&env.separator).try_parsing(true));
        }

        builder
            .build()
            .map_err(|e| ConfigError::DeserializationError(format!("Failed to build configuration: {}", e)))
    }

    /// Get the value at a dotted key path, e.g. `"snake.sound"`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DeserializationError`] if the key is missing or
    /// the value does not fit `T`.
    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.to_config()?
            .get::<T>(key)
            .map_err(|e| ConfigError::DeserializationError(format!("Failed to read '{}': {}", key, e)))
    }

    /// Get the value at `key` as a string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DeserializationError`] if the key is missing.
    pub fn get_string(&self, key: &str) -> Result<String> {
        self.get::<String>(key)
    }

    /// Whether any value is set at `key`.
    pub fn is_set(&self, key: &str) -> bool {
        self.get::<Value>(key).is_ok()
    }

    /// Deserialize all settings into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DeserializationError`] if the settings do not fit `T`.
    pub fn unmarshal<T>(&self) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.to_config()?.try_deserialize::<T>().map_err(|e| {
            ConfigError::DeserializationError(format!("Failed to deserialize configuration: {}", e))
        })
    }
}

impl Default for Hiss {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// The merged settings as a `config` source.
#[derive(Debug, Clone)]
struct Snapshot(ConfigMap);

impl Source for Snapshot {
    fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
        Box::new(self.clone())
    }

    fn collect(&self) -> std::result::Result<ConfigMap, config::ConfigError> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::materialize;
    use serde::Deserialize;

    fn hiss_with(text: &str) -> Hiss {
        let mut hiss = Hiss::with_loader(SourceLoader::new(None), None);
        hiss.merge_config_map(materialize("yaml", text).unwrap());
        hiss
    }

    #[test]
    fn test_get_nested() {
        let hiss = hiss_with("snake:\n  sound: hiss\n  foot: 0\n");
        assert_eq!(hiss.get_string("snake.sound").unwrap(), "hiss");
        assert_eq!(hiss.get::<i64>("snake.foot").unwrap(), 0);
    }

    #[test]
    fn test_get_missing() {
        let hiss = hiss_with("snake:\n  sound: hiss\n");
        assert!(hiss.get_string("cat.sound").is_err());
        assert!(!hiss.is_set("cat"));
        assert!(hiss.is_set("snake.sound"));
    }

    #[test]
    fn test_unmarshal() {
        #[derive(Debug, Deserialize)]
        struct Animal {
            sound: String,
            foot: u32,
        }

        #[derive(Debug, Deserialize)]
        struct Zoo {
            snake: Animal,
            cat: Animal,
        }

        let hiss = hiss_with("snake: {sound: hiss, foot: 0}\ncat: {sound: meow, foot: 4}\n");
        let zoo: Zoo = hiss.unmarshal().unwrap();
        assert_eq!(zoo.snake.sound, "hiss");
        assert_eq!(zoo.cat.foot, 4);
        assert_eq!(zoo.snake.foot, 0);
        assert_eq!(zoo.cat.sound, "meow");
    }

    #[test]
    fn test_merge_config_map_is_deep() {
        let mut hiss = hiss_with("snake: {sound: hiss, foot: 0}\n");
        hiss.merge_config_map(materialize("yaml", "snake: {foot: 1}\n").unwrap());
        assert_eq!(hiss.get_string("snake.sound").unwrap(), "hiss");
        assert_eq!(hiss.get::<i64>("snake.foot").unwrap(), 1);
    }

    #[test]
    fn test_fresh_handle_is_empty() {
        let hiss = Hiss::with_loader(SourceLoader::new(None), None);
        assert!(hiss.all_settings().is_empty());
        assert_eq!(hiss.config_src_used(), None);
    }
}
