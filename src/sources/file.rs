//! File-based configuration source.

use super::ConfigSource;
use crate::ConfigMap;
use crate::error::{ConfigError, Result};
use crate::resource::Format;
use async_trait::async_trait;
use config::File;
use std::path::PathBuf;

/// File-based configuration source.
///
/// Loads configuration from YAML, TOML, JSON or INI files, picking the format
/// from the file extension.
///
/// # Examples
///
/// ```rust,no_run
/// use hiss::sources::FileSource;
///
/// let source = FileSource::new("./fixtures/config-1.yaml");
/// ```
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a new file source with automatic format detection.
    ///
    /// The format is detected from the file extension:
    /// - `.yaml`, `.yml` -> YAML
    /// - `.toml` -> TOML
    /// - `.json` -> JSON
    /// - `.ini` -> INI
    ///
    /// Extensions match regardless of case, so `config.YAML` is YAML.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Pick the format from the file extension, ignoring case.
    fn detect_format(&self) -> Result<Format> {
        let extension = self
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                ConfigError::UnparseableContent(format!(
                    "Unable to determine file format for: {}",
                    self.path.display()
                ))
            })?;

        Format::from_tag(extension).ok_or_else(|| {
            ConfigError::UnparseableContent(format!(
                "Unsupported file extension: {}. Supported: .yaml, .yml, .toml, .json, .ini",
                extension
            ))
        })
    }
}

#[async_trait]
impl ConfigSource for FileSource {
    async fn load(&self) -> Result<ConfigMap> {
        let format = self.detect_format()?;

        if !self.path.exists() {
            return Err(ConfigError::FileNotFound(self.path.display().to_string()));
        }

        // config's own detection is case-sensitive, so name the format
        config::Config::builder()
            .add_source(
                File::from(self.path.clone())
                    .format(format.file_format())
                    .required(true),
            )
            .build()
            .and_then(|config| config.try_deserialize::<ConfigMap>())
            .map_err(|e| {
                ConfigError::UnparseableContent(format!(
                    "Failed to parse {}: {}",
                    self.path.display(),
                    e
                ))
            })
    }

    fn name(&self) -> String {
        format!("file:{}", self.path.display())
    }
}
