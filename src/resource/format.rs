//! Format sniffing and materializing raw text into a configuration map.

use crate::ConfigMap;
use crate::error::{ConfigError, Result};
use config::{Config, File, FileFormat};

/// Structured-text formats understood by the materializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML (`yaml`, `yml`)
    Yaml,
    /// JSON (`json`)
    Json,
    /// TOML (`toml`)
    Toml,
    /// INI (`ini`); every value is read as a string
    Ini,
}

impl Format {
    /// Look up a format by its tag, ignoring case.
    ///
    /// Returns `None` for an empty or unknown tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            "ini" => Some(Self::Ini),
            _ => None,
        }
    }

    pub(crate) fn file_format(self) -> FileFormat {
        match self {
            Self::Yaml => FileFormat::Yaml,
            Self::Json => FileFormat::Json,
            Self::Toml => FileFormat::Toml,
            Self::Ini => FileFormat::Ini,
        }
    }
}

/// Sniff the format tag from the trailing segment of an identifier.
///
/// Scans backward for the first `.` that comes before any `/` or `:` and
/// returns everything after it. Returns an empty string when there is none.
/// Never fails.
///
/// # Examples
///
/// ```rust
/// use hiss::resource::format_tag;
///
/// assert_eq!(format_tag("arn:aws:secretsmanager:::secret:test/animal/secrets.yaml"), "yaml");
/// assert_eq!(format_tag("arn:aws:ssm:::parameter/v1.2/config"), "");
/// ```
pub fn format_tag(identifier: &str) -> &str {
    // Delimiters are ASCII, so `i + 1` is always a char boundary.
    for (i, b) in identifier.bytes().enumerate().rev() {
        match b {
            b'/' | b':' => break,
            b'.' => return &identifier[i + 1..],
            _ => {}
        }
    }
    ""
}

/// Parse `text` as the format named by `tag`.
///
/// # Errors
///
/// Returns [`ConfigError::UnparseableContent`] if the tag is empty or unknown,
/// or if the text is not a valid mapping in that format.
pub fn materialize(tag: &str, text: &str) -> Result<ConfigMap> {
    let format = Format::from_tag(tag).ok_or_else(|| {
        if tag.is_empty() {
            ConfigError::UnparseableContent("no format extension found".to_string())
        } else {
            ConfigError::UnparseableContent(format!("unsupported format: {}", tag))
        }
    })?;

    Config::builder()
        .add_source(File::from_str(text, format.file_format()))
        .build()
        .and_then(|config| config.try_deserialize::<ConfigMap>())
        .map_err(|e| ConfigError::UnparseableContent(format!("invalid {}: {}", tag, e)))
}
