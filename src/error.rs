//! Error types for hiss.

/// Result type alias for hiss operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while loading or reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The string is not a well-formed resource identifier (ARN).
    #[error("Malformed resource identifier '{identifier}': {reason}")]
    MalformedIdentifier {
        /// The offending identifier
        identifier: String,
        /// Why it was rejected
        reason: &'static str,
    },

    /// The identifier names a service with no known backend.
    #[error("Unsupported backend service: {service}")]
    UnsupportedBackend {
        /// The service segment of the identifier
        service: String,
    },

    /// The backend call failed.
    #[error("Failed to fetch '{resource}': {source}")]
    BackendFetchFailed {
        /// Logical name of the secret, parameter or table
        resource: String,
        /// Underlying backend failure
        #[source]
        source: FetchError,
    },

    /// Content could not be parsed with the sniffed or given format.
    #[error("Failed to parse configuration: {0}")]
    UnparseableContent(String),

    /// Loading a source in an ordered load failed.
    #[error("Failed to load configuration source '{src}': {cause}")]
    SourceLoadFailed {
        /// The source string as it was given
        src: String,
        /// What went wrong
        #[source]
        cause: Box<ConfigError>,
    },

    /// A local configuration file does not exist.
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Failed to deserialize configuration into the requested type.
    #[error("Failed to deserialize configuration: {0}")]
    DeserializationError(String),

    /// A table item could not be converted.
    #[error("Invalid item: {0}")]
    InvalidItem(String),

    /// Attempted to use a feature that is not enabled.
    #[error("Feature not enabled: {0}")]
    FeatureNotEnabled(&'static str),
}

impl ConfigError {
    /// The source string named by a [`ConfigError::SourceLoadFailed`].
    pub fn failed_source(&self) -> Option<&str> {
        match self {
            Self::SourceLoadFailed { src, .. } => Some(src),
            _ => None,
        }
    }
}

/// Failures reported by a backend fetcher.
///
/// These are wrapped and propagated verbatim; nothing here is retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The secret, parameter or item does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Credentials lack permission for the resource.
    #[error("access denied: {0}")]
    AccessDenied(String),

    /// Timeout, dispatch or response failure.
    #[error("transient failure: {0}")]
    Transient(String),

    /// Anything else the backend returned.
    #[error("{0}")]
    Other(String),
}
