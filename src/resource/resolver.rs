//! Backend dispatch for resource identifiers.

use super::ResourceIdentifier;
use crate::error::{ConfigError, Result};
use std::fmt;

const SECRETS_MANAGER_SERVICE: &str = "secretsmanager";
const PARAMETER_STORE_SERVICE: &str = "ssm";

const SECRET_PREFIX: &str = "secret:";
// No separator after `parameter`: SSM names keep their leading `/`.
const PARAMETER_PREFIX: &str = "parameter";

/// The remote backend that owns a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// AWS Secrets Manager
    SecretsManager,
    /// AWS Systems Manager Parameter Store
    ParameterStore,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SecretsManager => f.write_str(SECRETS_MANAGER_SERVICE),
            Self::ParameterStore => f.write_str(PARAMETER_STORE_SERVICE),
        }
    }
}

/// A resource identifier resolved to its backend and lookup name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedResource {
    /// Backend that serves the resource
    pub backend: BackendKind,
    /// Backend-relative lookup key (secret ID or parameter name)
    pub name: String,
}

/// Resolve an identifier string to its backend and logical name.
///
/// # Errors
///
/// - [`ConfigError::MalformedIdentifier`] if the string is not an ARN
/// - [`ConfigError::UnsupportedBackend`] if the service has no backend
///
/// # Examples
///
/// ```rust
/// use hiss::resource::{BackendKind, resolve};
///
/// let resolved = resolve("arn:aws:ssm:::parameter/test/animal/config.yaml").unwrap();
/// assert_eq!(resolved.backend, BackendKind::ParameterStore);
/// assert_eq!(resolved.name, "/test/animal/config.yaml");
/// ```
pub fn resolve(identifier: &str) -> Result<ResolvedResource> {
    ResolvedResource::try_from(&ResourceIdentifier::parse(identifier)?)
}

impl TryFrom<&ResourceIdentifier> for ResolvedResource {
    type Error = ConfigError;

    fn try_from(id: &ResourceIdentifier) -> Result<Self> {
        let (backend, prefix) = match id.service.as_str() {
            SECRETS_MANAGER_SERVICE => (BackendKind::SecretsManager, SECRET_PREFIX),
            PARAMETER_STORE_SERVICE => (BackendKind::ParameterStore, PARAMETER_PREFIX),
            other => {
                return Err(ConfigError::UnsupportedBackend {
                    service: other.to_string(),
                });
            }
        };

        let name = id.resource.strip_prefix(prefix).unwrap_or(&id.resource);
        Ok(Self {
            backend,
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_secret() {
        let resolved = resolve("arn:aws:secretsmanager:::secret:test/animal/secrets.yaml").unwrap();
        assert_eq!(resolved.backend, BackendKind::SecretsManager);
        assert_eq!(resolved.name, "test/animal/secrets.yaml");
    }

    #[test]
    fn test_resolve_secret_keeps_inner_colons() {
        let resolved = resolve("arn:aws:secretsmanager:us-east-1:1:secret:a:b.json").unwrap();
        assert_eq!(resolved.name, "a:b.json");
    }

    #[test]
    fn test_resolve_parameter_keeps_leading_slash() {
        let resolved = resolve("arn:aws:ssm:::parameter/test/animal/config.yaml").unwrap();
        assert_eq!(resolved.backend, BackendKind::ParameterStore);
        assert_eq!(resolved.name, "/test/animal/config.yaml");
    }

    #[test]
    fn test_resolve_without_prefix_passes_resource_through() {
        let resolved = resolve("arn:aws:secretsmanager:::plain-name").unwrap();
        assert_eq!(resolved.name, "plain-name");
    }

    #[test]
    fn test_resolve_unsupported() {
        let err = resolve("arn:aws:s3:::bucket/config.yaml").unwrap_err();
        match err {
            ConfigError::UnsupportedBackend { service } => assert_eq!(service, "s3"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_resolve_malformed() {
        assert!(matches!(
            resolve("arn:aws:ssm"),
            Err(ConfigError::MalformedIdentifier { .. })
        ));
    }
}
