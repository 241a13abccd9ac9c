//! ARN parsing.

use crate::error::{ConfigError, Result};
use std::fmt;
use std::str::FromStr;

const ARN_PREFIX: &str = "arn:";
const SECTIONS: usize = 6;

/// A parsed resource identifier of the form
/// `arn:<partition>:<service>:<region>:<account>:<resource>`.
///
/// Every section except the prefix may be empty. The resource section keeps
/// any further `:` characters.
///
/// # Examples
///
/// ```rust
/// use hiss::resource::ResourceIdentifier;
///
/// let id: ResourceIdentifier = "arn:aws:secretsmanager:::secret:test/animal/secrets.yaml"
///     .parse()
///     .unwrap();
/// assert_eq!(id.service, "secretsmanager");
/// assert_eq!(id.resource, "secret:test/animal/secrets.yaml");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceIdentifier {
    /// Partition, usually `aws`
    pub partition: String,
    /// Service namespace, e.g. `secretsmanager` or `ssm`
    pub service: String,
    /// Region, may be empty
    pub region: String,
    /// Account ID, may be empty
    pub account_id: String,
    /// Service-relative resource path
    pub resource: String,
}

impl ResourceIdentifier {
    /// Parse an identifier string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MalformedIdentifier`] if the string does not
    /// start with `arn:` or has fewer than six sections.
    pub fn parse(identifier: &str) -> Result<Self> {
        if !identifier.starts_with(ARN_PREFIX) {
            return Err(malformed(identifier, "invalid prefix"));
        }

        let sections: Vec<&str> = identifier.splitn(SECTIONS, ':').collect();
        if sections.len() != SECTIONS {
            return Err(malformed(identifier, "not enough sections"));
        }

        Ok(Self {
            partition: sections[1].to_string(),
            service: sections[2].to_string(),
            region: sections[3].to_string(),
            account_id: sections[4].to_string(),
            resource: sections[5].to_string(),
        })
    }
}

impl FromStr for ResourceIdentifier {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ResourceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "arn:{}:{}:{}:{}:{}",
            self.partition, self.service, self.region, self.account_id, self.resource
        )
    }
}

/// Whether `source` looks like a resource identifier rather than a file path.
///
/// This is the cheap pre-check used to route a source; a string that passes
/// it always parses with [`ResourceIdentifier::parse`].
pub fn is_resource_identifier(source: &str) -> bool {
    source.starts_with(ARN_PREFIX) && source.matches(':').count() >= SECTIONS - 1
}

fn malformed(identifier: &str, reason: &'static str) -> ConfigError {
    ConfigError::MalformedIdentifier {
        identifier: identifier.to_string(),
        reason,
    }
}
