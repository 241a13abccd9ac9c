//! Configuration source trait.

use crate::ConfigMap;
use crate::error::Result;
use async_trait::async_trait;

/// Trait for configuration sources.
///
/// A source produces one fresh configuration map per load. Sources carry no
/// priority: the order they are given in decides which one wins.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    /// Load configuration as a key-value map.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read or parsed.
    async fn load(&self) -> Result<ConfigMap>;

    /// Get a human-readable name for this source (for logging/debugging).
    fn name(&self) -> String;
}
