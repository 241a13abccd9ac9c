//! Backend collaborators: raw value fetching and table item access.
//!
//! The traits here are the seams between the merge engine and the network.
//! [`aws::AwsBackend`] implements both against the AWS SDK; tests and callers
//! with other transports can supply their own implementations.

#[cfg(feature = "aws")]
pub mod aws;

use crate::error::{ConfigError, FetchError, Result};
use crate::resource::{BackendKind, ResolvedResource};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value as JsonValue;

/// A table key or item, as JSON.
pub type Item = serde_json::Map<String, JsonValue>;

/// Fetches the raw string value of a secret or parameter.
#[async_trait]
pub trait RawFetcher: Send + Sync {
    /// Fetch a secret value by its secret ID.
    async fn fetch_secret(&self, name: &str) -> std::result::Result<String, FetchError>;

    /// Fetch a parameter value by its name.
    async fn fetch_parameter(&self, name: &str) -> std::result::Result<String, FetchError>;
}

/// Reads and writes single items of a key-value table.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Get the item stored under `key`.
    ///
    /// A missing item is [`FetchError::NotFound`].
    async fn get_item(&self, table: &str, key: &Item) -> std::result::Result<Item, FetchError>;

    /// Write `item`, replacing any item with the same key.
    async fn put_item(&self, table: &str, item: &Item) -> std::result::Result<(), FetchError>;
}

/// Fetch the raw text of a resolved resource from the matching backend.
///
/// # Errors
///
/// Returns [`ConfigError::BackendFetchFailed`] wrapping the fetcher's error.
pub async fn fetch_resolved(fetcher: &dyn RawFetcher, resolved: &ResolvedResource) -> Result<String> {
    let fetched = match resolved.backend {
        BackendKind::SecretsManager => fetcher.fetch_secret(&resolved.name).await,
        BackendKind::ParameterStore => fetcher.fetch_parameter(&resolved.name).await,
    };

    fetched.map_err(|source| ConfigError::BackendFetchFailed {
        resource: resolved.name.clone(),
        source,
    })
}

/// Get an item from `table`.
///
/// # Errors
///
/// Returns [`ConfigError::BackendFetchFailed`] if the item is missing or the
/// call fails.
pub async fn get_item(store: &dyn ItemStore, table: &str, key: &Item) -> Result<Item> {
    store
        .get_item(table, key)
        .await
        .map_err(|source| ConfigError::BackendFetchFailed {
            resource: table.to_string(),
            source,
        })
}

/// Serialize `value` and write it to `table`.
///
/// # Errors
///
/// - [`ConfigError::InvalidItem`] if `value` does not serialize to an object
/// - [`ConfigError::BackendFetchFailed`] if the write fails
pub async fn put_serializable<T>(store: &dyn ItemStore, table: &str, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
{
    let item = match serde_json::to_value(value) {
        Ok(JsonValue::Object(item)) => item,
        Ok(other) => {
            return Err(ConfigError::InvalidItem(format!(
                "expected an object, got {}",
                other
            )));
        }
        Err(e) => return Err(ConfigError::InvalidItem(e.to_string())),
    };

    store
        .put_item(table, &item)
        .await
        .map_err(|source| ConfigError::BackendFetchFailed {
            resource: table.to_string(),
            source,
        })
}
