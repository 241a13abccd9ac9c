//! AWS implementation of the backend collaborators.
//!
//! Secrets come from Secrets Manager, parameters from SSM Parameter Store and
//! table items from DynamoDB. Credentials and region are discovered from the
//! ambient environment unless [`AwsOptions`] overrides them.

mod error;
mod item;

use super::{Item, ItemStore, RawFetcher};
use crate::error::FetchError;
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use error::classify;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};
use tokio::sync::OnceCell;

pub use item::{attribute_map_to_item, item_to_attribute_map};

/// Overrides applied when building AWS clients.
///
/// Unset fields fall back to ambient discovery (environment variables,
/// shared config files, instance metadata).
///
/// # Examples
///
/// ```rust
/// use hiss::backend::aws::AwsOptions;
///
/// // Local DynamoDB
/// let options = AwsOptions::new()
///     .with_endpoint("http://localhost:8000")
///     .with_region("us-east-1");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AwsOptions {
    /// Base endpoint URL for every client, e.g. a local emulator
    pub endpoint_url: Option<String>,
    /// Region to use instead of the discovered one
    pub region: Option<String>,
}

impl AwsOptions {
    /// Options with no overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the endpoint URL.
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint_url = Some(url.into());
        self
    }

    /// Override the region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }
}

static SHARED: LazyLock<Mutex<HashMap<AwsOptions, Arc<AwsBackend>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// AWS-backed [`RawFetcher`] and [`ItemStore`].
///
/// The SDK config and each service client are built on first use and reused
/// for the lifetime of the backend.
#[derive(Debug)]
pub struct AwsBackend {
    options: AwsOptions,
    sdk_config: OnceCell<SdkConfig>,
    secrets: OnceCell<aws_sdk_secretsmanager::Client>,
    parameters: OnceCell<aws_sdk_ssm::Client>,
    tables: OnceCell<aws_sdk_dynamodb::Client>,
}

impl AwsBackend {
    /// Create a backend that owns its own clients.
    ///
    /// Prefer [`AwsBackend::shared`] unless isolation is needed.
    pub fn new(options: AwsOptions) -> Self {
        Self {
            options,
            sdk_config: OnceCell::new(),
            secrets: OnceCell::new(),
            parameters: OnceCell::new(),
            tables: OnceCell::new(),
        }
    }

    /// Get the process-wide backend for `options`.
    ///
    /// Equal options always yield the same handle, so client setup happens
    /// once per distinct endpoint/region combination.
    pub fn shared(options: &AwsOptions) -> Arc<Self> {
        let mut shared = SHARED.lock();
        let backend = shared
            .entry(options.clone())
            .or_insert_with(|| Arc::new(Self::new(options.clone())));
        Arc::clone(backend)
    }

    /// The overrides this backend was built with.
    pub fn options(&self) -> &AwsOptions {
        &self.options
    }

    async fn sdk_config(&self) -> &SdkConfig {
        self.sdk_config
            .get_or_init(|| async {
                let mut loader = aws_config::defaults(BehaviorVersion::latest());
                if let Some(region) = &self.options.region {
                    loader = loader.region(Region::new(region.clone()));
                }
                tracing::debug!(
                    region = ?self.options.region,
                    endpoint = ?self.options.endpoint_url,
                    "loading AWS SDK config"
                );
                loader.load().await
            })
            .await
    }

    async fn secrets(&self) -> &aws_sdk_secretsmanager::Client {
        self.secrets
            .get_or_init(|| async {
                let mut builder = aws_sdk_secretsmanager::config::Builder::from(self.sdk_config().await);
                if let Some(url) = &self.options.endpoint_url {
                    builder = builder.endpoint_url(url);
                }
                aws_sdk_secretsmanager::Client::from_conf(builder.build())
            })
            .await
    }

    async fn parameters(&self) -> &aws_sdk_ssm::Client {
        self.parameters
            .get_or_init(|| async {
                let mut builder = aws_sdk_ssm::config::Builder::from(self.sdk_config().await);
                if let Some(url) = &self.options.endpoint_url {
                    builder = builder.endpoint_url(url);
                }
                aws_sdk_ssm::Client::from_conf(builder.build())
            })
            .await
    }

    async fn tables(&self) -> &aws_sdk_dynamodb::Client {
        self.tables
            .get_or_init(|| async {
                let mut builder = aws_sdk_dynamodb::config::Builder::from(self.sdk_config().await);
                if let Some(url) = &self.options.endpoint_url {
                    builder = builder.endpoint_url(url);
                }
                aws_sdk_dynamodb::Client::from_conf(builder.build())
            })
            .await
    }
}

#[async_trait]
impl RawFetcher for AwsBackend {
    async fn fetch_secret(&self, name: &str) -> Result<String, FetchError> {
        let output = self
            .secrets()
            .await
            .get_secret_value()
            .secret_id(name)
            .send()
            .await
            .map_err(|e| classify(e, |e| e.is_resource_not_found_exception()))?;

        if let Some(value) = output.secret_string() {
            return Ok(value.to_string());
        }

        // Binary secrets are accepted when they hold UTF-8 text.
        match output.secret_binary() {
            Some(blob) => String::from_utf8(blob.as_ref().to_vec())
                .map_err(|_| FetchError::Other(format!("secret '{}' is not UTF-8 text", name))),
            None => Err(FetchError::NotFound(format!("secret '{}' has no value", name))),
        }
    }

    async fn fetch_parameter(&self, name: &str) -> Result<String, FetchError> {
        let output = self
            .parameters()
            .await
            .get_parameter()
            .name(name)
            .with_decryption(true)
            .send()
            .await
            .map_err(|e| {
                classify(e, |e| {
                    e.is_parameter_not_found() || e.is_parameter_version_not_found()
                })
            })?;

        output
            .parameter()
            .and_then(|parameter| parameter.value())
            .map(str::to_string)
            .ok_or_else(|| FetchError::NotFound(format!("parameter '{}' has no value", name)))
    }
}

#[async_trait]
impl ItemStore for AwsBackend {
    async fn get_item(&self, table: &str, key: &Item) -> Result<Item, FetchError> {
        let key = item_to_attribute_map(key);
        let output = self
            .tables()
            .await
            .get_item()
            .table_name(table)
            .set_key(Some(key))
            .send()
            .await
            .map_err(|e| classify(e, |e| e.is_resource_not_found_exception()))?;

        let attributes = output
            .item()
            .ok_or_else(|| FetchError::NotFound(format!("no item in table '{}'", table)))?;
        attribute_map_to_item(attributes).map_err(|e| FetchError::Other(e.to_string()))
    }

    async fn put_item(&self, table: &str, item: &Item) -> Result<(), FetchError> {
        self.tables()
            .await
            .put_item()
            .table_name(table)
            .set_item(Some(item_to_attribute_map(item)))
            .send()
            .await
            .map_err(|e| classify(e, |e| e.is_resource_not_found_exception()))?;
        Ok(())
    }
}
