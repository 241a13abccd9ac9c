//! # hiss
//!
//! Merge configuration from local files and AWS-resident secrets and
//! parameters into one settings object.
//!
//! ## Overview
//!
//! Each source is a string. A resource identifier picks a remote backend:
//! - `arn:aws:secretsmanager:<region>:<account>:secret:<name>` reads a Secrets Manager secret
//! - `arn:aws:ssm:<region>:<account>:parameter<name>` reads an SSM parameter
//!
//! Anything else is a local file path. The extension at the end of the
//! identifier or path (`.yaml`, `.yml`, `.json`, `.toml`) picks the parser.
//! Sources are merged in the order given, later sources overriding earlier
//! ones key by key at every nesting level.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hiss::prelude::*;
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! struct Animal {
//!     sound: String,
//!     foot: u32,
//! }
//!
//! #[derive(Debug, Deserialize)]
//! struct Zoo {
//!     snake: Animal,
//!     cat: Animal,
//! }
//!
//! # async fn example() -> hiss::error::Result<()> {
//! let mut hiss = Hiss::builder().build();
//! hiss.read_in_sources(&[
//!     "./cfg-base.yaml",
//!     "arn:aws:secretsmanager:::secret:test/animal/secrets.yaml",
//! ])
//! .await?;
//!
//! let zoo: Zoo = hiss.unmarshal()?;
//! println!("the snake says {}", zoo.snake.sound);
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `aws` (default): Secrets Manager, SSM and DynamoDB backends. Without it,
//!   identifier sources need a fetcher supplied through
//!   [`core::HissBuilder::with_fetcher`].

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod backend;
pub mod core;
pub mod error;
pub mod resource;
pub mod sources;

/// One source's parsed settings, or the merged result of several.
pub type ConfigMap = config::Map<String, config::Value>;

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::ConfigMap;
    pub use crate::backend::RawFetcher;
    pub use crate::core::{Hiss, HissBuilder};
    pub use crate::error::{ConfigError, FetchError, Result};

    #[cfg(feature = "aws")]
    pub use crate::backend::aws::{AwsBackend, AwsOptions};
}
