//! Shared test fixtures.

#![allow(dead_code)]

use async_trait::async_trait;
use hiss::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// In-memory secrets and parameters.
#[derive(Default)]
pub struct StaticFetcher {
    secrets: HashMap<String, String>,
    parameters: HashMap<String, String>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_secret(mut self, name: &str, value: &str) -> Self {
        self.secrets.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_parameter(mut self, name: &str, value: &str) -> Self {
        self.parameters.insert(name.to_string(), value.to_string());
        self
    }
}

#[async_trait]
impl RawFetcher for StaticFetcher {
    async fn fetch_secret(&self, name: &str) -> std::result::Result<String, FetchError> {
        self.secrets
            .get(name)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(format!("secret {}", name)))
    }

    async fn fetch_parameter(&self, name: &str) -> std::result::Result<String, FetchError> {
        self.parameters
            .get(name)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(format!("parameter {}", name)))
    }
}

/// Write `contents` to `dir/name` and return the path as a source string.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path.to_str().unwrap().to_string()
}
