use reqwest::StatusCode;
use std::time::Duration;

use crate::config::IndexConfig;
use crate::error::{GateError, Result};

use super::{version_url, PackageIndex};

/// Package index reached over HTTP
pub struct HttpIndex {
    client: reqwest::blocking::Client,
    config: IndexConfig,
}

impl HttpIndex {
    pub fn new(config: &IndexConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(format!("publish-gate/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(HttpIndex {
            client,
            config: config.clone(),
        })
    }
}

impl PackageIndex for HttpIndex {
    fn package(&self) -> &str {
        &self.config.package
    }

    fn is_published(&self, version: &str) -> Result<bool> {
        let url = version_url(&self.config, version)?;
        log::info!("Checking {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| GateError::index(format!("Cannot query {}: {}", url, e)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(true);
        }
        if status != StatusCode::NOT_FOUND {
            log::warn!("{} answered HTTP {}, treating as not published", url, status);
        }
        Ok(false)
    }
}
