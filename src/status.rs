//! Reported component version lookup.
//!
//! The plugin's status endpoint lists every installed component:
//!
//! ```json
//! {"versions": [{"component": "core", "version": "3.21.0"},
//!               {"component": "ansible", "version": "0.7.0.dev"}]}
//! ```

use serde::Deserialize;
use std::time::Duration;

use crate::config::StatusConfig;
use crate::domain::ReportedVersion;
use crate::error::{GateError, Result};

/// Anything that can report the version the gate should publish
pub trait VersionSource {
    fn reported_version(&self) -> Result<ReportedVersion>;
}

#[derive(Debug, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub versions: Vec<ComponentVersion>,
}

#[derive(Debug, Deserialize)]
pub struct ComponentVersion {
    pub component: String,
    pub version: String,
}

/// First entry matching any of `components`, honouring their order.
pub fn find_component_version(
    status: &StatusResponse,
    components: &[String],
) -> Result<ReportedVersion> {
    for wanted in components {
        if let Some(entry) = status.versions.iter().find(|v| &v.component == wanted) {
            return ReportedVersion::parse(&entry.version);
        }
    }

    let available: Vec<&str> = status
        .versions
        .iter()
        .map(|v| v.component.as_str())
        .collect();
    Err(GateError::status(format!(
        "None of [{}] found in status response (available: [{}])",
        components.join(", "),
        available.join(", ")
    )))
}

/// Queries the status endpoint over HTTP
pub struct StatusClient {
    client: reqwest::blocking::Client,
    url: String,
    components: Vec<String>,
}

impl StatusClient {
    pub fn new(config: &StatusConfig, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(format!("publish-gate/{}", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(StatusClient {
            client,
            url: config.url.clone(),
            components: config.components.clone(),
        })
    }
}

impl VersionSource for StatusClient {
    fn reported_version(&self) -> Result<ReportedVersion> {
        log::info!("Querying status endpoint {}", self.url);

        let response = self.client.get(&self.url).send()?;
        if !response.status().is_success() {
            return Err(GateError::status(format!(
                "{} returned HTTP {}",
                self.url,
                response.status()
            )));
        }

        let body = response.text()?;
        let status: StatusResponse = serde_json::from_str(&body)
            .map_err(|e| GateError::status(format!("Cannot parse status response: {}", e)))?;
        let version = find_component_version(&status, &self.components)?;
        log::info!("Reported version: {}", version);
        Ok(version)
    }
}

/// A version given up front, e.g. on the command line
pub struct StaticVersion(pub String);

impl VersionSource for StaticVersion {
    fn reported_version(&self) -> Result<ReportedVersion> {
        ReportedVersion::parse(&self.0)
    }
}
