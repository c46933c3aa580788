//! Package index idempotency checks
//!
//! A version counts as published when the index answers its per-version
//! page with a success status. Supported layouts:
//!
//! - `pypi`: `https://pypi.org/project/{package}/{version}/`
//! - `rubygems`: `https://rubygems.org/gems/{package}/versions/{version}`
//! - `custom`: any URL template with `{package}` and `{version}`

pub mod http;
pub mod mock;

pub use http::HttpIndex;
pub use mock::MockIndex;

use crate::config::{IndexConfig, IndexKind};
use crate::error::{GateError, Result};

/// Default host for PyPI
pub const PYPI_BASE_URL: &str = "https://pypi.org";

/// Default host for RubyGems
pub const RUBYGEMS_BASE_URL: &str = "https://rubygems.org";

/// Query side of a package index
pub trait PackageIndex {
    /// Package name the index is queried for
    fn package(&self) -> &str;

    /// Whether an artifact for `version` already exists
    fn is_published(&self, version: &str) -> Result<bool>;
}

/// Build the per-version URL for the configured index
pub fn version_url(config: &IndexConfig, version: &str) -> Result<String> {
    let url = match config.kind {
        IndexKind::Pypi => {
            let base = config.base_url.as_deref().unwrap_or(PYPI_BASE_URL);
            format!(
                "{}/project/{}/{}/",
                base.trim_end_matches('/'),
                config.package,
                version
            )
        }
        IndexKind::Rubygems => {
            let base = config.base_url.as_deref().unwrap_or(RUBYGEMS_BASE_URL);
            format!(
                "{}/gems/{}/versions/{}",
                base.trim_end_matches('/'),
                config.package,
                version
            )
        }
        IndexKind::Custom => {
            let template = config.url_template.as_deref().ok_or_else(|| {
                GateError::config("[index] url_template is required when kind = \"custom\"")
            })?;
            template
                .replace("{package}", &config.package)
                .replace("{version}", version)
        }
    };
    Ok(url)
}
