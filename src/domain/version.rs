use crate::clock::Clock;
use crate::error::{GateError, Result};
use std::fmt;

/// Version string as reported by the plugin's status endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportedVersion(String);

impl ReportedVersion {
    /// Wrap a reported version, rejecting blank input
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(GateError::invalid_version("reported version is empty"));
        }
        Ok(ReportedVersion(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the version carries the development marker (e.g. ".dev", ".dev0")
    pub fn is_development(&self, dev_marker: &str) -> bool {
        self.0.contains(dev_marker)
    }
}

impl fmt::Display for ReportedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a resolved version was derived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildKind {
    /// HEAD carries the release tag; the reported version is used as-is
    Release,
    /// Untagged build; the reported version gets an epoch suffix
    Development,
}

/// The version that will be checked against the index and published
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersion {
    pub version: String,
    pub reported: ReportedVersion,
    pub kind: BuildKind,
}

impl ResolvedVersion {
    pub fn is_release(&self) -> bool {
        self.kind == BuildKind::Release
    }
}

impl fmt::Display for ResolvedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.version)
    }
}

/// Resolve the publishable version for the current build.
///
/// - Exact tag match: the reported version is returned unchanged.
/// - No tag match: the reported version must contain `dev_marker`, and the
///   result is the reported version followed by the clock's epoch seconds,
///   e.g. `1.2.3.dev` becomes `1.2.3.dev1700000000`.
///
/// # Errors
/// [GateError::InvalidVersion] when there is no tag match and the reported
/// version is not a development version.
pub fn resolve_version(
    reported: &ReportedVersion,
    tag_match: bool,
    dev_marker: &str,
    clock: &dyn Clock,
) -> Result<ResolvedVersion> {
    if tag_match {
        return Ok(ResolvedVersion {
            version: reported.as_str().to_string(),
            reported: reported.clone(),
            kind: BuildKind::Release,
        });
    }

    if !reported.is_development(dev_marker) {
        return Err(GateError::invalid_version(format!(
            "Refusing to publish. {} does not contain '{}' and HEAD is not tagged with it",
            reported, dev_marker
        )));
    }

    let epoch = clock.epoch_seconds();
    Ok(ResolvedVersion {
        version: format!("{}{}", reported, epoch),
        reported: reported.clone(),
        kind: BuildKind::Development,
    })
}
