use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::ResolvedVersion;

/// Phases of the publish workflow that run configured commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepKind {
    Build,
    Upload,
    InstallExisting,
}

impl StepKind {
    /// Get the step name as a string
    pub fn name(&self) -> &'static str {
        match self {
            StepKind::Build => "build",
            StepKind::Upload => "upload",
            StepKind::InstallExisting => "install-existing",
        }
    }
}

/// Context information passed to a step
#[derive(Debug, Clone)]
pub struct StepContext {
    pub kind: StepKind,
    /// Version being published or installed
    pub version: String,
    /// Version as reported by the status endpoint
    pub reported_version: String,
    /// Package name in the index
    pub package: String,
    /// Whether HEAD carries the release tag
    pub release: bool,
}

impl StepContext {
    pub fn new(kind: StepKind, resolved: &ResolvedVersion, package: &str) -> Self {
        StepContext {
            kind,
            version: resolved.version.clone(),
            reported_version: resolved.reported.as_str().to_string(),
            package: package.to_string(),
            release: resolved.is_release(),
        }
    }

    /// Maps context fields to PUBLISH_GATE_* environment variables
    pub fn to_env_vars(&self) -> HashMap<String, String> {
        let mut env = HashMap::new();

        env.insert("PUBLISH_GATE_STEP".to_string(), self.kind.name().to_string());
        env.insert("PUBLISH_GATE_VERSION".to_string(), self.version.clone());
        env.insert(
            "PUBLISH_GATE_REPORTED_VERSION".to_string(),
            self.reported_version.clone(),
        );
        env.insert("PUBLISH_GATE_PACKAGE".to_string(), self.package.clone());
        env.insert("PUBLISH_GATE_RELEASE".to_string(), self.release.to_string());

        env
    }
}
