use super::version::{ReportedVersion, ResolvedVersion};
use std::fmt;

/// Outcome of the publish gate for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishDecision {
    /// Nothing with this version exists in the index; build and upload
    Proceed(ResolvedVersion),
    /// The index already serves this version; do not rebuild
    SkipAlreadyPublished(ResolvedVersion),
    /// Untagged build of a non-development version
    FailInvalidVersion(ReportedVersion),
}

impl PublishDecision {
    /// The resolved version, when resolution succeeded
    pub fn resolved(&self) -> Option<&ResolvedVersion> {
        match self {
            PublishDecision::Proceed(v) | PublishDecision::SkipAlreadyPublished(v) => Some(v),
            PublishDecision::FailInvalidVersion(_) => None,
        }
    }
}

impl fmt::Display for PublishDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishDecision::Proceed(v) => write!(f, "{} is not published yet", v),
            PublishDecision::SkipAlreadyPublished(v) => {
                write!(f, "{} has already been released. Skipping.", v)
            }
            PublishDecision::FailInvalidVersion(v) => {
                write!(f, "Refusing to publish. {} is not a development version", v)
            }
        }
    }
}
