//! Domain logic - pure release rules independent of git, HTTP and shell

pub mod decision;
pub mod tag;
pub mod version;

pub use decision::PublishDecision;
pub use tag::TagPattern;
pub use version::{resolve_version, BuildKind, ReportedVersion, ResolvedVersion};
