//! Configured shell steps run by the publish gate
//!
//! - build: produce the artifacts for the resolved version
//! - upload: push them to the package index
//! - install-existing: reuse the published artifact when the gate skips

pub mod executor;
pub mod lifecycle;

pub use executor::{RecordingRunner, ShellExecutor, StepRunner};
pub use lifecycle::{StepContext, StepKind};
