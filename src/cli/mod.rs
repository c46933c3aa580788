pub mod orchestration;

pub use orchestration::{CheckResult, PublishWorkflowArgs};
