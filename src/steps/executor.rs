use crate::error::{GateError, Result};
use crate::steps::StepContext;
use std::process::Command;

/// Runs one configured step command
pub trait StepRunner {
    fn run(&self, command: &str, context: &StepContext) -> Result<()>;
}

/// Executes step command lines through `sh -c`
///
/// Output is inherited so build and upload logs land in the CI job log.
pub struct ShellExecutor;

impl StepRunner for ShellExecutor {
    fn run(&self, command: &str, context: &StepContext) -> Result<()> {
        log::info!("[{}] {}", context.kind.name(), command);

        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command);

        for (key, value) in context.to_env_vars() {
            cmd.env(key, value);
        }

        let status = cmd.status().map_err(|e| {
            GateError::step(format!("Failed to start '{}': {}", command, e))
        })?;

        if !status.success() {
            return Err(GateError::step(format!(
                "{} step '{}' failed with exit code {}",
                context.kind.name(),
                command,
                status.code().unwrap_or(-1)
            )));
        }

        Ok(())
    }
}

/// Step runner that records commands instead of executing them
///
/// Commands containing `fail_on` (if set) return a step error.
#[derive(Default)]
pub struct RecordingRunner {
    fail_on: Option<String>,
    calls: std::sync::Mutex<Vec<(String, String)>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(pattern: impl Into<String>) -> Self {
        RecordingRunner {
            fail_on: Some(pattern.into()),
            calls: Default::default(),
        }
    }

    /// `(step name, command)` pairs in execution order
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl StepRunner for RecordingRunner {
    fn run(&self, command: &str, context: &StepContext) -> Result<()> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((context.kind.name().to_string(), command.to_string()));
        }
        match &self.fail_on {
            Some(pattern) if command.contains(pattern.as_str()) => Err(GateError::step(format!(
                "{} step '{}' failed with exit code 1",
                context.kind.name(),
                command
            ))),
            _ => Ok(()),
        }
    }
}
