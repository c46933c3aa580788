//! Terminal output for the CLI.

use console::style;

use crate::domain::PublishDecision;
use crate::gate::{GateOutcome, PlannedStep};

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// One line summary of a gate decision.
pub fn format_decision(decision: &PublishDecision) -> String {
    match decision {
        PublishDecision::Proceed(v) => {
            let kind = if v.is_release() { "release" } else { "development" };
            format!("Publishing {} build {}", kind, v)
        }
        other => other.to_string(),
    }
}

/// Render a step list, e.g. `  1. [build] make dist`.
pub fn format_steps(steps: &[PlannedStep]) -> Vec<String> {
    steps
        .iter()
        .enumerate()
        .map(|(i, step)| format!("  {}. [{}] {}", i + 1, step.kind.name(), step.command))
        .collect()
}

pub fn display_outcome(outcome: &GateOutcome) {
    let summary = format_decision(&outcome.decision);
    if let PublishDecision::SkipAlreadyPublished(_) = outcome.decision {
        display_success(&summary);
    } else {
        display_status(&summary);
    }

    if outcome.steps.is_empty() {
        return;
    }

    if outcome.dry_run {
        println!("\n{}", style("Dry run, steps not executed:").bold());
    } else {
        println!("\n{}", style("Steps executed:").bold());
    }
    for line in format_steps(&outcome.steps) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BuildKind, ReportedVersion, ResolvedVersion};
    use crate::steps::StepKind;

    #[test]
    fn test_format_development_decision() {
        let decision = PublishDecision::Proceed(ResolvedVersion {
            version: "1.0.0.dev5".to_string(),
            reported: ReportedVersion::parse("1.0.0.dev").unwrap(),
            kind: BuildKind::Development,
        });
        assert_eq!(
            format_decision(&decision),
            "Publishing development build 1.0.0.dev5"
        );
    }

    #[test]
    fn test_format_steps_numbered() {
        let steps = vec![
            PlannedStep {
                kind: StepKind::Build,
                command: "make dist".to_string(),
            },
            PlannedStep {
                kind: StepKind::Upload,
                command: "twine upload dist/*".to_string(),
            },
        ];
        assert_eq!(
            format_steps(&steps),
            vec![
                "  1. [build] make dist".to_string(),
                "  2. [upload] twine upload dist/*".to_string()
            ]
        );
    }
}
