//! Pure formatting functions for console output.
//!
//! Progress and diagnostics go to stderr so that stdout carries nothing but
//! the version to publish.

use console::style;

use crate::reconcile::ReconciliationOutcome;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    eprintln!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{} {}", style("->").yellow(), message);
}

/// Human-readable summary of a reconciliation outcome.
pub fn format_outcome(outcome: &ReconciliationOutcome) -> String {
    match outcome {
        ReconciliationOutcome::PublishAsLocal(version) => {
            format!("Using local version [{}]", version)
        }
        ReconciliationOutcome::PublishBumped(version) => {
            format!("Bumping version to [{}]", version)
        }
    }
}

/// Display the decision taken for this run.
pub fn display_outcome(outcome: &ReconciliationOutcome) {
    display_success(&format_outcome(outcome));
}
