//! Main workflow orchestration logic
//!
//! Reads the local manifest, looks up the published version once, and
//! reconciles the two. Kept separate from `main.rs` so it can be driven
//! programmatically with any [RegistryClient].

use std::path::PathBuf;

use tracing::info;

use crate::error::Result;
use crate::manifest::read_manifest;
use crate::reconcile::{decide, ReconciliationOutcome};
use crate::registry::RegistryClient;
use crate::ui;

/// Arguments for the publish-version workflow
///
/// Mirrors the CLI Args without depending on clap.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowArgs {
    /// Directory containing the package
    pub project_dir: PathBuf,

    /// Manifest path, relative to `project_dir` unless absolute
    pub manifest_path: PathBuf,
}

impl Default for WorkflowArgs {
    fn default() -> Self {
        WorkflowArgs {
            project_dir: PathBuf::from("."),
            manifest_path: PathBuf::from("package.json"),
        }
    }
}

impl WorkflowArgs {
    /// Resolved location of the manifest file
    pub fn manifest_location(&self) -> PathBuf {
        self.project_dir.join(&self.manifest_path)
    }
}

/// Result of a successful workflow run
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// Package name from the manifest
    pub package: String,

    /// Version declared by the manifest
    pub local_version: String,

    /// Registry's `latest` dist-tag
    pub published_version: String,

    pub outcome: ReconciliationOutcome,
}

/// Runs the reconciliation workflow:
/// 1. Read the manifest (fails before any fetch)
/// 2. Fetch the package document once
/// 3. Resolve the `latest` dist-tag
/// 4. Decide between the local version and a patch bump
///
/// # Errors
/// * `Configuration` - manifest missing or invalid
/// * `Network` - registry fetch failed
/// * `Data` - no `latest` dist-tag
/// * `Parse` - malformed version on either side
pub fn run_workflow(args: &WorkflowArgs, registry: &dyn RegistryClient) -> Result<WorkflowResult> {
    let manifest = read_manifest(&args.manifest_location())?;

    ui::display_status(&format!(
        "Fetching current package information for [{}]",
        manifest.name
    ));
    let document = registry.fetch_package(&manifest.name)?;
    let published_version = document.latest_version()?.to_string();
    ui::display_status(&format!(
        "Published package version for [{}] is [{}]",
        manifest.name, published_version
    ));

    let outcome = decide(&manifest.version, &published_version)?;
    ui::display_outcome(&outcome);
    info!(package = %manifest.name, outcome = %outcome, "reconciled version");

    Ok(WorkflowResult {
        package: manifest.name,
        local_version: manifest.version,
        published_version,
        outcome,
    })
}
