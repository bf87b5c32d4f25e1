use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{PublishVersionError, Result};

/// The part of a local `package.json` that publishing cares about.
///
/// Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Manifest {
    pub name: String,
    pub version: String,
}

/// Reads and validates the package manifest at `path`.
///
/// # Errors
/// * `Configuration` - if the file is missing, unreadable, not valid JSON, or
///   lacks a non-empty `name` or `version`
pub fn read_manifest(path: &Path) -> Result<Manifest> {
    let contents = fs::read_to_string(path).map_err(|e| {
        PublishVersionError::configuration(format!(
            "Could not read package manifest from {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_manifest(&contents).map_err(|e| match e {
        PublishVersionError::Configuration(msg) => PublishVersionError::configuration(format!(
            "Invalid package manifest {}: {}",
            path.display(),
            msg
        )),
        other => other,
    })
}

/// Parses manifest JSON text.
pub fn parse_manifest(contents: &str) -> Result<Manifest> {
    let manifest: Manifest = serde_json::from_str(contents)
        .map_err(|e| PublishVersionError::configuration(e.to_string()))?;

    if manifest.name.trim().is_empty() {
        return Err(PublishVersionError::configuration("\"name\" is empty"));
    }
    if manifest.version.trim().is_empty() {
        return Err(PublishVersionError::configuration("\"version\" is empty"));
    }

    Ok(manifest)
}
