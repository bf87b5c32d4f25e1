use crate::error::{PublishVersionError, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// Strict three-component numeric version, no leading zeros.
const VERSION_PATTERN: &str = r"^(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)$";

/// Semantic version representation (major.minor.patch only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

/// Split a version string into its validated raw digit components.
///
/// The components are returned as written so that callers working on the
/// textual form (the encoder) see exactly what the manifest or registry
/// reported.
pub fn split_components(version: &str) -> Result<[&str; 3]> {
    let re = Regex::new(VERSION_PATTERN)
        .map_err(|e| PublishVersionError::parse(format!("Invalid version pattern: {}", e)))?;

    let captures = re.captures(version).ok_or_else(|| {
        PublishVersionError::parse(format!(
            "Invalid version format: '{}' - expected MAJOR.MINOR.PATCH",
            version
        ))
    })?;

    match (captures.get(1), captures.get(2), captures.get(3)) {
        (Some(major), Some(minor), Some(patch)) => {
            Ok([major.as_str(), minor.as_str(), patch.as_str()])
        }
        _ => Err(PublishVersionError::parse(format!(
            "Invalid version format: '{}' - expected MAJOR.MINOR.PATCH",
            version
        ))),
    }
}

fn parse_component(name: &str, raw: &str) -> Result<u64> {
    raw.parse::<u64>()
        .map_err(|_| PublishVersionError::parse(format!("Invalid {} version: {}", name, raw)))
}

impl SemanticVersion {
    /// Create a new version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        SemanticVersion {
            major,
            minor,
            patch,
        }
    }

    /// Parse a version string such as "1.2.3"
    pub fn parse(version: &str) -> Result<Self> {
        let [major, minor, patch] = split_components(version)?;

        Ok(SemanticVersion {
            major: parse_component("major", major)?,
            minor: parse_component("minor", minor)?,
            patch: parse_component("patch", patch)?,
        })
    }

    /// Increment the patch component, keeping major and minor unchanged
    pub fn bump_patch(&self) -> Result<Self> {
        let patch = self.patch.checked_add(1).ok_or_else(|| {
            PublishVersionError::parse(format!("Patch component overflows when bumping {}", self))
        })?;

        Ok(SemanticVersion {
            major: self.major,
            minor: self.minor,
            patch,
        })
    }
}

impl FromStr for SemanticVersion {
    type Err = PublishVersionError;

    fn from_str(s: &str) -> Result<Self> {
        SemanticVersion::parse(s)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
