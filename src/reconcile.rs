//! Decide which version a CI run should publish.
//!
//! The local manifest version is published unchanged only when its encoding
//! is strictly greater than the published one. Otherwise the published
//! version's patch is bumped; any local major/minor advance is discarded.

use std::fmt;

use tracing::{debug, warn};

use crate::domain::{encode, SemanticVersion};
use crate::error::Result;

/// Result of reconciling the local and published versions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconciliationOutcome {
    /// Local version is ahead of the registry and can be published as-is
    PublishAsLocal(String),
    /// Local version collides with or trails the registry; publish this instead
    PublishBumped(String),
}

impl ReconciliationOutcome {
    /// The version that should be published
    pub fn version(&self) -> &str {
        match self {
            ReconciliationOutcome::PublishAsLocal(v) | ReconciliationOutcome::PublishBumped(v) => v,
        }
    }

    pub fn is_bump(&self) -> bool {
        matches!(self, ReconciliationOutcome::PublishBumped(_))
    }
}

impl fmt::Display for ReconciliationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReconciliationOutcome::PublishAsLocal(v) => write!(f, "publish local version {}", v),
            ReconciliationOutcome::PublishBumped(v) => write!(f, "publish bumped version {}", v),
        }
    }
}

/// Decides between the local version and a patch bump of the published one.
///
/// # Arguments
/// * `local_version` - Version declared by the local manifest
/// * `published_version` - Registry's `latest` dist-tag
///
/// # Returns
/// * `PublishAsLocal(local)` - if `encode(published) < encode(local)`
/// * `PublishBumped(published + patch)` - otherwise
///
/// # Errors
/// * `Parse` - if either side is not a strict `MAJOR.MINOR.PATCH` version
///
/// # Example
/// ```
/// use publish_version::reconcile::{decide, ReconciliationOutcome};
///
/// let outcome = decide("1.0.0", "1.2.5").unwrap();
/// assert_eq!(outcome, ReconciliationOutcome::PublishBumped("1.2.6".to_string()));
/// ```
pub fn decide(local_version: &str, published_version: &str) -> Result<ReconciliationOutcome> {
    let local = encode(local_version)?;
    let published = encode(published_version)?;
    debug!(
        local_version,
        published_version,
        local_encoded = %local,
        published_encoded = %published,
        "encoded versions"
    );

    if published < local {
        return Ok(ReconciliationOutcome::PublishAsLocal(local_version.to_string()));
    }

    let bumped = SemanticVersion::parse(published_version)?.bump_patch()?;

    if discards_local_advance(local_version, published_version)? {
        warn!(
            local_version,
            published_version,
            bumped = %bumped,
            "local version is semantically newer than the published one but is replaced by a patch bump"
        );
    }

    Ok(ReconciliationOutcome::PublishBumped(bumped.to_string()))
}

/// Returns true when a bump is triggered although the local version is
/// semantically greater than the published one.
///
/// This happens when component digit widths differ, e.g. local `1.10.0`
/// against published `1.2.0`: the encoding ranks `1.10.0` lower, so the run
/// publishes `1.2.1`.
pub fn discards_local_advance(local_version: &str, published_version: &str) -> Result<bool> {
    let bump_triggered = encode(published_version)? >= encode(local_version)?;
    let local_is_newer =
        SemanticVersion::parse(local_version)? > SemanticVersion::parse(published_version)?;
    Ok(bump_triggered && local_is_newer)
}
