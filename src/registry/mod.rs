//! Registry access layer
//!
//! This module provides a trait-based abstraction over the package registry,
//! so the publish workflow can run against a real HTTP registry or an
//! in-memory one in tests.
//!
//! - [http::HttpRegistry]: blocking HTTP client for npm-compatible registries
//! - [mock::MockRegistry]: in-memory implementation for testing
//!
//! ```rust
//! # use publish_version::registry::{MockRegistry, RegistryClient};
//! let registry = MockRegistry::new().with_latest("core-ui", "1.0.2");
//! let document = registry.fetch_package("core-ui").unwrap();
//! assert_eq!(document.latest_version().unwrap(), "1.0.2");
//! ```

pub mod http;
pub mod mock;

pub use http::HttpRegistry;
pub use mock::MockRegistry;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;

use crate::error::{PublishVersionError, Result};

/// The dist-tag naming the currently recommended release.
pub const LATEST_TAG: &str = "latest";

/// Package document as returned by `GET {registry}/{package}`.
///
/// Only the fields the workflow reads are modelled.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PackageDocument {
    #[serde(rename = "dist-tags", default, deserialize_with = "dist_tags_or_empty")]
    pub dist_tags: HashMap<String, Value>,

    #[serde(default)]
    pub error: Option<String>,
}

/// Reads `dist-tags`, treating `null` or any non-object value as no tags.
fn dist_tags_or_empty<'de, D>(
    deserializer: D,
) -> std::result::Result<HashMap<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(tags) => tags.into_iter().collect(),
        _ => HashMap::new(),
    })
}

impl PackageDocument {
    /// Document whose `latest` dist-tag points at `version`.
    pub fn with_latest(version: impl Into<String>) -> Self {
        let mut dist_tags = HashMap::new();
        dist_tags.insert(LATEST_TAG.to_string(), Value::String(version.into()));
        PackageDocument {
            dist_tags,
            error: None,
        }
    }

    /// Error reported by the registry in the body, if any.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref().filter(|msg| !msg.is_empty())
    }

    /// Resolves the `latest` dist-tag.
    ///
    /// # Errors
    /// * `Data` - if the tag is missing, empty, or not a string
    pub fn latest_version(&self) -> Result<&str> {
        self.dist_tags
            .get(LATEST_TAG)
            .and_then(Value::as_str)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                PublishVersionError::data(
                    "Failed to parse published package information: no \"latest\" dist-tag",
                )
            })
    }
}

/// Fetch capability for published package information.
///
/// Implementations perform exactly one lookup per call and surface every
/// transport or registry failure as an error; nothing is defaulted.
pub trait RegistryClient: Send + Sync {
    /// Fetch the package document for `package_name`.
    ///
    /// # Errors
    /// * `Network` - transport failure, non-JSON body, or an error reported by the registry
    fn fetch_package(&self, package_name: &str) -> Result<PackageDocument>;
}
