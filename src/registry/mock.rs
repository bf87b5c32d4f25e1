use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{PublishVersionError, Result};
use crate::registry::{PackageDocument, RegistryClient};

/// Mock registry for testing without network access
pub struct MockRegistry {
    documents: HashMap<String, PackageDocument>,
    failures: HashMap<String, String>,
    fetches: AtomicUsize,
}

impl MockRegistry {
    /// Create a new empty mock registry
    pub fn new() -> Self {
        MockRegistry {
            documents: HashMap::new(),
            failures: HashMap::new(),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Publish `version` as the `latest` dist-tag of `package`
    pub fn with_latest(self, package: impl Into<String>, version: impl Into<String>) -> Self {
        self.with_document(package, PackageDocument::with_latest(version))
    }

    /// Serve an arbitrary document for `package`
    pub fn with_document(mut self, package: impl Into<String>, document: PackageDocument) -> Self {
        self.documents.insert(package.into(), document);
        self
    }

    /// Fail every fetch of `package` with a network error
    pub fn with_network_error(
        mut self,
        package: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.failures.insert(package.into(), message.into());
        self
    }

    /// Number of fetches performed so far
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl Default for MockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryClient for MockRegistry {
    fn fetch_package(&self, package_name: &str) -> Result<PackageDocument> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = self.failures.get(package_name) {
            return Err(PublishVersionError::network(message.clone()));
        }

        self.documents
            .get(package_name)
            .cloned()
            .ok_or_else(|| PublishVersionError::network("NPM Error: Not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_serves_latest() {
        let registry = MockRegistry::new().with_latest("core-ui", "1.2.5");
        let document = registry.fetch_package("core-ui").unwrap();
        assert_eq!(document.latest_version().unwrap(), "1.2.5");
        assert_eq!(registry.fetch_count(), 1);
    }

    #[test]
    fn test_mock_unknown_package_is_network_error() {
        let registry = MockRegistry::default();
        assert!(matches!(
            registry.fetch_package("nope"),
            Err(PublishVersionError::Network(_))
        ));
    }

    #[test]
    fn test_mock_configured_failure() {
        let registry = MockRegistry::new()
            .with_latest("core-ui", "1.0.0")
            .with_network_error("core-ui", "connection reset");
        let err = registry.fetch_package("core-ui").unwrap_err();
        assert!(err.to_string().contains("connection reset"));
    }
}
