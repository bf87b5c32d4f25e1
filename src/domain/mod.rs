//! Domain logic - pure version rules independent of manifests and registries

pub mod encoding;
pub mod version;

pub use encoding::{encode, EncodedVersion};
pub use version::SemanticVersion;
