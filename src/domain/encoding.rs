//! Single-integer encoding of version strings.
//!
//! The encoding is kept bit-for-bit compatible with the ordering already used
//! by past releases, including its sensitivity to component digit width:
//! minor and patch are right-padded with `0` to three characters, so
//! `1.10.0` and `1.1.0` encode identically and `1.10.0` sorts below `1.2.0`.

use crate::domain::version::split_components;
use crate::error::{PublishVersionError, Result};
use std::fmt;

/// Marker digit prefixed to the major component.
const MAJOR_MARKER: char = '1';

/// Number of padding rounds applied to each component.
const PAD_ROUNDS: usize = 3;

/// Totally ordered integer form of a version string
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EncodedVersion(u128);

impl EncodedVersion {
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl fmt::Display for EncodedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Encodes a `MAJOR.MINOR.PATCH` string into a comparable integer.
///
/// Steps:
/// 1. prefix major with the marker digit `1`
/// 2. for `i` in `0..3`: append `0` to major while `len < i`, and to minor and
///    patch while `len <= i`
/// 3. concatenate major, minor, patch and parse as base 10
///
/// # Errors
/// * `Parse` - if the string is not a strict three-component version, or the
///   concatenation does not fit in a `u128`
pub fn encode(version: &str) -> Result<EncodedVersion> {
    let [major, minor, patch] = split_components(version)?;

    let mut major = format!("{}{}", MAJOR_MARKER, major);
    let mut minor = minor.to_string();
    let mut patch = patch.to_string();

    for i in 0..PAD_ROUNDS {
        if major.len() < i {
            major.push('0');
        }
        if minor.len() <= i {
            minor.push('0');
        }
        if patch.len() <= i {
            patch.push('0');
        }
    }

    let total = format!("{}{}{}", major, minor, patch);
    total.parse::<u128>().map(EncodedVersion).map_err(|_| {
        PublishVersionError::parse(format!(
            "Version '{}' is too wide to encode ({} digits)",
            version,
            total.len()
        ))
    })
}
