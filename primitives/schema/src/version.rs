//! Protocol version carried by the schema documents.
//!
//! CDP documents spell the version as `{"major": "1", "minor": "3"}`. Some dumps
//! use numbers instead of strings, so both forms are accepted.
use std::cmp::Ordering;
use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A parsed `MAJOR.MINOR` protocol version.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ProtocolVersion {
    /// Major version component (e.g., `1` in `1.3`).
    pub major: u32,
    /// Minor version component (e.g., `3` in `1.3`).
    pub minor: u32,
}

impl PartialOrd for ProtocolVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for ProtocolVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor).cmp(&(other.major, other.minor))
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Errors that can occur while parsing versions.
#[derive(Error, Debug)]
pub enum VersionError {
    /// The provided string did not match the expected version format.
    #[error("Invalid version format: {0}")]
    InvalidFormat(String),
    /// A numeric parse or regex error occurred.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl ProtocolVersion {
    /// Create a version from its components.
    pub fn new(major: u32, minor: u32) -> Self { Self { major, minor } }

    /// Parse a `ProtocolVersion` from a string in the `[v]MAJOR.MINOR` format.
    pub fn from_string(s: &str) -> std::result::Result<Self, VersionError> {
        let re = Regex::new(r"^v?(\d+)\.(\d+)$")
            .map_err(|e: regex::Error| VersionError::Parse(e.to_string()))?;
        let caps =
            re.captures(s.trim()).ok_or_else(|| VersionError::InvalidFormat(s.to_string()))?;

        Ok(Self {
            major: caps[1]
                .parse()
                .map_err(|e: std::num::ParseIntError| VersionError::Parse(e.to_string()))?,
            minor: caps[2]
                .parse()
                .map_err(|e: std::num::ParseIntError| VersionError::Parse(e.to_string()))?,
        })
    }

    /// Build a version from the raw `major`/`minor` parts of a schema document.
    pub(crate) fn from_parts(
        major: &VersionPart,
        minor: &VersionPart,
    ) -> std::result::Result<Self, VersionError> {
        Self::from_string(&format!("{}.{}", major, minor))
    }
}

/// One component of the raw `version` object, which may be a string or a number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum VersionPart {
    Text(String),
    Number(u64),
}

impl fmt::Display for VersionPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionPart::Text(s) => f.write_str(s.trim()),
            VersionPart::Number(n) => write!(f, "{}", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_major_minor() {
        let v = ProtocolVersion::from_string("1.3").expect("valid version");
        assert_eq!(v, ProtocolVersion::new(1, 3));
        assert_eq!(v.to_string(), "1.3");
    }

    #[test]
    fn accepts_v_prefix() {
        let v = ProtocolVersion::from_string("v1.2").expect("valid version");
        assert_eq!((v.major, v.minor), (1, 2));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            ProtocolVersion::from_string("one.three"),
            Err(VersionError::InvalidFormat(_))
        ));
        assert!(ProtocolVersion::from_string("1").is_err());
    }

    #[test]
    fn orders_numerically() {
        let a = ProtocolVersion::from_string("1.10").expect("valid");
        let b = ProtocolVersion::from_string("1.9").expect("valid");
        assert!(a > b);
    }

    #[test]
    fn parts_accept_strings_and_numbers() {
        let v = ProtocolVersion::from_parts(
            &VersionPart::Text("1".into()),
            &VersionPart::Number(3),
        )
        .expect("valid parts");
        assert_eq!(v, ProtocolVersion::new(1, 3));
    }
}
