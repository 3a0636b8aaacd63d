//! Game version parsing and comparison
//!
//! Game versions are plain `major.minor.patch` triples. Pre-release and
//! release-candidate builds are recognized by a substring check on the raw
//! string, not by the parser: catalogs tag such builds with markers like
//! "1.20.0-rc.1" or "1.19.0-pre.3", and both resolvers refuse them before
//! any numeric comparison happens.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionError {
    #[error("malformed version string: {0:?}")]
    Malformed(String),
}

/// A parsed `major.minor.patch` game version.
///
/// Ordering is lexicographic over (major, minor, patch), which is all the
/// compatibility checks need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct GameVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl GameVersion {
    /// Parse a version string with exactly three numeric components.
    ///
    /// Anything else — two components, four, an embedded suffix like
    /// "1.19rc1" — is [`VersionError::Malformed`]. Suffix markers are the
    /// caller's job to detect before parsing, see [`is_pre_or_candidate`].
    pub fn parse(s: &str) -> Result<Self, VersionError> {
        let mut components = s.split('.');
        let (Some(major), Some(minor), Some(patch), None) = (
            components.next(),
            components.next(),
            components.next(),
            components.next(),
        ) else {
            return Err(VersionError::Malformed(s.to_string()));
        };

        let component = |c: &str| {
            c.parse::<u32>()
                .map_err(|_| VersionError::Malformed(s.to_string()))
        };

        Ok(Self {
            major: component(major)?,
            minor: component(minor)?,
            patch: component(patch)?,
        })
    }
}

impl FromStr for GameVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for GameVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Whether a raw version string names a pre-release or release candidate.
///
/// A case-sensitive substring check anywhere in the string. This is a
/// coarse heuristic, not a suffix grammar; catalog data relies on its
/// looseness to reject unstable builds, so keep it as is.
pub fn is_pre_or_candidate(s: &str) -> bool {
    s.contains("rc") || s.contains("pre")
}
