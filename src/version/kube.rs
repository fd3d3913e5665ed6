//! Kubernetes version model and version skew checks

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::version::error::VersionError;

// `\d` would also accept non-ASCII digits
static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+)\.([0-9]+)(?:\.([0-9]+))?$").expect("version pattern is valid")
});

/// A Kubernetes-style `major.minor[.patch]` version.
///
/// Equality, ordering and hashing only look at the numeric triple, so
/// `1.30` and `1.30.0` are the same version.
#[derive(Debug, Clone)]
pub struct KubeVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    /// Normalized input, without surrounding whitespace or leading `v`
    pub raw: String,
}

impl KubeVersion {
    /// Parse a version string.
    ///
    /// Accepts "1.30", "v1.30", "1.30.0" and "v1.30.0". Whitespace may
    /// surround the version or follow the `v`. A missing patch component
    /// defaults to 0.
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let trimmed = input.trim();
        let normalized = trimmed.strip_prefix('v').unwrap_or(trimmed).trim();

        let invalid = || VersionError::InvalidFormat(normalized.to_string());

        let captures = VERSION_PATTERN.captures(normalized).ok_or_else(invalid)?;
        let number = |index: usize| -> Result<u64, VersionError> {
            match captures.get(index) {
                Some(m) => m.as_str().parse().map_err(|_| invalid()),
                None => Ok(0),
            }
        };

        Ok(Self {
            major: number(1)?,
            minor: number(2)?,
            patch: number(3)?,
            raw: normalized.to_string(),
        })
    }

    /// Build a version from its components.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            raw: format!("{major}.{minor}.{patch}"),
        }
    }

    /// `major.minor`, the form used to key Kubernetes releases
    pub fn short_string(&self) -> String {
        format!("{}.{}", self.major, self.minor)
    }

    /// The same version with the patch component dropped.
    pub fn without_patch(&self) -> Self {
        Self {
            major: self.major,
            minor: self.minor,
            patch: 0,
            raw: self.short_string(),
        }
    }

    /// Absolute difference of the minor components.
    ///
    /// Major and patch are ignored: `1.30` and `2.30` have a minor diff of 0.
    pub fn minor_diff(&self, other: &KubeVersion) -> u64 {
        self.minor.abs_diff(other.minor)
    }

    pub fn is_newer_than(&self, other: &KubeVersion) -> bool {
        self > other
    }

    pub fn is_older_than(&self, other: &KubeVersion) -> bool {
        self < other
    }

    /// Whether a component at this version may run against `api_server`.
    ///
    /// The component must not be newer than the API server, and the API
    /// server's minor may lead the component's by at most `max_minor_skew`.
    /// The minor difference is signed: a component minor above the API
    /// server's always satisfies it.
    pub fn is_compatible_with_api_server(
        &self,
        api_server: &KubeVersion,
        max_minor_skew: u64,
    ) -> bool {
        if self.is_newer_than(api_server) {
            return false;
        }

        // saturating_sub clamps a negative difference to 0
        api_server.minor.saturating_sub(self.minor) <= max_minor_skew
    }

    fn triple(&self) -> (u64, u64, u64) {
        (self.major, self.minor, self.patch)
    }
}

impl fmt::Display for KubeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for KubeVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl PartialEq for KubeVersion {
    fn eq(&self, other: &Self) -> bool {
        self.triple() == other.triple()
    }
}

impl Eq for KubeVersion {}

impl Hash for KubeVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.triple().hash(state);
    }
}

impl PartialOrd for KubeVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for KubeVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.triple().cmp(&other.triple())
    }
}
