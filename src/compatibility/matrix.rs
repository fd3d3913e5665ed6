//! Compatibility matrix: component requirements per Kubernetes release

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::compatibility::data;
use crate::error::Error;
use crate::version::KubeVersion;

/// Version requirements for a single component in one Kubernetes release.
///
/// A component is either pinned to a version range (etcd, CoreDNS,
/// containerd) or governed by the version skew policy relative to the
/// API server (kubelet, kubectl, ...).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComponentInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skew_policy: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub max_minor_skew: u64,
    /// kubectl may be newer than the API server
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub can_be_newer: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

fn is_zero(value: &u64) -> bool {
    *value == 0
}

impl ComponentInfo {
    /// A component pinned to a version range
    pub fn pinned(
        name: &str,
        version: &str,
        min_version: &str,
        max_version: &str,
        recommended: &str,
        notes: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            version: Some(version.to_string()),
            min_version: Some(min_version.to_string()),
            max_version: Some(max_version.to_string()),
            recommended: Some(recommended.to_string()),
            notes: Some(notes.to_string()),
            ..Self::default()
        }
    }

    /// A component governed by the version skew policy
    pub fn skewed(name: &str, policy: &str, max_minor_skew: u64, can_be_newer: bool) -> Self {
        Self {
            name: name.to_string(),
            skew_policy: Some(policy.to_string()),
            max_minor_skew,
            can_be_newer,
            ..Self::default()
        }
    }

    pub fn is_skew_governed(&self) -> bool {
        self.skew_policy.is_some()
    }

    /// Recommended version, falling back to the required version
    pub fn preferred_version(&self) -> Option<&str> {
        self.recommended.as_deref().or(self.version.as_deref())
    }
}

/// All component requirements for one Kubernetes minor release
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    pub k8s_version: String,
    /// Keyed by lowercase component name, in display order
    pub components: IndexMap<String, ComponentInfo>,
}

impl Release {
    pub fn new(k8s_version: &str, components: IndexMap<String, ComponentInfo>) -> Self {
        Self {
            k8s_version: k8s_version.to_string(),
            components,
        }
    }

    /// Find a component by name, ignoring case
    pub fn component(&self, name: &str) -> Option<&ComponentInfo> {
        self.components.get(&name.to_lowercase())
    }

    /// The release as a version (patch 0)
    pub fn version(&self) -> Result<KubeVersion, Error> {
        Ok(self.k8s_version.parse::<KubeVersion>()?)
    }
}

/// Component overrides for one release, as read from configuration
pub type ReleaseOverrides = IndexMap<String, IndexMap<String, ComponentInfo>>;

/// The read-only compatibility table.
///
/// Built once at startup and passed by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    releases: IndexMap<String, Release>,
}

impl Matrix {
    pub fn new(releases: impl IntoIterator<Item = Release>) -> Self {
        Self {
            releases: releases
                .into_iter()
                .map(|release| (release.k8s_version.clone(), release))
                .collect(),
        }
    }

    /// The table shipped with the binary
    pub fn builtin() -> Self {
        Self::new(data::builtin_releases())
    }

    /// Merge release overrides on top of this matrix.
    ///
    /// Existing components are replaced, unknown components are appended and
    /// unknown releases are added. Release keys must be `major.minor`.
    pub fn with_overrides(mut self, overrides: ReleaseOverrides) -> Result<Self, Error> {
        for (key, components) in overrides {
            let version = KubeVersion::parse(&key)?;
            let key = version.short_string();

            let release = self
                .releases
                .entry(key.clone())
                .or_insert_with(|| Release::new(&key, IndexMap::new()));

            for (name, mut info) in components {
                debug!("Overriding {} for Kubernetes {}", name, key);
                if info.name.is_empty() {
                    info.name = name.clone();
                }
                release.components.insert(name.to_lowercase(), info);
            }
        }

        Ok(self)
    }

    /// Exact lookup by release key, tolerating a leading 'v'
    pub fn get(&self, k8s_version: &str) -> Option<&Release> {
        let k8s_version = k8s_version.trim();
        self.releases
            .get(k8s_version.strip_prefix('v').unwrap_or(k8s_version))
    }

    /// Resolve any version of a release ("1.30", "v1.30", "1.30.4")
    pub fn resolve(&self, k8s_version: &str) -> Result<&Release, Error> {
        let version = KubeVersion::parse(k8s_version)?;
        let key = version.short_string();

        self.releases.get(&key).ok_or_else(|| Error::UnsupportedVersion {
            version: version.raw.clone(),
            supported: self.supported_versions(),
        })
    }

    /// Look up one component of one release
    pub fn lookup(&self, k8s_version: &str, component: &str) -> Result<&ComponentInfo, Error> {
        let release = self.resolve(k8s_version)?;

        release
            .component(component)
            .ok_or_else(|| Error::ComponentNotFound {
                component: component.to_string(),
                k8s_version: release.k8s_version.clone(),
            })
    }

    /// Supported release keys, newest first
    pub fn supported_versions(&self) -> Vec<String> {
        self.releases_newest_first()
            .map(|release| release.k8s_version.clone())
            .collect()
    }

    /// Releases, newest first
    pub fn releases_newest_first(&self) -> impl Iterator<Item = &Release> {
        let mut releases: Vec<&Release> = self.releases.values().collect();
        releases.sort_by_cached_key(|release| {
            std::cmp::Reverse(release.k8s_version.parse::<KubeVersion>().ok())
        });
        releases.into_iter()
    }

    pub fn release_count(&self) -> usize {
        self.releases.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1.30", true)]
    #[case("v1.30", true)]
    #[case("1.28", true)]
    #[case("1.33", true)]
    #[case("1.20", false)]
    #[case("invalid", false)]
    fn get_finds_supported_releases(#[case] k8s_version: &str, #[case] expected: bool) {
        assert_eq!(Matrix::builtin().get(k8s_version).is_some(), expected);
    }

    #[rstest]
    #[case("1.30")]
    #[case("v1.30")]
    #[case("1.30.4")]
    fn resolve_accepts_any_version_of_a_release(#[case] k8s_version: &str) {
        let matrix = Matrix::builtin();
        assert_eq!(matrix.resolve(k8s_version).unwrap().k8s_version, "1.30");
    }

    #[test]
    fn resolve_reports_unsupported_version_with_supported_list() {
        let matrix = Matrix::builtin();

        let err = matrix.resolve("1.20").unwrap_err();

        assert!(err.is_not_found());
        let message = err.to_string();
        assert!(message.contains("unsupported Kubernetes version: 1.20"));
        assert!(message.contains("1.33, 1.32, 1.31, 1.30, 1.29, 1.28"));
    }

    #[test]
    fn resolve_rejects_malformed_version() {
        let err = Matrix::builtin().resolve("invalid").unwrap_err();
        assert!(matches!(err, Error::InvalidFormat(_)));
    }

    #[rstest]
    #[case("1.30", "etcd", true)]
    #[case("1.30", "coredns", true)]
    #[case("1.30", "CoreDNS", true)]
    #[case("1.30", "kubelet", true)]
    #[case("1.30", "invalid", false)]
    #[case("1.20", "etcd", false)]
    fn lookup_finds_components(
        #[case] k8s_version: &str,
        #[case] component: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(
            Matrix::builtin().lookup(k8s_version, component).is_ok(),
            expected
        );
    }

    #[test]
    fn supported_versions_sorts_numerically() {
        let matrix = Matrix::new([
            Release::new("1.9", IndexMap::new()),
            Release::new("1.10", IndexMap::new()),
            Release::new("1.2", IndexMap::new()),
        ]);

        assert_eq!(matrix.supported_versions(), vec!["1.10", "1.9", "1.2"]);
    }

    #[test]
    fn with_overrides_replaces_and_adds() {
        let mut release_134 = IndexMap::new();
        release_134.insert(
            "etcd".to_string(),
            ComponentInfo::pinned("etcd", "3.6.x", "3.6.0", "3.6.99", "3.6.1", "new"),
        );
        let mut release_130 = IndexMap::new();
        release_130.insert(
            "Etcd".to_string(),
            ComponentInfo::pinned("etcd", "3.5.x", "3.5.0", "3.5.99", "3.5.16", "patched"),
        );
        let overrides = ReleaseOverrides::from([
            ("v1.34".to_string(), release_134),
            ("1.30".to_string(), release_130),
        ]);

        let matrix = Matrix::builtin().with_overrides(overrides).unwrap();

        assert_eq!(matrix.supported_versions()[0], "1.34");
        assert_eq!(
            matrix.lookup("1.34", "etcd").unwrap().recommended.as_deref(),
            Some("3.6.1")
        );
        let release = matrix.resolve("1.30").unwrap();
        assert_eq!(release.components.len(), 8);
        assert_eq!(release.components.get_index(0).unwrap().0, "etcd");
        assert_eq!(
            release.component("etcd").unwrap().recommended.as_deref(),
            Some("3.5.16")
        );
    }

    #[test]
    fn with_overrides_rejects_malformed_release_key() {
        let overrides = ReleaseOverrides::from([("next".to_string(), IndexMap::new())]);

        let err = Matrix::builtin().with_overrides(overrides).unwrap_err();

        assert!(matches!(err, Error::InvalidFormat(_)));
    }

    #[test]
    fn preferred_version_falls_back_to_version() {
        let mut info = ComponentInfo::pinned("etcd", "3.5.x", "3.5.0", "3.5.99", "3.5.12", "");
        assert_eq!(info.preferred_version(), Some("3.5.12"));

        info.recommended = None;
        assert_eq!(info.preferred_version(), Some("3.5.x"));
    }
}
