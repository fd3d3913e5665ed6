//! Component versions across Kubernetes releases

use serde::Serialize;

use crate::compatibility::matrix::{ComponentInfo, Matrix};
use crate::error::Error;

/// A single component's requirements for one release
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDetail {
    pub k8s_version: String,
    #[serde(flatten)]
    pub info: ComponentInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRow {
    pub k8s_version: String,
    /// Pinned version, or None for skew-governed components
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skew_policy: Option<String>,
}

/// A component's requirements across every supported release, newest first
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentHistory {
    pub component: String,
    pub releases: Vec<HistoryRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupportedVersions {
    pub versions: Vec<String>,
}

pub fn component_detail(
    matrix: &Matrix,
    k8s_version: &str,
    component: &str,
) -> Result<ComponentDetail, Error> {
    let info = matrix.lookup(k8s_version, component)?;
    let release = matrix.resolve(k8s_version)?;

    Ok(ComponentDetail {
        k8s_version: release.k8s_version.clone(),
        info: info.clone(),
    })
}

/// Collect a component's requirements from every release that has it.
///
/// Fails when no release knows the component.
pub fn component_history(matrix: &Matrix, component: &str) -> Result<ComponentHistory, Error> {
    let mut display_name = None;
    let releases: Vec<HistoryRow> = matrix
        .releases_newest_first()
        .filter_map(|release| {
            let info = release.component(component)?;
            display_name.get_or_insert_with(|| info.name.clone());
            Some(HistoryRow {
                k8s_version: release.k8s_version.clone(),
                version: info.version.clone(),
                recommended: info.recommended.clone(),
                skew_policy: info.skew_policy.clone(),
            })
        })
        .collect();

    let component = display_name.ok_or_else(|| Error::UnknownComponent(component.to_string()))?;

    Ok(ComponentHistory {
        component,
        releases,
    })
}

pub fn supported_versions(matrix: &Matrix) -> SupportedVersions {
    SupportedVersions {
        versions: matrix.supported_versions(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_detail_uses_release_key() {
        let detail = component_detail(&Matrix::builtin(), "v1.30.3", "ETCD").unwrap();

        assert_eq!(detail.k8s_version, "1.30");
        assert_eq!(detail.info.recommended.as_deref(), Some("3.5.12"));
    }

    #[test]
    fn component_detail_fails_for_unknown_component() {
        let err = component_detail(&Matrix::builtin(), "1.30", "flannel").unwrap_err();

        assert_eq!(
            err.to_string(),
            "component 'flannel' not found for Kubernetes 1.30"
        );
    }

    #[test]
    fn component_history_lists_releases_newest_first() {
        let history = component_history(&Matrix::builtin(), "coredns").unwrap();

        assert_eq!(history.component, "CoreDNS");
        let versions: Vec<&str> = history
            .releases
            .iter()
            .map(|row| row.k8s_version.as_str())
            .collect();
        assert_eq!(versions, ["1.33", "1.32", "1.31", "1.30", "1.29", "1.28"]);
        assert_eq!(history.releases[0].recommended.as_deref(), Some("1.12.0"));
    }

    #[test]
    fn component_history_keeps_skew_policy_for_skewed_components() {
        let history = component_history(&Matrix::builtin(), "kubelet").unwrap();

        assert!(history.releases.iter().all(|row| row.version.is_none()));
        assert!(history.releases.iter().all(|row| row.skew_policy.is_some()));
    }

    #[test]
    fn history_rows_omit_missing_fields_when_serialized() {
        let history = component_history(&Matrix::builtin(), "kubelet").unwrap();

        let row = serde_json::to_value(&history.releases[0]).unwrap();

        assert_eq!(row["k8sVersion"], "1.33");
        assert!(row.get("version").is_none());
        assert!(row.get("recommended").is_none());
        assert!(row["skewPolicy"].is_string());
    }

    #[test]
    fn component_history_fails_for_unknown_component() {
        let err = component_history(&Matrix::builtin(), "flannel").unwrap_err();
        assert!(matches!(err, Error::UnknownComponent(_)));
    }

    #[test]
    fn supported_versions_lists_builtin_releases() {
        let versions = supported_versions(&Matrix::builtin()).versions;
        assert_eq!(versions, ["1.33", "1.32", "1.31", "1.30", "1.29", "1.28"]);
    }
}
