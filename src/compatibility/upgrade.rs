//! Upgrade path planning between Kubernetes releases

use serde::Serialize;
use tracing::debug;

use crate::compatibility::matrix::Matrix;
use crate::error::Error;
use crate::version::KubeVersion;

/// Order in which control plane and node components are upgraded
pub const SKEW_POLICY_REMINDERS: &[&str] = &[
    "Upgrade kube-apiserver first",
    "Then upgrade kube-controller-manager, kube-scheduler",
    "Finally upgrade kubelet on all nodes",
    "kubelet can be up to 3 minor versions older than kube-apiserver",
];

/// One minor-version hop
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpgradeStep {
    pub step: usize,
    pub from: String,
    pub to: String,
}

/// Change of a pinned dependency between the source and target release
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentChange {
    pub name: String,
    pub from: String,
    pub to: String,
    pub changed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradePlan {
    pub from: String,
    pub to: String,
    pub steps: Vec<UpgradeStep>,
    pub component_changes: Vec<ComponentChange>,
    pub reminders: Vec<String>,
}

/// Plan an upgrade, one minor version at a time.
pub fn plan_upgrade(matrix: &Matrix, from: &str, to: &str) -> Result<UpgradePlan, Error> {
    let source = matrix.resolve(from)?;
    let target = matrix.resolve(to)?;

    let source_version = source.version()?;
    let target_version = target.version()?;

    let invalid_range = |reason: &str| Error::InvalidRange {
        from: source.k8s_version.clone(),
        to: target.k8s_version.clone(),
        reason: reason.to_string(),
    };

    if source_version.major != target_version.major {
        return Err(invalid_range(
            "upgrades across major versions are not supported",
        ));
    }
    if !target_version.is_newer_than(&source_version) {
        return Err(invalid_range(
            "target version must be newer than source version",
        ));
    }

    let major = source_version.major;
    let steps = (source_version.minor..target_version.minor)
        .enumerate()
        .map(|(index, minor)| UpgradeStep {
            step: index + 1,
            from: KubeVersion::new(major, minor, 0).short_string(),
            to: KubeVersion::new(major, minor + 1, 0).short_string(),
        })
        .collect();

    let component_changes = source
        .components
        .iter()
        .filter(|(_, info)| !info.is_skew_governed())
        .filter_map(|(key, from_info)| {
            let to_info = target.components.get(key)?;
            let from = from_info.preferred_version().unwrap_or_default().to_string();
            let to = to_info.preferred_version().unwrap_or_default().to_string();
            Some(ComponentChange {
                name: from_info.name.clone(),
                changed: from != to,
                from,
                to,
            })
        })
        .collect();

    debug!(
        "Planned upgrade {} -> {}",
        source.k8s_version, target.k8s_version
    );

    Ok(UpgradePlan {
        from: source.k8s_version.clone(),
        to: target.k8s_version.clone(),
        steps,
        component_changes,
        reminders: SKEW_POLICY_REMINDERS.iter().map(|r| r.to_string()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn plan_upgrade_steps_one_minor_at_a_time() {
        let plan = plan_upgrade(&Matrix::builtin(), "1.28", "v1.30").unwrap();

        assert_eq!(plan.from, "1.28");
        assert_eq!(plan.to, "1.30");
        assert_eq!(
            plan.steps,
            vec![
                UpgradeStep {
                    step: 1,
                    from: "1.28".to_string(),
                    to: "1.29".to_string(),
                },
                UpgradeStep {
                    step: 2,
                    from: "1.29".to_string(),
                    to: "1.30".to_string(),
                },
            ]
        );
        assert_eq!(plan.reminders.len(), 4);
    }

    #[test]
    fn plan_upgrade_reports_pinned_component_changes() {
        let plan = plan_upgrade(&Matrix::builtin(), "1.28", "1.30").unwrap();

        assert_eq!(
            plan.component_changes,
            vec![
                ComponentChange {
                    name: "etcd".to_string(),
                    from: "3.5.9".to_string(),
                    to: "3.5.12".to_string(),
                    changed: true,
                },
                ComponentChange {
                    name: "CoreDNS".to_string(),
                    from: "1.10.1".to_string(),
                    to: "1.11.1".to_string(),
                    changed: true,
                },
                ComponentChange {
                    name: "containerd".to_string(),
                    from: "1.7.8".to_string(),
                    to: "1.7.16".to_string(),
                    changed: true,
                },
            ]
        );
    }

    #[test]
    fn plan_upgrade_marks_unchanged_components() {
        let plan = plan_upgrade(&Matrix::builtin(), "1.32", "1.33").unwrap();

        let etcd = &plan.component_changes[0];
        assert_eq!(etcd.from, "3.5.15");
        assert!(!etcd.changed);
    }

    #[rstest]
    #[case("1.30", "1.28")]
    #[case("1.30", "1.30")]
    #[case("1.30.1", "1.30.5")]
    fn plan_upgrade_rejects_non_forward_ranges(#[case] from: &str, #[case] to: &str) {
        let err = plan_upgrade(&Matrix::builtin(), from, to).unwrap_err();
        assert!(matches!(err, Error::InvalidRange { .. }));
    }

    #[rstest]
    #[case("1.20", "1.30")]
    #[case("1.30", "1.40")]
    fn plan_upgrade_rejects_unsupported_versions(#[case] from: &str, #[case] to: &str) {
        let err = plan_upgrade(&Matrix::builtin(), from, to).unwrap_err();
        assert!(err.is_not_found());
    }
}
