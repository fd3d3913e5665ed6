use kube_dependency_checker::compatibility::Matrix;
use kube_dependency_checker::compatibility::check::{Status, check_release};
use kube_dependency_checker::error::Error;
use kube_dependency_checker::version::KubeVersion;

#[test]
fn release_1_30_includes_etcd_with_recommended_version() {
    let matrix = Matrix::builtin();

    let release = matrix.resolve("1.30").unwrap();

    assert!(!release.components.is_empty());
    let etcd = release.component("etcd").unwrap();
    assert_eq!(etcd.recommended.as_deref(), Some("3.5.12"));
}

#[test]
fn unsupported_release_is_not_found() {
    let err = Matrix::builtin().resolve("1.20").unwrap_err();

    assert!(err.is_not_found());
    assert!(matches!(err, Error::UnsupportedVersion { .. }));
}

#[test]
fn lookup_returns_component_or_not_found() {
    let matrix = Matrix::builtin();

    let kubelet = matrix.lookup("1.30", "kubelet").unwrap();
    assert_eq!(kubelet.max_minor_skew, 3);

    assert!(matrix.lookup("1.30", "invalid").unwrap_err().is_not_found());
    assert!(matrix.lookup("1.20", "etcd").unwrap_err().is_not_found());
}

#[test]
fn skew_policy_from_matrix_drives_compatibility() {
    let matrix = Matrix::builtin();
    let api_server = KubeVersion::parse("1.30.0").unwrap();

    for (component, version, expected) in [
        ("kubelet", "1.27.0", true),
        ("kubelet", "1.26.0", false),
        ("kube-controller-manager", "1.29.0", true),
        ("kube-controller-manager", "1.28.0", false),
    ] {
        let info = matrix.lookup("1.30", component).unwrap();
        let version = KubeVersion::parse(version).unwrap();
        assert_eq!(
            version.is_compatible_with_api_server(&api_server, info.max_minor_skew),
            expected,
            "{component} {version}"
        );
    }
}

#[test]
fn check_with_installed_versions_counts_statuses() {
    let current = vec![
        ("kubelet".to_string(), "1.26.0".to_string()),
        ("etcd".to_string(), "3.5.12".to_string()),
    ];

    let result = check_release(&Matrix::builtin(), "v1.30", &current).unwrap();

    let kubelet = result
        .components
        .iter()
        .find(|c| c.name == "kubelet")
        .unwrap();
    assert_eq!(kubelet.status, Status::Incompatible);
    assert_eq!(kubelet.current.as_deref(), Some("1.26.0"));
    assert_eq!(result.summary.total_components, 8);
    assert_eq!(result.summary.incompatible_count, 1);
    assert_eq!(result.summary.compatible_components, 7);
}
