//! Built-in compatibility data for supported Kubernetes releases

use indexmap::IndexMap;

use crate::compatibility::matrix::{ComponentInfo, Release};

const ROLLING_SKEW_POLICY: &str = "Up to 3 minor versions older than kube-apiserver";
const CONTROL_PLANE_SKEW_POLICY: &str = "Up to 1 minor version older than kube-apiserver";
const KUBECTL_SKEW_POLICY: &str = "Within 1 minor version (older or newer)";

const KUBEADM_NOTE: &str = "Installed by kubeadm";

/// Canonical display order of components
pub const COMPONENT_ORDER: &[&str] = &[
    "etcd",
    "coredns",
    "containerd",
    "kubelet",
    "kube-proxy",
    "kube-controller-manager",
    "kube-scheduler",
    "kubectl",
];

/// Pinned dependency versions for one release
struct Dependencies {
    k8s_version: &'static str,
    etcd_recommended: &'static str,
    coredns: &'static str,
    coredns_min: &'static str,
    coredns_max: &'static str,
    containerd_min: &'static str,
    containerd_max: &'static str,
    containerd_recommended: &'static str,
    containerd_note: &'static str,
}

const RELEASES: &[Dependencies] = &[
    Dependencies {
        k8s_version: "1.33",
        etcd_recommended: "3.5.15",
        coredns: "1.12.0",
        coredns_min: "1.11.0",
        coredns_max: "1.12.99",
        containerd_min: "1.7.0",
        containerd_max: "2.0.99",
        containerd_recommended: "1.7.22",
        containerd_note: "containerd 1.7+ or 2.0+ supported",
    },
    Dependencies {
        k8s_version: "1.32",
        etcd_recommended: "3.5.15",
        coredns: "1.11.3",
        coredns_min: "1.10.0",
        coredns_max: "1.11.99",
        containerd_min: "1.6.0",
        containerd_max: "2.0.99",
        containerd_recommended: "1.7.22",
        containerd_note: "containerd 1.6+ supported",
    },
    Dependencies {
        k8s_version: "1.31",
        etcd_recommended: "3.5.12",
        coredns: "1.11.3",
        coredns_min: "1.10.0",
        coredns_max: "1.11.99",
        containerd_min: "1.6.0",
        containerd_max: "1.7.99",
        containerd_recommended: "1.7.20",
        containerd_note: "containerd 1.6+ supported",
    },
    Dependencies {
        k8s_version: "1.30",
        etcd_recommended: "3.5.12",
        coredns: "1.11.1",
        coredns_min: "1.10.0",
        coredns_max: "1.11.99",
        containerd_min: "1.6.0",
        containerd_max: "1.7.99",
        containerd_recommended: "1.7.16",
        containerd_note: "containerd 1.6+ supported",
    },
    Dependencies {
        k8s_version: "1.29",
        etcd_recommended: "3.5.10",
        coredns: "1.11.1",
        coredns_min: "1.9.0",
        coredns_max: "1.11.99",
        containerd_min: "1.6.0",
        containerd_max: "1.7.99",
        containerd_recommended: "1.7.13",
        containerd_note: "containerd 1.6+ supported",
    },
    Dependencies {
        k8s_version: "1.28",
        etcd_recommended: "3.5.9",
        coredns: "1.10.1",
        coredns_min: "1.9.0",
        coredns_max: "1.10.99",
        containerd_min: "1.6.0",
        containerd_max: "1.7.99",
        containerd_recommended: "1.7.8",
        containerd_note: "containerd 1.6+ supported",
    },
];

pub fn builtin_releases() -> Vec<Release> {
    RELEASES.iter().map(release).collect()
}

fn release(deps: &Dependencies) -> Release {
    let components = [
        ComponentInfo::pinned(
            "etcd",
            "3.5.x",
            "3.5.0",
            "3.5.99",
            deps.etcd_recommended,
            &format!("etcd 3.5.x is required for Kubernetes {}", deps.k8s_version),
        ),
        ComponentInfo::pinned(
            "CoreDNS",
            deps.coredns,
            deps.coredns_min,
            deps.coredns_max,
            deps.coredns,
            KUBEADM_NOTE,
        ),
        ComponentInfo::pinned(
            "containerd",
            "1.7.x",
            deps.containerd_min,
            deps.containerd_max,
            deps.containerd_recommended,
            deps.containerd_note,
        ),
        ComponentInfo::skewed("kubelet", ROLLING_SKEW_POLICY, 3, false),
        ComponentInfo::skewed("kube-proxy", ROLLING_SKEW_POLICY, 3, false),
        ComponentInfo::skewed("kube-controller-manager", CONTROL_PLANE_SKEW_POLICY, 1, false),
        ComponentInfo::skewed("kube-scheduler", CONTROL_PLANE_SKEW_POLICY, 1, false),
        ComponentInfo::skewed("kubectl", KUBECTL_SKEW_POLICY, 1, true),
    ];

    let components: IndexMap<String, ComponentInfo> = COMPONENT_ORDER
        .iter()
        .map(|key| key.to_string())
        .zip(components)
        .collect();

    Release::new(deps.k8s_version, components)
}
