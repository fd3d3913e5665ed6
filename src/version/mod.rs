//! Version model
//!
//! Two kinds of versions flow through the checker:
//!
//! - Kubernetes versions (API server, kubelet, kubectl, ...) follow the
//!   `major.minor[.patch]` scheme and are governed by the version skew
//!   policy. See [`kube::KubeVersion`].
//! - Dependency versions (etcd, CoreDNS, containerd) are plain semver and are
//!   checked against a `[min, max]` range. See [`semver`].
//!
//! # Modules
//!
//! - [`kube`]: Kubernetes version parsing, ordering and skew checks
//! - [`semver`]: Range checks for dependency versions
//! - [`error`]: Parse errors

pub mod error;
pub mod kube;
pub mod semver;

pub use error::VersionError;
pub use kube::KubeVersion;
