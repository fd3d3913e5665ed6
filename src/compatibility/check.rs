//! Compatibility evaluation of installed component versions

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::compatibility::matrix::{ComponentInfo, Matrix};
use crate::error::Error;
use crate::version::KubeVersion;
use crate::version::semver::range_contains;

/// Status of a component against a release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Compatible,
    Incompatible,
    Unknown,
}

/// Check result for a single component
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentResult {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<String>,
    /// Empty for components governed by the skew policy
    pub required: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended: Option<String>,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skew_policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_components: usize,
    pub compatible_components: usize,
    pub incompatible_count: usize,
    pub unknown_count: usize,
}

impl Summary {
    pub fn from_results(results: &[ComponentResult]) -> Self {
        let count = |status: Status| results.iter().filter(|r| r.status == status).count();

        Self {
            total_components: results.len(),
            compatible_components: count(Status::Compatible),
            incompatible_count: count(Status::Incompatible),
            unknown_count: count(Status::Unknown),
        }
    }

    pub fn all_compatible(&self) -> bool {
        self.compatible_components == self.total_components
    }
}

/// Result of checking a Kubernetes release
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    pub k8s_version: String,
    pub components: Vec<ComponentResult>,
    pub summary: Summary,
}

/// Check component requirements for a Kubernetes version.
///
/// `current` maps component names to installed versions. Components without
/// an installed version are listed as compatible requirements.
pub fn check_release(
    matrix: &Matrix,
    k8s_version: &str,
    current: &[(String, String)],
) -> Result<CheckResult, Error> {
    let release = matrix.resolve(k8s_version)?;
    let api_server = release.version()?;

    let mut installed: HashMap<String, &str> = HashMap::new();
    for (name, version) in current {
        let key = name.to_lowercase();
        if release.component(&key).is_none() {
            return Err(Error::ComponentNotFound {
                component: name.clone(),
                k8s_version: release.k8s_version.clone(),
            });
        }
        installed.insert(key, version.as_str());
    }

    let components: Vec<ComponentResult> = release
        .components
        .iter()
        .map(|(key, info)| {
            let current = installed.get(key).copied();
            component_result(info, current, &api_server)
        })
        .collect();

    let summary = Summary::from_results(&components);
    debug!(
        "Checked {} components for Kubernetes {}: {:?}",
        summary.total_components, release.k8s_version, summary
    );

    Ok(CheckResult {
        k8s_version: display_version(k8s_version),
        components,
        summary,
    })
}

fn display_version(requested: &str) -> String {
    let requested = requested.trim();
    requested.strip_prefix('v').unwrap_or(requested).to_string()
}

fn component_result(
    info: &ComponentInfo,
    current: Option<&str>,
    api_server: &KubeVersion,
) -> ComponentResult {
    let status = match current {
        None => Status::Compatible,
        Some(current) => evaluate(info, current, api_server),
    };

    let required = if info.is_skew_governed() {
        String::new()
    } else {
        info.version.clone().unwrap_or_default()
    };

    ComponentResult {
        name: info.name.clone(),
        current: current.map(str::to_string),
        required,
        recommended: info.recommended.clone(),
        status,
        skew_policy: info.skew_policy.clone(),
        notes: info.notes.clone(),
    }
}

/// Evaluate an installed version against a component's requirements
pub fn evaluate(info: &ComponentInfo, current: &str, api_server: &KubeVersion) -> Status {
    if info.is_skew_governed() {
        return evaluate_skew(info, current, api_server);
    }

    match range_contains(
        info.min_version.as_deref(),
        info.max_version.as_deref(),
        current,
    ) {
        Some(true) => Status::Compatible,
        Some(false) => Status::Incompatible,
        None => {
            warn!("Cannot evaluate {} version {}", info.name, current);
            Status::Unknown
        }
    }
}

/// Skew is evaluated at minor granularity: patch releases never break it.
fn evaluate_skew(info: &ComponentInfo, current: &str, api_server: &KubeVersion) -> Status {
    let Ok(component) = KubeVersion::parse(current) else {
        warn!("Cannot parse {} version {}", info.name, current);
        return Status::Unknown;
    };
    let component = component.without_patch();
    let api_server = api_server.without_patch();

    let compatible = if info.can_be_newer {
        component.major == api_server.major
            && component.minor_diff(&api_server) <= info.max_minor_skew
    } else {
        component.is_compatible_with_api_server(&api_server, info.max_minor_skew)
    };

    if compatible {
        Status::Compatible
    } else {
        Status::Incompatible
    }
}
