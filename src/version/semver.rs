//! Semver helpers for component versions (etcd, CoreDNS, containerd)

use semver::Version;

/// Parse a component version string into a semver::Version, normalizing partial versions.
///
/// Strips a leading 'v' and pads partial versions with zeros.
///
/// Examples:
/// - "3" -> Version(3, 0, 0)
/// - "v3.5" -> Version(3, 5, 0)
/// - "3.5.12" -> Version(3, 5, 12)
pub fn parse_version(version: &str) -> Option<Version> {
    let version = version.trim();
    let version = version.strip_prefix('v').unwrap_or(version);
    let parts: Vec<&str> = version.split('.').collect();
    let normalized = match parts.len() {
        1 => format!("{}.0.0", parts[0]),
        2 => format!("{}.{}.0", parts[0], parts[1]),
        _ => version.to_string(),
    };
    Version::parse(&normalized).ok()
}

/// Check whether `current` lies within the inclusive `[min, max]` range.
///
/// Returns None when `current` is unparseable or neither bound is usable.
/// A missing or unparseable bound leaves that side open.
pub fn range_contains(min: Option<&str>, max: Option<&str>, current: &str) -> Option<bool> {
    let current = parse_version(current)?;
    let min = min.and_then(parse_version);
    let max = max.and_then(parse_version);

    if min.is_none() && max.is_none() {
        return None;
    }

    let above_min = min.is_none_or(|min| current >= min);
    let below_max = max.is_none_or(|max| current <= max);
    Some(above_min && below_max)
}
