use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::null_as_default;

/// A node on a dependency path from a direct dependency down to a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyNode {
    /// Package identifier of this node.
    pub id: String,
    /// Package name.
    #[serde(default)]
    pub name: Option<String>,
    /// Resolved version.
    #[serde(default)]
    pub version: Option<String>,
    /// Whether the version could be resolved.
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_resolved: bool,
    /// Whether this node is a development-only dependency.
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_development: bool,
}

/// A package found by a scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    /// Package identifier, e.g. `Maven-org.yaml:snakeyaml-1.26`.
    pub id: String,
    /// Package name.
    pub name: String,
    /// Package version.
    #[serde(default)]
    pub version: Option<String>,
    /// Declared licenses.
    #[serde(default, deserialize_with = "null_as_default")]
    pub licenses: Vec<String>,
    /// Ecosystem the package comes from, e.g. `Maven`, `Npm`.
    #[serde(default)]
    pub package_repository: Option<String>,
    /// Whether the package is only used for development.
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_development: bool,
    /// Whether the project depends on the package directly.
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_direct_dependency: bool,
    /// Highest severity among the package's vulnerabilities.
    #[serde(default)]
    pub severity: Option<String>,
    /// Vendor risk score.
    #[serde(default)]
    pub risk_score: Option<f64>,
    /// Whether a newer version is available.
    #[serde(default, deserialize_with = "null_as_default")]
    pub outdated: bool,
    /// Latest published version.
    #[serde(default)]
    pub newest_version: Option<String>,
    /// Number of high-severity vulnerabilities.
    #[serde(default, deserialize_with = "null_as_default")]
    pub high_vulnerability_count: u32,
    /// Number of medium-severity vulnerabilities.
    #[serde(default, deserialize_with = "null_as_default")]
    pub medium_vulnerability_count: u32,
    /// Number of low-severity vulnerabilities.
    #[serde(default, deserialize_with = "null_as_default")]
    pub low_vulnerability_count: u32,
    /// Paths through which the package is pulled in.
    #[serde(default, deserialize_with = "null_as_default")]
    pub dependency_paths: Vec<Vec<DependencyNode>>,
}

impl Package {
    /// Total number of vulnerabilities across severities.
    #[must_use]
    pub const fn vulnerability_count(&self) -> u32 {
        self.high_vulnerability_count + self.medium_vulnerability_count + self.low_vulnerability_count
    }

    /// Development-only nodes on this package's dependency paths.
    pub fn development_nodes(&self) -> impl Iterator<Item = &DependencyNode> {
        self.dependency_paths
            .iter()
            .flatten()
            .filter(|node| node.is_development)
    }
}

/// A vulnerability reported for a package in a scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vulnerability {
    /// Vulnerability identifier, usually the CVE id.
    pub id: String,
    /// CVE name, when one is assigned.
    #[serde(default)]
    pub cve_name: Option<String>,
    /// Package this vulnerability was found in.
    pub package_id: String,
    /// Severity label, e.g. `High`.
    #[serde(default)]
    pub severity: Option<String>,
    /// CVSS score.
    #[serde(default)]
    pub score: Option<f64>,
    /// Human-readable description.
    #[serde(default)]
    pub description: Option<String>,
    /// Publication date.
    #[serde(default)]
    pub publish_date: Option<DateTime<Utc>>,
    /// Whether the vulnerability has been ignored in the project.
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_ignored: bool,
    /// Suggested fix.
    #[serde(default)]
    pub fix_resolution_text: Option<String>,
    /// Reference URLs.
    #[serde(default, deserialize_with = "null_as_default")]
    pub references: Vec<String>,
}

/// The triage state of one vulnerability of one package in a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageState {
    /// Package identifier.
    pub package_id: String,
    /// Vulnerability identifier.
    pub vulnerability_id: String,
    /// Owning project.
    pub project_id: Uuid,
    /// State name, e.g. [`NOT_EXPLOITABLE_STATE`](crate::NOT_EXPLOITABLE_STATE).
    pub state: String,
}

impl PackageState {
    /// Returns the web-console deep link to this vulnerability's details.
    #[must_use]
    pub fn web_link(&self, web_url: &str) -> String {
        format!(
            "{}/#/projects/{}/reports/{}/vulnerabilities/{}/vulnerabilityDetails",
            web_url.trim_end_matches('/'),
            self.project_id,
            self.package_id,
            self.vulnerability_id
        )
    }
}

/// Drops states whose vulnerability id has already been seen, keeping the first.
#[must_use]
pub fn dedup_by_vulnerability(states: Vec<PackageState>) -> Vec<PackageState> {
    let mut seen = HashSet::new();
    states
        .into_iter()
        .filter(|s| seen.insert(s.vulnerability_id.clone()))
        .collect()
}
