//! Fan-out helpers over projects, scans, packages and vulnerabilities.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::NOT_EXPLOITABLE_STATE;
use crate::client::ScaClient;
use crate::error::{Result, ScaError};
use crate::index::NameIndex;
use crate::models::{Package, PackageState, Project, Scan, Team, UpdateUser, User, Vulnerability, dedup_by_vulnerability};

/// A project together with its latest successful scan and that scan's packages.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectPackages {
    /// The project.
    pub project: Project,
    /// Its most recent successful scan.
    pub scan: Scan,
    /// Packages found by `scan`.
    pub packages: Vec<Package>,
}

/// Who last scanned a recently created project.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectActivity {
    /// The project.
    pub project: Project,
    /// Its most recent scan, successful or not.
    pub last_scan: Scan,
    /// User name recorded on the scan, if any.
    pub username: Option<String>,
    /// The matching access-control user, if one exists.
    pub user: Option<User>,
}

impl ProjectActivity {
    /// Display name of the scanning user, or `"Not found"`.
    #[must_use]
    pub fn user_display_name(&self) -> String {
        self.user
            .as_ref()
            .map_or_else(|| "Not found".to_string(), User::full_name)
    }
}

/// Picks the scan with the latest creation time. Undated scans sort first;
/// on ties the later one in server order wins.
#[must_use]
pub fn most_recent(scans: Vec<Scan>) -> Option<Scan> {
    scans
        .into_iter()
        .reduce(|best, scan| if scan.created_on >= best.created_on { scan } else { best })
}

/// Ids of development-only packages: packages flagged as such, plus
/// development nodes on any dependency path. Order of first appearance.
#[must_use]
pub fn development_packages(packages: &[Package]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();

    for package in packages {
        let nodes = package.development_nodes().map(|n| n.id.as_str());
        let own = package.is_development.then_some(package.id.as_str());

        for id in own.into_iter().chain(nodes) {
            if seen.insert(id) {
                ids.push(id.to_string());
            }
        }
    }

    ids
}

impl ScaClient {
    /// Returns the project's most recent successful scan.
    pub async fn latest_successful_scan(&self, project_id: Uuid) -> Result<Option<Scan>> {
        Ok(most_recent(self.successful_scans(project_id).await?))
    }

    /// For each project with a successful scan, fetches the packages of its
    /// latest successful scan. Projects without one are skipped.
    pub async fn project_packages(&self) -> Result<Vec<ProjectPackages>> {
        let projects = self.sca().await?.projects().await?;
        let mut result = Vec::new();

        for project in projects {
            let Some(scan) = self.latest_successful_scan(project.id).await? else {
                continue;
            };
            let packages = self.sca().await?.packages(scan.scan_id).await?;
            result.push(ProjectPackages { project, scan, packages });
        }

        Ok(result)
    }

    /// Vulnerabilities of one package across the project's successful scans,
    /// each vulnerability id reported once.
    pub async fn package_vulnerabilities(&self, project_id: Uuid, package_id: &str) -> Result<Vec<Vulnerability>> {
        if package_id.trim().is_empty() {
            return Err(ScaError::invalid("package_id", "must not be blank"));
        }

        let mut seen = HashSet::new();
        let mut result = Vec::new();

        for scan in self.successful_scans(project_id).await? {
            let vulnerabilities = self.sca().await?.vulnerabilities(scan.scan_id).await?;
            result.extend(
                vulnerabilities
                    .into_iter()
                    .filter(|v| v.package_id == package_id && seen.insert(v.id.clone())),
            );
        }

        Ok(result)
    }

    /// Triage states marked not exploitable, one per vulnerability id.
    pub async fn not_exploitable_states(&self, project_id: Uuid) -> Result<Vec<PackageState>> {
        let states = self.sca().await?.package_states(project_id).await?;
        Ok(dedup_by_vulnerability(
            states
                .into_iter()
                .filter(|s| s.state == NOT_EXPLOITABLE_STATE)
                .collect(),
        ))
    }

    /// Projects created after `created_after` that have been scanned, with the
    /// user who ran the most recent scan.
    ///
    /// Projects without a creation date are included.
    pub async fn project_activity(&self, created_after: DateTime<Utc>) -> Result<Vec<ProjectActivity>> {
        let users = NameIndex::build(self.access_control().await?.users().await?, |u| u.user_name.as_str());
        let projects = self.sca().await?.projects().await?;
        let mut result = Vec::new();

        for project in projects {
            if project.created_on.is_some_and(|c| c <= created_after) {
                continue;
            }

            let scans = self.sca().await?.scans_for_project(project.id).await?;
            let Some(last_scan) = most_recent(scans) else {
                continue;
            };

            let username = last_scan.username().map(str::to_string);
            let user = username.as_deref().and_then(|name| users.get(name)).cloned();

            result.push(ProjectActivity {
                project,
                last_scan,
                username,
                user,
            });
        }

        Ok(result)
    }

    /// Teams keyed by full path, ignoring case.
    pub async fn teams_by_full_name(&self) -> Result<NameIndex<Team>> {
        let teams = self.access_control().await?.teams().await?;
        Ok(NameIndex::build(teams, |t| t.full_name.as_str()))
    }

    /// Users whose account is enabled.
    pub async fn active_users(&self) -> Result<Vec<User>> {
        let users = self.access_control().await?.users().await?;
        Ok(users.into_iter().filter(|u| u.active).collect())
    }

    /// Rewrites `user` with a new expiration date, keeping every other field.
    pub async fn set_user_expiration(&self, user: &User, expires_at: DateTime<Utc>) -> Result<()> {
        let update = UpdateUser {
            expiration_date: Some(expires_at),
            ..UpdateUser::from(user)
        };
        self.access_control().await?.update_user(user.id, &update).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(id: u128, created_on: Option<&str>) -> Scan {
        serde_json::from_value(serde_json::json!({
            "scanId": Uuid::from_u128(id),
            "createdOn": created_on,
            "status": {"name": "Done"}
        }))
        .unwrap()
    }

    fn package(id: &str, is_development: bool, path: &[(&str, bool)]) -> Package {
        let nodes: Vec<_> = path
            .iter()
            .map(|(id, dev)| serde_json::json!({"id": id, "isDevelopment": dev}))
            .collect();

        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": id,
            "isDevelopment": is_development,
            "dependencyPaths": [nodes]
        }))
        .unwrap()
    }

    #[test]
    fn most_recent_picks_latest_date() {
        let picked = most_recent(vec![
            scan(1, Some("2024-01-01T00:00:00Z")),
            scan(2, Some("2024-03-01T00:00:00Z")),
            scan(3, Some("2024-02-01T00:00:00Z")),
        ])
        .unwrap();

        assert_eq!(picked.scan_id, Uuid::from_u128(2));
    }

    #[test]
    fn most_recent_without_dates_takes_last() {
        let picked = most_recent(vec![scan(1, None), scan(2, None)]).unwrap();
        assert_eq!(picked.scan_id, Uuid::from_u128(2));
    }

    #[test]
    fn most_recent_of_nothing_is_none() {
        assert!(most_recent(Vec::new()).is_none());
    }

    #[test]
    fn development_packages_combines_flags_and_paths() {
        let packages = vec![
            package("jest", true, &[("jest", true)]),
            package("lodash", false, &[("webpack", true), ("lodash", false)]),
            package("react", false, &[("react", false)]),
        ];

        assert_eq!(development_packages(&packages), ["jest", "webpack"]);
    }

    #[test]
    fn activity_display_name_falls_back() {
        let activity = ProjectActivity {
            project: serde_json::from_value(serde_json::json!({
                "id": Uuid::nil(),
                "name": "p"
            }))
            .unwrap(),
            last_scan: scan(1, None),
            username: Some("ghost".into()),
            user: None,
        };

        assert_eq!(activity.user_display_name(), "Not found");
    }
}
