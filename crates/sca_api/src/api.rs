//! Typed endpoints of the SCA REST API.

use std::time::Duration;

use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    CreateProject, Package, PackageState, Project, ProjectSettings, RiskReport, Scan, ScanRequest, ScanStarted,
    UploadLink, Vulnerability,
};
use crate::transport::{Session, check};

const PROJECTS: &str = "risk-management/projects";
const SCANS: &str = "risk-management/scans";
const RISK_REPORTS: &str = "risk-management/risk-reports";
const RISK_STATE: &str = "risk-management/risk-state";
const UPLOADS: &str = "api/uploads";
const START_SCAN: &str = "api/scans";

/// Error label for archive uploads. The pre-signed URL carries a signature.
const UPLOAD_ENDPOINT: &str = "upload";
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(600);

/// Authenticated view over the SCA REST API.
///
/// Obtained from [`ScaClient::sca`](crate::ScaClient::sca); holds the token
/// that was current when it was handed out.
#[derive(Debug)]
pub struct ApiClient<'a> {
    session: Session<'a>,
}

impl<'a> ApiClient<'a> {
    pub(crate) const fn new(session: Session<'a>) -> Self {
        Self { session }
    }

    /// Lists every project in the tenant.
    pub async fn projects(&self) -> Result<Vec<Project>> {
        self.session.get(PROJECTS).await
    }

    /// Fetches one project by id.
    pub async fn project(&self, project_id: Uuid) -> Result<Project> {
        self.session.get(&format!("{PROJECTS}/{project_id}")).await
    }

    /// Fetches one project by its exact name.
    pub async fn project_by_name(&self, name: &str) -> Result<Project> {
        self.session.get_with_query(PROJECTS, &[("name", name)]).await
    }

    /// Creates a project and returns it as stored.
    pub async fn create_project(&self, project: &CreateProject) -> Result<Project> {
        self.session.post(PROJECTS, project).await
    }

    /// Reads a project's settings.
    pub async fn project_settings(&self, project_id: Uuid) -> Result<ProjectSettings> {
        self.session
            .get(&format!("{PROJECTS}/{project_id}/project-settings"))
            .await
    }

    /// Replaces a project's settings.
    pub async fn update_project_settings(&self, project_id: Uuid, settings: &ProjectSettings) -> Result<()> {
        self.session
            .put_empty(&format!("{PROJECTS}/{project_id}/project-settings"), settings)
            .await
    }

    /// Lists a project's scans in the order the server returns them.
    pub async fn scans_for_project(&self, project_id: Uuid) -> Result<Vec<Scan>> {
        self.session
            .get_with_query(SCANS, &[("projectId", project_id.to_string())])
            .await
    }

    /// Fetches one scan by id.
    pub async fn scan(&self, scan_id: Uuid) -> Result<Scan> {
        self.session.get(&format!("{SCANS}/{scan_id}")).await
    }

    /// Lists the packages a scan found.
    pub async fn packages(&self, scan_id: Uuid) -> Result<Vec<Package>> {
        self.session.get(&format!("{RISK_REPORTS}/{scan_id}/packages")).await
    }

    /// Lists the vulnerabilities a scan found.
    pub async fn vulnerabilities(&self, scan_id: Uuid) -> Result<Vec<Vulnerability>> {
        self.session
            .get(&format!("{RISK_REPORTS}/{scan_id}/vulnerabilities"))
            .await
    }

    /// Lists a project's risk reports, newest first, optionally capped at `size`.
    pub async fn risk_reports(&self, project_id: Uuid, size: Option<u32>) -> Result<Vec<RiskReport>> {
        let mut query = vec![("projectId", project_id.to_string())];
        if let Some(size) = size {
            query.push(("size", size.to_string()));
        }
        self.session.get_with_query(RISK_REPORTS, &query).await
    }

    /// Lists the triage states recorded for a project.
    pub async fn package_states(&self, project_id: Uuid) -> Result<Vec<PackageState>> {
        self.session.get(&format!("{RISK_STATE}/{project_id}")).await
    }

    /// Records the triage state of one vulnerability of one package.
    pub async fn update_package_state(&self, state: &PackageState) -> Result<()> {
        self.session.post_empty(RISK_STATE, state).await
    }

    /// Requests a pre-signed URL to upload a source archive to.
    pub async fn generate_upload_link(&self, project_id: Uuid) -> Result<UploadLink> {
        self.session
            .post(UPLOADS, &serde_json::json!({ "projectId": project_id }))
            .await
    }

    /// Uploads archive bytes to a URL from [`generate_upload_link`](Self::generate_upload_link).
    pub async fn upload_archive(&self, upload_url: &str, archive: Vec<u8>) -> Result<()> {
        let request = self
            .session
            .http()
            .put(upload_url)
            .header(reqwest::header::CONTENT_TYPE, "application/zip")
            .timeout(UPLOAD_TIMEOUT)
            .body(archive);

        check(request, "PUT", UPLOAD_ENDPOINT).await.map(drop)
    }

    /// Starts a scan.
    pub async fn start_scan(&self, request: &ScanRequest) -> Result<ScanStarted> {
        self.session.post(START_SCAN, request).await
    }
}
