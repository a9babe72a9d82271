//! The `ScaClient` wrapper: token cache plus the core helper operations.

use std::path::Path;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::access_control::AccessControlClient;
use crate::api::ApiClient;
use crate::auth::{BearerToken, Credentials, authenticate};
use crate::error::{Result, ScaError};
use crate::index::NameIndex;
use crate::models::{PackageState, Project, ProjectSettings, Scan, ScanRequest, ScanStarted};
use crate::transport::Session;
use crate::{NOT_EXPLOITABLE_STATE, USER_AGENT};

/// Default access-control (identity) service.
pub const DEFAULT_ACCESS_CONTROL_URL: &str = "https://platform.checkmarx.net";
/// Default SCA REST API.
pub const DEFAULT_API_URL: &str = "https://api-sca.checkmarx.net";
/// Default web console, used for deep links.
pub const DEFAULT_WEB_URL: &str = "https://sca.checkmarx.net";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for one tenant of the SCA service.
///
/// Holds the credentials and a lazily refreshed bearer token shared by the
/// REST API and the access-control API. Every call that needs the token
/// checks its validity window first and re-authenticates when it is about to
/// expire.
pub struct ScaClient {
    http: reqwest::Client,
    credentials: Credentials,
    access_control_url: String,
    api_url: String,
    web_url: String,
    token: Mutex<Option<BearerToken>>,
}

/// Builder for [`ScaClient`] with non-default endpoints or HTTP settings.
#[derive(Debug)]
pub struct ScaClientBuilder {
    credentials: Credentials,
    access_control_url: String,
    api_url: String,
    web_url: String,
    timeout: Duration,
    user_agent: String,
}

impl ScaClientBuilder {
    /// Overrides the access-control (identity) URL.
    #[must_use]
    pub fn access_control_url(mut self, url: impl Into<String>) -> Self {
        self.access_control_url = url.into();
        self
    }

    /// Overrides the REST API URL.
    #[must_use]
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Overrides the web console URL.
    #[must_use]
    pub fn web_url(mut self, url: impl Into<String>) -> Self {
        self.web_url = url.into();
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the `User-Agent` header.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Validates the endpoints and builds the client. No request is made.
    pub fn build(self) -> Result<ScaClient> {
        let access_control_url = normalise_url("access_control_url", &self.access_control_url)?;
        let api_url = normalise_url("api_url", &self.api_url)?;
        let web_url = normalise_url("web_url", &self.web_url)?;

        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent)
            .build()
            .map_err(|e| ScaError::ClientInit(e.to_string()))?;

        Ok(ScaClient {
            http,
            credentials: self.credentials,
            access_control_url,
            api_url,
            web_url,
            token: Mutex::new(None),
        })
    }
}

impl ScaClient {
    /// Creates a client against the default endpoints.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::builder(credentials).build()
    }

    /// Starts a builder with default endpoints and settings.
    #[must_use]
    pub fn builder(credentials: Credentials) -> ScaClientBuilder {
        ScaClientBuilder {
            credentials,
            access_control_url: DEFAULT_ACCESS_CONTROL_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            web_url: DEFAULT_WEB_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: USER_AGENT.to_string(),
        }
    }

    /// Returns the credentials in use.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the normalised web console URL.
    #[must_use]
    pub fn web_url(&self) -> &str {
        &self.web_url
    }

    /// Authenticates now, or reuses a token that is still valid.
    pub async fn connect(&self) -> Result<()> {
        self.bearer().await.map(drop)
    }

    /// Returns `true` if a token is cached and not yet due for refresh.
    pub async fn is_connected(&self) -> bool {
        self.token
            .lock()
            .await
            .as_ref()
            .is_some_and(|t| !t.needs_refresh(Utc::now()))
    }

    /// Returns the REST API client with a current token.
    pub async fn sca(&self) -> Result<ApiClient<'_>> {
        let token = self.bearer().await?;
        Ok(ApiClient::new(Session::new(&self.http, &self.api_url, token)))
    }

    /// Returns the access-control client with a current token.
    pub async fn access_control(&self) -> Result<AccessControlClient<'_>> {
        let token = self.bearer().await?;
        Ok(AccessControlClient::new(Session::new(
            &self.http,
            &self.access_control_url,
            token,
        )))
    }

    async fn bearer(&self) -> Result<String> {
        let mut cached = self.token.lock().await;

        if let Some(token) = cached.as_ref() {
            if !token.needs_refresh(Utc::now()) {
                return Ok(token.value().to_string());
            }

            #[cfg(feature = "tracing")]
            tracing::debug!(valid_until = %token.valid_until(), "bearer token near expiry, refreshing");
        }

        let token = authenticate(&self.http, &self.access_control_url, &self.credentials).await?;
        let value = token.value().to_string();
        *cached = Some(token);
        Ok(value)
    }

    #[cfg(test)]
    pub(crate) async fn seed_token(&self, token: BearerToken) {
        *self.token.lock().await = Some(token);
    }

    /// Lists projects keyed by name, ignoring case. The first of several
    /// projects sharing a name is kept.
    pub async fn projects_by_name(&self) -> Result<NameIndex<Project>> {
        let projects = self.sca().await?.projects().await?;
        Ok(NameIndex::build(projects, |p| p.name.as_str()))
    }

    /// Returns the project's scans whose status is `Done`.
    pub async fn successful_scans(&self, project_id: Uuid) -> Result<Vec<Scan>> {
        let scans = self.sca().await?.scans_for_project(project_id).await?;
        Ok(scans.into_iter().filter(Scan::is_done).collect())
    }

    /// Marks every vulnerability of `package_id` as not exploitable.
    ///
    /// Walks all successful scans of the project and posts one state update
    /// per vulnerability whose package matches. Returns the number of
    /// updates issued.
    pub async fn set_package_as_secure(&self, project_id: Uuid, package_id: &str) -> Result<usize> {
        if project_id.is_nil() {
            return Err(ScaError::invalid("project_id", "must not be nil"));
        }
        if package_id.trim().is_empty() {
            return Err(ScaError::invalid("package_id", "must not be blank"));
        }

        let project = self.sca().await?.project(project_id).await?;
        let mut updated = 0;

        for scan in self.successful_scans(project.id).await? {
            let api = self.sca().await?;
            let vulnerabilities = api.vulnerabilities(scan.scan_id).await?;

            for vulnerability in vulnerabilities.into_iter().filter(|v| v.package_id == package_id) {
                api.update_package_state(&PackageState {
                    package_id: package_id.to_string(),
                    vulnerability_id: vulnerability.id,
                    project_id,
                    state: NOT_EXPLOITABLE_STATE.to_string(),
                })
                .await?;
                updated += 1;
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(%project_id, package_id, updated, "package marked as secure");

        Ok(updated)
    }

    /// Turns on exploitable-path analysis for every project. Returns the
    /// number of projects updated.
    pub async fn enable_exploitable_path_for_all_projects(&self) -> Result<usize> {
        let projects = self.sca().await?.projects().await?;
        let settings = ProjectSettings {
            enable_exploitable_path: true,
        };

        for project in &projects {
            self.sca().await?.update_project_settings(project.id, &settings).await?;
        }

        Ok(projects.len())
    }

    /// Uploads a zipped source tree and starts a scan of it.
    pub async fn scan_with_source_code(&self, project_id: Uuid, archive: &Path) -> Result<ScanStarted> {
        if project_id.is_nil() {
            return Err(ScaError::invalid("project_id", "must not be nil"));
        }

        let bytes = tokio::fs::read(archive).await.map_err(|source| ScaError::Io {
            path: archive.to_path_buf(),
            source,
        })?;

        let api = self.sca().await?;
        let link = api.generate_upload_link(project_id).await?;
        api.upload_archive(&link.url, bytes).await?;
        api.start_scan(&ScanRequest::upload(project_id, link.url)).await
    }

    /// Starts a scan of a git repository cloned by the service.
    ///
    /// For private repositories, `api_key` is sent as the user part of the
    /// repository URL.
    pub async fn scan_with_git_repository(
        &self,
        project_id: Uuid,
        repository: &str,
        api_key: Option<&str>,
    ) -> Result<ScanStarted> {
        if project_id.is_nil() {
            return Err(ScaError::invalid("project_id", "must not be nil"));
        }

        let url = repository_url(repository, api_key)?;
        self.sca().await?.start_scan(&ScanRequest::git(project_id, url)).await
    }
}

impl std::fmt::Debug for ScaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScaClient")
            .field("tenant", &self.credentials.tenant())
            .field("access_control_url", &self.access_control_url)
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

fn normalise_url(name: &'static str, url: &str) -> Result<String> {
    if url.trim().is_empty() {
        return Err(ScaError::invalid(name, "must not be empty"));
    }

    let parsed = reqwest::Url::parse(url).map_err(|e| ScaError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ScaError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }

    Ok(url.trim_end_matches('/').to_string())
}

fn repository_url(repository: &str, api_key: Option<&str>) -> Result<String> {
    let mut url = reqwest::Url::parse(repository).map_err(|e| ScaError::InvalidUrl {
        url: repository.to_string(),
        reason: e.to_string(),
    })?;

    if let Some(key) = api_key.filter(|k| !k.is_empty()) {
        url.set_username(key).map_err(|()| ScaError::InvalidUrl {
            url: repository.to_string(),
            reason: "cannot carry credentials".to_string(),
        })?;
    }

    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use chrono::Duration as TimeDelta;
    use wiremock::matchers::{bearer_token, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn credentials() -> Credentials {
        Credentials::new("acme", "alice", "pw").unwrap()
    }

    fn client_for(server: &MockServer) -> ScaClient {
        ScaClient::builder(credentials())
            .access_control_url(server.uri())
            .api_url(server.uri())
            .build()
            .unwrap()
    }

    async fn mount_token(server: &MockServer, token: &str, expected_calls: u64) {
        Mock::given(method("POST"))
            .and(path("/identity/connect/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"access_token": token})))
            .expect(expected_calls)
            .mount(server)
            .await;
    }

    #[test]
    fn builder_rejects_empty_and_non_http_urls() {
        let empty = ScaClient::builder(credentials()).api_url("").build();
        assert!(matches!(empty, Err(ScaError::InvalidArgument { name: "api_url", .. })));

        let ftp = ScaClient::builder(credentials()).access_control_url("ftp://example.com").build();
        assert!(matches!(ftp, Err(ScaError::InvalidUrl { .. })));

        let garbage = ScaClient::builder(credentials()).web_url("not a url").build();
        assert!(matches!(garbage, Err(ScaError::InvalidUrl { .. })));
    }

    #[test]
    fn builder_trims_trailing_slash() {
        let client = ScaClient::builder(credentials())
            .web_url("https://sca.example.com/")
            .build()
            .unwrap();

        assert_eq!(client.web_url(), "https://sca.example.com");
    }

    #[test]
    fn default_client_uses_vendor_endpoints() {
        let client = ScaClient::new(credentials()).unwrap();
        let rendered = format!("{client:?}");

        assert!(rendered.contains(DEFAULT_API_URL));
        assert!(rendered.contains(DEFAULT_ACCESS_CONTROL_URL));
        assert!(!rendered.contains("pw"));
    }

    #[test]
    fn repository_url_embeds_api_key() {
        let url = repository_url("https://github.com/acme/private.git", Some("ghp_token")).unwrap();
        assert_eq!(url, "https://ghp_token@github.com/acme/private.git");

        let public = repository_url("https://github.com/WebGoat/WebGoat.git", None).unwrap();
        assert_eq!(public, "https://github.com/WebGoat/WebGoat.git");
    }

    #[tokio::test]
    async fn connect_caches_token_across_calls() {
        let server = MockServer::start().await;
        mount_token(&server, "tok-1", 1).await;

        Mock::given(method("GET"))
            .and(path("/risk-management/projects"))
            .and(bearer_token("tok-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(2)
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(!client.is_connected().await);

        client.connect().await.unwrap();
        assert!(client.is_connected().await);

        client.sca().await.unwrap().projects().await.unwrap();
        client.sca().await.unwrap().projects().await.unwrap();
    }

    #[tokio::test]
    async fn expiring_token_is_refreshed() {
        let server = MockServer::start().await;
        mount_token(&server, "fresh", 1).await;

        Mock::given(method("GET"))
            .and(path("/risk-management/projects"))
            .and(bearer_token("fresh"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client
            .seed_token(BearerToken::new("stale", Utc::now() - TimeDelta::minutes(58)))
            .await;

        client.sca().await.unwrap().projects().await.unwrap();
    }

    #[tokio::test]
    async fn valid_seeded_token_skips_authentication() {
        let server = MockServer::start().await;
        mount_token(&server, "unused", 0).await;

        Mock::given(method("GET"))
            .and(path("/risk-management/projects"))
            .and(bearer_token("seeded"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.seed_token(BearerToken::new("seeded", Utc::now())).await;

        client.sca().await.unwrap().projects().await.unwrap();
    }

    #[tokio::test]
    async fn failed_authentication_leaves_client_disconnected() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/identity/connect/token"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid_client"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.connect().await.unwrap_err();

        assert_eq!(err.status(), Some(401));
        assert!(err.to_string().contains("invalid_client"));
        assert!(!client.is_connected().await);
    }

    #[tokio::test]
    async fn set_package_as_secure_validates_arguments_before_any_request() {
        let server = MockServer::start().await;
        mount_token(&server, "unused", 0).await;
        let client = client_for(&server);

        let nil = client.set_package_as_secure(Uuid::nil(), "pkg").await;
        assert!(matches!(nil, Err(ScaError::InvalidArgument { name: "project_id", .. })));

        let blank = client.set_package_as_secure(Uuid::new_v4(), "  ").await;
        assert!(matches!(blank, Err(ScaError::InvalidArgument { name: "package_id", .. })));
    }
}
