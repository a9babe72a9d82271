//! Credentials and bearer-token acquisition.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use crate::error::{Result, ScaError};

/// Path of the OpenID token endpoint, relative to the access-control URL.
pub const TOKEN_PATH: &str = "identity/connect/token";

const CLIENT_ID: &str = "sca_resource_owner";
const SCOPE: &str = "sca_api access_control_api";

/// How long an acquired token is treated as valid, in minutes.
pub const TOKEN_LIFETIME_MINUTES: i64 = 60;

/// Remaining validity, in minutes, below which the token is re-acquired.
pub const REFRESH_MARGIN_MINUTES: i64 = 5;

/// Tenant-scoped user credentials for the password grant.
#[derive(Clone)]
pub struct Credentials {
    tenant: String,
    username: String,
    password: String,
}

impl Credentials {
    /// Creates credentials, rejecting empty fields.
    pub fn new(tenant: impl Into<String>, username: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        let credentials = Self {
            tenant: tenant.into(),
            username: username.into(),
            password: password.into(),
        };

        if credentials.tenant.is_empty() {
            return Err(ScaError::invalid("tenant", "must not be empty"));
        }
        if credentials.username.is_empty() {
            return Err(ScaError::invalid("username", "must not be empty"));
        }
        if credentials.password.is_empty() {
            return Err(ScaError::invalid("password", "must not be empty"));
        }

        Ok(credentials)
    }

    /// Returns the tenant name.
    #[must_use]
    pub fn tenant(&self) -> &str {
        &self.tenant
    }

    /// Returns the user name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    fn form(&self) -> [(&'static str, String); 6] {
        [
            ("grant_type", "password".to_string()),
            ("client_id", CLIENT_ID.to_string()),
            ("scope", SCOPE.to_string()),
            ("username", self.username.clone()),
            ("password", self.password.clone()),
            ("acr_values", format!("Tenant:{}", self.tenant)),
        ]
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("tenant", &self.tenant)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A bearer token together with its validity window.
#[derive(Clone)]
pub struct BearerToken {
    value: String,
    acquired_at: DateTime<Utc>,
    valid_until: DateTime<Utc>,
}

impl BearerToken {
    /// Wraps a raw token acquired at `acquired_at`.
    #[must_use]
    pub fn new(value: impl Into<String>, acquired_at: DateTime<Utc>) -> Self {
        Self {
            value: value.into(),
            acquired_at,
            valid_until: acquired_at + Duration::minutes(TOKEN_LIFETIME_MINUTES),
        }
    }

    /// Returns the raw token for the `Authorization` header.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns when the token was obtained.
    #[must_use]
    pub const fn acquired_at(&self) -> DateTime<Utc> {
        self.acquired_at
    }

    /// Returns the end of the validity window.
    #[must_use]
    pub const fn valid_until(&self) -> DateTime<Utc> {
        self.valid_until
    }

    /// Returns `true` once fewer than [`REFRESH_MARGIN_MINUTES`] remain at `now`.
    #[must_use]
    pub fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        self.valid_until - now < Duration::minutes(REFRESH_MARGIN_MINUTES)
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerToken")
            .field("acquired_at", &self.acquired_at)
            .field("valid_until", &self.valid_until)
            .finish_non_exhaustive()
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

/// Exchanges credentials for a bearer token at `{access_control_url}/identity/connect/token`.
///
/// Any status other than 200 is returned as [`ScaError::Authentication`]
/// with the raw response body.
pub async fn authenticate(
    http: &reqwest::Client,
    access_control_url: &str,
    credentials: &Credentials,
) -> Result<BearerToken> {
    let url = format!("{access_control_url}/{TOKEN_PATH}");

    #[cfg(feature = "tracing")]
    tracing::debug!(tenant = %credentials.tenant, username = %credentials.username, "requesting bearer token");

    let response = http.post(&url).form(&credentials.form()).send().await?;
    let status = response.status();

    if status != reqwest::StatusCode::OK {
        let body = response.text().await?;
        return Err(ScaError::Authentication {
            status: status.as_u16(),
            body,
        });
    }

    let token: TokenResponse = response.json().await?;
    let value = token
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or(ScaError::MissingAccessToken)?;

    Ok(BearerToken::new(value, Utc::now()))
}
