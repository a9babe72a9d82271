//! Client for the SCA (Software Composition Analysis) cloud service.
//!
//! [`ScaClient`] authenticates with a tenant's credentials, caches the bearer
//! token and refreshes it shortly before it expires. It hands out two typed
//! clients sharing that token:
//!
//! - [`ApiClient`] - projects, scans, packages, vulnerabilities and risk-state
//! - [`AccessControlClient`] - users, teams and roles
//!
//! On top of those it offers helpers that fan out across projects and scans,
//! such as [`ScaClient::set_package_as_secure`] and
//! [`ScaClient::project_packages`].
//!
//! # Error Handling
//!
//! Fallible operations return [`ScaError`]. Authentication failures and
//! non-success API responses carry the raw response body. Nothing is
//! retried.

/// Fan-out helpers over projects, scans and packages.
pub mod aggregate;
/// Typed endpoints of the access-control API.
pub mod access_control;
/// Typed endpoints of the SCA REST API.
pub mod api;
/// Credentials and bearer-token acquisition.
pub mod auth;
/// The token-caching client and its core operations.
pub mod client;
/// User configuration loaded from `.sca.toml`.
pub mod config;
/// Error type for client operations.
pub mod error;
/// Case-insensitive name lookup.
pub mod index;
/// Wire types.
pub mod models;
mod transport;

pub use access_control::AccessControlClient;
pub use aggregate::{ProjectActivity, ProjectPackages, development_packages, most_recent};
pub use api::ApiClient;
pub use auth::{BearerToken, Credentials};
pub use client::{ScaClient, ScaClientBuilder};
pub use config::{Config, ConfigError, Endpoints};
pub use error::{Result, ScaError};
pub use index::NameIndex;

/// Risk-state name for a vulnerability triaged as not exploitable.
pub const NOT_EXPLOITABLE_STATE: &str = "NotExploitable";

/// Risk-state name for a vulnerability awaiting triage.
pub const TO_VERIFY_STATE: &str = "ToVerify";

/// Scan status name of a successfully completed scan.
pub const SCAN_DONE: &str = "Done";

/// Default filename for client configuration.
pub const CONFIG_FILENAME: &str = ".sca.toml";

/// HTTP `User-Agent` header sent with every request.
pub(crate) const USER_AGENT: &str = concat!("sca-client/", env!("CARGO_PKG_VERSION"));
