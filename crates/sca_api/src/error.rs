use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by the SCA client.
#[derive(Debug, Error)]
pub enum ScaError {
    /// The HTTP client could not be initialised.
    #[error("failed to initialize HTTP client: {0}")]
    ClientInit(String),

    /// The request never produced a response (connection, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The identity service rejected the credentials.
    #[error("authentication failed with status {status}: {body}")]
    Authentication {
        /// HTTP status returned by the token endpoint.
        status: u16,
        /// Raw response body, as sent by the server.
        body: String,
    },

    /// A response body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The token endpoint answered 200 but without an `access_token`.
    #[error("token response did not contain an access token")]
    MissingAccessToken,

    /// An API endpoint answered with a non-success status.
    #[error("{method} {endpoint} returned {status}: {body}")]
    Api {
        /// HTTP method of the failed request.
        method: &'static str,
        /// Endpoint path, relative to the service base URL, or `upload`
        /// for archive uploads.
        endpoint: String,
        /// HTTP status returned by the server.
        status: u16,
        /// Raw response body, as sent by the server.
        body: String,
    },

    /// A caller-supplied argument was rejected before any request was made.
    #[error("invalid argument '{name}': {reason}")]
    InvalidArgument {
        /// Name of the offending argument.
        name: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// A base URL or repository URL could not be parsed.
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The URL as supplied.
        url: String,
        /// Parser message.
        reason: String,
    },

    /// A local file needed by the request could not be read.
    #[error("failed to read '{path}': {source}")]
    Io {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ScaError {
    /// Returns the HTTP status associated with this error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { status, .. } | Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}

/// Convenience alias for results returned by this crate.
pub type Result<T, E = ScaError> = std::result::Result<T, E>;
