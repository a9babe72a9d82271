//! Authenticated request plumbing shared by the API and access-control clients.

use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Result, ScaError};

/// An HTTP client bound to one service base URL and one bearer token.
pub(crate) struct Session<'a> {
    http: &'a reqwest::Client,
    base: &'a str,
    token: String,
}

impl<'a> Session<'a> {
    pub(crate) const fn new(http: &'a reqwest::Client, base: &'a str, token: String) -> Self {
        Self { http, base, token }
    }

    pub(crate) const fn http(&self) -> &'a reqwest::Client {
        self.http
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        #[cfg(feature = "tracing")]
        tracing::debug!(%method, endpoint, "sending request");

        self.http
            .request(method, format!("{}/{endpoint}", self.base))
            .bearer_auth(&self.token)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let request = self.request(Method::GET, endpoint);
        decode(check(request, "GET", endpoint).await?).await
    }

    pub(crate) async fn get_with_query<T, Q>(&self, endpoint: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.request(Method::GET, endpoint).query(query);
        decode(check(request, "GET", endpoint).await?).await
    }

    pub(crate) async fn post<B, T>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, endpoint).json(body);
        decode(check(request, "POST", endpoint).await?).await
    }

    pub(crate) async fn post_empty<B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> Result<()> {
        let request = self.request(Method::POST, endpoint).json(body);
        check(request, "POST", endpoint).await.map(drop)
    }

    pub(crate) async fn put_empty<B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> Result<()> {
        let request = self.request(Method::PUT, endpoint).json(body);
        check(request, "PUT", endpoint).await.map(drop)
    }
}

impl std::fmt::Debug for Session<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").field("base", &self.base).finish_non_exhaustive()
    }
}

/// Sends the request and maps non-success statuses to [`ScaError::Api`].
pub(crate) async fn check(request: RequestBuilder, method: &'static str, endpoint: &str) -> Result<Response> {
    let response = request.send().await?;
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await?;

    #[cfg(feature = "tracing")]
    tracing::debug!(method, endpoint, status = status.as_u16(), "request failed");

    Err(ScaError::Api {
        method,
        endpoint: endpoint.to_string(),
        status: status.as_u16(),
        body,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response.bytes().await?;

    #[cfg(feature = "tracing")]
    tracing::trace!(len = bytes.len(), "response received");

    serde_json::from_slice(&bytes).map_err(ScaError::Decode)
}
