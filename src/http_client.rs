use crate::clients::ClientError;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Base client shared by the domain clients: one server, one optional
/// bearer token, one fixed timeout.
#[derive(Clone, Debug)]
pub struct RestClient {
    base_url: String,
    http_client: Client,
    bearer_token: Option<Secret<String>>,
}

/// Status and raw body of a completed round-trip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RestClient {
    pub fn new(
        base_url: impl Into<String>,
        bearer_token: Option<Secret<String>>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into(),
            http_client,
            bearer_token,
        })
    }

    /// Resolve `path` against the base URL. The base URL's own path is kept,
    /// so `https://host/Account/v1` + `/GenerateToken` stays under `/Account/v1`.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http_client.request(method, self.url(path));
        match &self.bearer_token {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    /// Send the request and capture the response whatever its status.
    /// Only transport failures (connection, timeout, unreadable body) are errors.
    pub async fn execute(&self, request: RequestBuilder) -> Result<ApiResponse, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(status = status.as_u16(), body_length = body.len(), "Received response");
        Ok(ApiResponse { status, body })
    }
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        serde_json::from_str(&self.body).map_err(|source| ClientError::Deserialization {
            status: self.status,
            source,
        })
    }
}
