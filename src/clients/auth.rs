use crate::clients::ClientError;
use crate::domain::{Credentials, GenerateTokenRequest, Token, TokenResponse};
use crate::http_client::RestClient;
use reqwest::Method;
use secrecy::ExposeSecret;
use std::time::Duration;

const GENERATE_TOKEN_PATH: &str = "/GenerateToken";

/// Client for the account service. Token generation is the only call that
/// goes out without a bearer token.
#[derive(Clone, Debug)]
pub struct AuthClient {
    http_client: RestClient,
}

impl AuthClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        Ok(Self {
            http_client: RestClient::new(base_url, None, timeout)?,
        })
    }

    /// Exchange credentials for a bearer token.
    ///
    /// Errors with `ClientError::Authentication`, carrying the status and raw
    /// body, when the status is not 2xx or the body holds no token.
    #[tracing::instrument(
        name = "Generating token",
        skip(self, credentials),
        fields(username = %credentials.username)
    )]
    pub async fn generate_token(&self, credentials: &Credentials) -> Result<Token, ClientError> {
        let body = GenerateTokenRequest {
            user_name: &credentials.username,
            password: credentials.password.expose_secret(),
        };
        let response = self
            .http_client
            .execute(
                self.http_client
                    .request(Method::POST, GENERATE_TOKEN_PATH)
                    .json(&body),
            )
            .await?;

        let parsed = if response.is_success() {
            serde_json::from_str::<TokenResponse>(&response.body).ok()
        } else {
            None
        };
        match parsed.map(Token::try_from) {
            Some(Ok(token)) => Ok(token),
            _ => {
                tracing::error!(status = response.status.as_u16(), "Failed to generate token");
                Err(ClientError::Authentication {
                    status: response.status,
                    body: response.body,
                })
            }
        }
    }
}
