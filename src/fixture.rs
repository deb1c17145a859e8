use crate::clients::{AuthClient, ClientError};
use crate::configuration::{AccountSettings, ConfigurationError, Settings, get_configuration};
use crate::domain::{Credentials, Token};
use crate::http_client::DEFAULT_TIMEOUT;
use crate::telemetry::error_chain_fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;

#[derive(thiserror::Error)]
pub enum FixtureError {
    #[error("Authentication fixture is not configured")]
    Configuration(#[from] ConfigurationError),
    #[error("Failed to obtain an authentication token")]
    Authentication(#[source] ClientError),
}

impl std::fmt::Debug for FixtureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureState {
    Uninitialized,
    Ready,
    /// Initialization ran and failed; no token will ever be handed out.
    Failed,
}

/// Obtains one bearer token for a whole test collection.
///
/// The first caller of [`AuthFixture::token`] performs the exchange; every
/// other caller waits for it and then observes the same outcome, token or
/// error. A failed initialization is not retried.
#[derive(Debug)]
pub struct AuthFixture {
    settings: Result<AccountSettings, ConfigurationError>,
    timeout: Duration,
    token: OnceCell<Result<Token, Arc<FixtureError>>>,
}

impl AuthFixture {
    pub fn new(settings: AccountSettings) -> Self {
        Self::with_settings(Ok(settings), DEFAULT_TIMEOUT)
    }

    /// Build the fixture from the process configuration.
    pub fn from_environment() -> Self {
        Self::from_configuration(get_configuration())
    }

    /// A configuration error is kept and reported by the first call to
    /// `token`, before any network call.
    pub fn from_configuration(configuration: Result<Settings, ConfigurationError>) -> Self {
        match configuration {
            Ok(settings) => {
                let timeout = settings.request_timeout();
                Self::with_settings(Ok(settings.account), timeout)
            }
            Err(e) => Self::with_settings(Err(e), DEFAULT_TIMEOUT),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn with_settings(
        settings: Result<AccountSettings, ConfigurationError>,
        timeout: Duration,
    ) -> Self {
        Self {
            settings,
            timeout,
            token: OnceCell::new(),
        }
    }

    pub fn state(&self) -> FixtureState {
        match self.token.get() {
            None => FixtureState::Uninitialized,
            Some(Ok(_)) => FixtureState::Ready,
            Some(Err(_)) => FixtureState::Failed,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.state() == FixtureState::Ready
    }

    pub async fn token(&self) -> Result<&Token, Arc<FixtureError>> {
        self.token
            .get_or_init(|| async { self.initialize().await.map_err(Arc::new) })
            .await
            .as_ref()
            .map_err(Arc::clone)
    }

    #[tracing::instrument(name = "Initializing authentication fixture", skip(self))]
    async fn initialize(&self) -> Result<Token, FixtureError> {
        let settings = self.settings.clone()?;
        let credentials = Credentials::from(&settings);
        let client =
            AuthClient::new(&settings.base_url, self.timeout).map_err(FixtureError::Authentication)?;
        let token = client
            .generate_token(&credentials)
            .await
            .map_err(FixtureError::Authentication)?;
        tracing::info!(expires = ?token.expires(), "Authentication fixture is ready");
        Ok(token)
    }
}
