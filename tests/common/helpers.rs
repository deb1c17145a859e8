use bookstore_api_automation::AuthFixture;
use bookstore_api_automation::clients::{BookshelfClient, CatalogClient};
use bookstore_api_automation::configuration::AccountSettings;
use bookstore_api_automation::domain::Token;
use bookstore_api_automation::reporting::TestReport;
use bookstore_api_automation::telemetry::{get_subscriber, init_subscriber};
use fake::Fake;
use fake::faker::internet::en::{Password, Username};
use secrecy::Secret;
use std::sync::{Arc, LazyLock};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ACCOUNT_PATH: &str = "/Account/v1";
pub const BOOKSTORE_PATH: &str = "/BookStore/v1";
pub const TEST_TIMEOUT: Duration = Duration::from_secs(2);

// Ensure that the `tracing` stack is only initialised once using `LazyLock`
static TRACING: LazyLock<()> = LazyLock::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    // The sink is part of the type returned by `get_subscriber`, hence the
    // two branches.
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub fn init_tracing() {
    LazyLock::force(&TRACING);
}

/// A wiremock stand-in for both the account and the bookstore services,
/// mounted under their real base paths.
pub struct MockBookstore {
    pub server: MockServer,
}

impl MockBookstore {
    pub async fn start() -> Self {
        init_tracing();
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn account_url(&self) -> String {
        format!("{}{}", self.server.uri(), ACCOUNT_PATH)
    }

    pub fn bookstore_url(&self) -> String {
        format!("{}{}", self.server.uri(), BOOKSTORE_PATH)
    }

    pub fn books_path(&self) -> String {
        format!("{}/Books", BOOKSTORE_PATH)
    }

    pub fn book_path(&self) -> String {
        format!("{}/Book", BOOKSTORE_PATH)
    }

    pub fn account_settings(&self) -> AccountSettings {
        AccountSettings {
            base_url: self.account_url(),
            username: Username().fake(),
            password: Secret::new(Password(8..16).fake()),
        }
    }

    /// Answer every token request with `token`, expecting exactly `times` calls.
    pub async fn mount_token(&self, token: &str, times: u64) {
        Mock::given(method("POST"))
            .and(path(format!("{}/GenerateToken", ACCOUNT_PATH)))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token": token,
                "expires": "2026-10-23T10:00:00.000Z",
                "status": "Success",
                "result": "User authorized successfully."
            })))
            .expect(times)
            .named("Generate token")
            .mount(&self.server)
            .await;
    }

    pub fn auth_fixture(&self) -> AuthFixture {
        AuthFixture::new(self.account_settings()).with_timeout(TEST_TIMEOUT)
    }

    pub fn catalog_client(&self, token: &Token, report: &Arc<TestReport>) -> CatalogClient {
        CatalogClient::new(self.bookstore_url(), token, TEST_TIMEOUT)
            .expect("Failed to build the catalog client.")
            .with_report(report.clone())
    }

    pub fn bookshelf_client(&self, token: &Token, report: &Arc<TestReport>) -> BookshelfClient {
        BookshelfClient::new(self.bookstore_url(), token, TEST_TIMEOUT)
            .expect("Failed to build the bookshelf client.")
            .with_report(report.clone())
    }
}

pub fn test_token() -> Token {
    Token::new(Username().fake(), None)
}
