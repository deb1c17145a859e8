use crate::clients::{ClientError, record_call};
use crate::domain::{BookList, ErrorResponse, Token};
use crate::http_client::{ApiResponse, RestClient};
use crate::reporting::TestReport;
use reqwest::Method;
use std::sync::Arc;
use std::time::Duration;

const BOOKS_PATH: &str = "/Books";
const BOOK_PATH: &str = "/Book";

/// Client for the global catalog. Every call is attached to the report,
/// when one is set.
#[derive(Clone, Debug)]
pub struct CatalogClient {
    http_client: RestClient,
    report: Option<Arc<TestReport>>,
}

impl CatalogClient {
    pub fn new(
        base_url: impl Into<String>,
        token: &Token,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            http_client: RestClient::new(base_url, Some(token.secret()), timeout)?,
            report: None,
        })
    }

    pub fn with_report(mut self, report: Arc<TestReport>) -> Self {
        self.report = Some(report);
        self
    }

    /// List the whole catalog.
    ///
    /// A non-2xx status is unexpected here and becomes `ClientError::Fetch`
    /// with the server's message; no partial list is returned.
    #[tracing::instrument(name = "Listing books", skip(self))]
    pub async fn list_books(&self) -> Result<BookList, ClientError> {
        let endpoint = "GET /Books";
        let outcome = self
            .http_client
            .execute(self.http_client.request(Method::GET, BOOKS_PATH))
            .await;
        record_call::<()>(&self.report, None, &outcome, endpoint);

        let response = outcome?;
        if !response.is_success() {
            let message = response
                .json::<ErrorResponse>()
                .map(|e| e.message)
                .unwrap_or_else(|_| response.body.clone());
            tracing::error!(status = response.status.as_u16(), %message, "Failed to list books");
            return Err(ClientError::Fetch {
                endpoint,
                status: response.status,
                message,
            });
        }
        response.json()
    }

    /// Look a book up by ISBN.
    ///
    /// Never fails on status: 200 carries a `Book`, 400 an `ErrorResponse`.
    /// Only transport failures are errors.
    #[tracing::instrument(name = "Getting book by ISBN", skip(self))]
    pub async fn get_book_by_isbn(&self, isbn: &str) -> Result<ApiResponse, ClientError> {
        let outcome = self
            .http_client
            .execute(
                self.http_client
                    .request(Method::GET, BOOK_PATH)
                    .query(&[("ISBN", isbn)]),
            )
            .await;
        record_call(
            &self.report,
            Some(&serde_json::json!({ "ISBN": isbn })),
            &outcome,
            "GET /Book",
        );
        outcome
    }
}
