use crate::clients::{ClientError, record_call};
use crate::domain::{AddBookRequest, Token};
use crate::http_client::{ApiResponse, RestClient};
use crate::reporting::TestReport;
use reqwest::Method;
use std::sync::Arc;
use std::time::Duration;

const BOOKS_PATH: &str = "/Books";

/// Client for a user's bookshelf. Both operations return the raw response:
/// 4xx outcomes are expected and asserted on by callers.
#[derive(Clone, Debug)]
pub struct BookshelfClient {
    http_client: RestClient,
    report: Option<Arc<TestReport>>,
}

impl BookshelfClient {
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

    /// Remove every book from the user's collection.
    ///
    /// Used as setup, so an empty collection is not a failure: the response is
    /// returned as is and only transport failures are errors.
    #[tracing::instrument(name = "Deleting user books", skip(self))]
    pub async fn delete_user_books(&self, user_id: &str) -> Result<ApiResponse, ClientError> {
        let outcome = self
            .http_client
            .execute(
                self.http_client
                    .request(Method::DELETE, BOOKS_PATH)
                    .query(&[("UserId", user_id)]),
            )
            .await;
        record_call(
            &self.report,
            Some(&serde_json::json!({ "UserId": user_id })),
            &outcome,
            "DELETE /Books",
        );
        outcome
    }

    /// Add one or more books to the user's collection.
    ///
    /// 201 carries an `AddBookResponse`, 400 an `ErrorResponse` (duplicate or
    /// unknown ISBN). Only transport failures are errors.
    #[tracing::instrument(
        name = "Adding books",
        skip(self, request),
        fields(user_id = %request.user_id, isbn_count = request.collection_of_isbns.len())
    )]
    pub async fn add_book(&self, request: &AddBookRequest) -> Result<ApiResponse, ClientError> {
        let outcome = self
            .http_client
            .execute(
                self.http_client
                    .request(Method::POST, BOOKS_PATH)
                    .json(request),
            )
            .await;
        record_call(&self.report, Some(request), &outcome, "POST /Books");
        outcome
    }
}
