use crate::common::{
    GIT_POCKET_GUIDE_ISBN, INVALID_ISBN, ISBN_NOT_AVAILABLE_CODE, ISBN_NOT_AVAILABLE_MESSAGE,
    function_name,
};
use crate::suite::{LiveTest, catalog_case};
use bookstore_api_automation::domain::{Book, ErrorResponse};
use bookstore_api_automation::reporting::{AssertionSummary, Severity};
use reqwest::StatusCode;

#[tokio::test]
async fn list_books_returns_a_non_empty_catalog() {
    let test = LiveTest::start(
        catalog_case(
            "GET /Books - When books exist, should return book list",
            function_name!(),
        )
        .story("Retrieve All Books")
        .severity(Severity::Normal)
        .tags(["API", "Regression", "Catalog"]),
    )
    .await;

    let books = test
        .catalog
        .list_books()
        .await
        .unwrap_or_else(|e| panic!("{:?}", e));

    let summary = AssertionSummary::new().add("Books Count > 0", true, !books.is_empty());
    test.report.assertions(&summary);
    assert!(summary.all_passed(), "{}", summary);
}

#[tokio::test]
async fn every_catalog_entry_honours_the_data_contract() {
    let test = LiveTest::start(
        catalog_case(
            "GET /Books - When called, should return valid catalog structure",
            function_name!(),
        )
        .story("Validate Catalog Data Contract")
        .severity(Severity::Critical)
        .tags(["API", "Contract", "Schema"]),
    )
    .await;
    test.report.arrange::<()>("Catalog structure validation", None);

    let books = test
        .catalog
        .list_books()
        .await
        .unwrap_or_else(|e| panic!("{:?}", e));

    let incomplete: Vec<(String, Vec<&str>)> = books
        .iter()
        .filter(|book| !book.is_complete())
        .map(|book| (book.isbn.clone(), book.missing_fields()))
        .collect();
    let summary = AssertionSummary::new()
        .add("Books Count > 0", true, !books.is_empty())
        .add("Validated Books", books.len(), books.len() - incomplete.len())
        .add("All Fields Present", true, incomplete.is_empty());
    test.report.assertions(&summary);
    assert!(summary.all_passed(), "{}\nIncomplete entries: {:?}", summary, incomplete);
}

#[tokio::test]
async fn get_book_by_valid_isbn_returns_the_book() {
    let test = LiveTest::start(
        catalog_case(
            "GET /Book?ISBN=valid - When ISBN is valid, should return book",
            function_name!(),
        )
        .story("Retrieve Book Details")
        .severity(Severity::Normal)
        .tags(["API", "Regression", "Catalog"]),
    )
    .await;
    test.report.arrange(
        "Valid ISBN request",
        Some(&serde_json::json!({ "ISBN": GIT_POCKET_GUIDE_ISBN })),
    );

    let response = test
        .catalog
        .get_book_by_isbn(GIT_POCKET_GUIDE_ISBN)
        .await
        .unwrap_or_else(|e| panic!("{:?}", e));

    assert!(!response.body.is_empty());
    let book: Book = response.json().unwrap_or_else(|e| panic!("{:?}", e));
    let summary = AssertionSummary::new()
        .add("Status Code", StatusCode::OK, response.status)
        .add("ISBN", GIT_POCKET_GUIDE_ISBN, &book.isbn);
    test.report.assertions(&summary);
    assert!(summary.all_passed(), "{}", summary);
}

#[tokio::test]
async fn get_book_by_invalid_isbn_returns_bad_request() {
    let test = LiveTest::start(
        catalog_case(
            "GET /Book?ISBN=invalid - When ISBN is invalid, should return bad request",
            function_name!(),
        )
        .story("Handle Invalid Book Lookup")
        .severity(Severity::Critical)
        .tags(["API", "Negative", "Validation"]),
    )
    .await;
    test.report.arrange(
        "Invalid ISBN request",
        Some(&serde_json::json!({ "ISBN": INVALID_ISBN })),
    );

    let response = test
        .catalog
        .get_book_by_isbn(INVALID_ISBN)
        .await
        .unwrap_or_else(|e| panic!("{:?}", e));

    let error: ErrorResponse = response.json().unwrap_or_else(|e| panic!("{:?}", e));
    let summary = AssertionSummary::new()
        .add("Status Code", StatusCode::BAD_REQUEST, response.status)
        .add("Error Code", ISBN_NOT_AVAILABLE_CODE, &error.code)
        .add("Error Message", ISBN_NOT_AVAILABLE_MESSAGE, &error.message);
    test.report.assertions(&summary);
    assert!(summary.all_passed(), "{}", summary);
}
