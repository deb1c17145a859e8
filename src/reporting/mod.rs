//! Report attachments for test cases: arrange data, API calls and
//! assertion summaries, grouped in named steps and written out as Allure
//! results.
//!
//! Nothing here is asserted on by the suite. Attachment serialization never
//! fails: values that cannot be turned into JSON fall back to their `Debug`
//! rendering.

mod allure;
mod assertions;
mod report;

pub use allure::{AllureResultsWriter, ReportError};
pub use assertions::{AssertionRecord, AssertionSummary};
pub use report::{
    Attachment, ContentType, Label, Severity, Status, Step, TestReport, TestResult,
};

/// Pretty JSON for an attachment, or the `Debug` output if serialization fails.
pub fn to_pretty_json<T>(value: &T) -> String
where
    T: serde::Serialize + std::fmt::Debug + ?Sized,
{
    serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Attachment is not serializable, using its debug output");
        format!("{:?}", value)
    })
}
