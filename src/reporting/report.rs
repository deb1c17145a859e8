use crate::clients::ClientError;
use crate::http_client::ApiResponse;
use crate::reporting::{AssertionSummary, to_pretty_json};
use chrono::{DateTime, Utc};
use std::fmt::Debug;
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

#[derive(serde::Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Passed,
    Failed,
    Broken,
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Json,
    Text,
}

impl ContentType {
    pub fn mime_type(&self) -> &'static str {
        match self {
            ContentType::Json => "application/json",
            ContentType::Text => "text/plain",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ContentType::Json => "json",
            ContentType::Text => "txt",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Blocker,
    Critical,
    Normal,
    Minor,
    Trivial,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Blocker => "blocker",
            Severity::Critical => "critical",
            Severity::Normal => "normal",
            Severity::Minor => "minor",
            Severity::Trivial => "trivial",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub name: String,
    pub content_type: ContentType,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct Step {
    pub name: String,
    pub status: Status,
    pub attachments: Vec<Attachment>,
    pub start: DateTime<Utc>,
    pub stop: DateTime<Utc>,
}

impl Step {
    fn started(name: String) -> Self {
        let now = Utc::now();
        Self {
            name,
            status: Status::Passed,
            attachments: Vec::new(),
            start: now,
            stop: now,
        }
    }

    pub fn attach_json(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.attach(name, ContentType::Json, content);
    }

    pub fn attach_text(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.attach(name, ContentType::Text, content);
    }

    pub fn fail(&mut self) {
        self.status = Status::Failed;
    }

    fn attach(&mut self, name: impl Into<String>, content_type: ContentType, content: impl Into<String>) {
        self.attachments.push(Attachment {
            name: name.into(),
            content_type,
            content: content.into(),
        });
    }
}

/// The report context of one test case.
///
/// Shared behind an `Arc` between the test body and the domain clients it
/// drives; steps are appended in call order.
#[derive(Debug)]
pub struct TestReport {
    name: String,
    full_name: String,
    labels: Vec<Label>,
    started_at: DateTime<Utc>,
    steps: Mutex<Vec<Step>>,
}

/// Snapshot of a finished test case.
#[derive(Debug, Clone)]
pub struct TestResult {
    pub uuid: Uuid,
    pub name: String,
    pub full_name: String,
    pub status: Status,
    pub labels: Vec<Label>,
    pub steps: Vec<Step>,
    pub start: DateTime<Utc>,
    pub stop: DateTime<Utc>,
}

impl TestReport {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            full_name: name.clone(),
            name,
            labels: Vec::new(),
            started_at: Utc::now(),
            steps: Mutex::new(Vec::new()),
        }
    }

    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = full_name.into();
        self
    }

    pub fn label(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.push(Label {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn suite(self, value: impl Into<String>) -> Self {
        self.label("suite", value)
    }

    pub fn parent_suite(self, value: impl Into<String>) -> Self {
        self.label("parentSuite", value)
    }

    pub fn epic(self, value: impl Into<String>) -> Self {
        self.label("epic", value)
    }

    pub fn feature(self, value: impl Into<String>) -> Self {
        self.label("feature", value)
    }

    pub fn story(self, value: impl Into<String>) -> Self {
        self.label("story", value)
    }

    pub fn owner(self, value: impl Into<String>) -> Self {
        self.label("owner", value)
    }

    pub fn severity(self, severity: Severity) -> Self {
        self.label("severity", severity.as_str())
    }

    pub fn tags<I, S>(self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        tags.into_iter().fold(self, |report, tag| report.label("tag", tag))
    }

    pub fn steps(&self) -> Vec<Step> {
        self.lock_steps().clone()
    }

    /// Run `f` inside a new named step; whatever it attaches belongs to that step.
    pub fn add_step(&self, name: impl Into<String>, f: impl FnOnce(&mut Step)) {
        let mut step = Step::started(name.into());
        f(&mut step);
        step.stop = Utc::now();
        self.lock_steps().push(step);
    }

    pub fn arrange<T>(&self, step_name: impl Into<String>, data: Option<&T>)
    where
        T: serde::Serialize + Debug + ?Sized,
    {
        self.add_step(step_name, |step| {
            if let Some(data) = data {
                step.attach_json("Arrange Data", to_pretty_json(data));
            }
        });
    }

    pub fn attach_api_call<T>(&self, request: Option<&T>, response: &ApiResponse, endpoint: &str)
    where
        T: serde::Serialize + Debug + ?Sized,
    {
        self.add_step(format!("API Call - {}", endpoint), |step| {
            if let Some(request) = request {
                step.attach_json("Request Body", to_pretty_json(request));
            }
            step.attach_text("Response Info", response_info(response));
            if !response.body.is_empty() {
                match serde_json::from_str::<serde_json::Value>(&response.body) {
                    Ok(body) => step.attach_json("Response Body", to_pretty_json(&body)),
                    Err(_) => step.attach_text("Response Body", response.body.clone()),
                }
            }
        });
    }

    /// Same as `attach_api_call` for a call that never got a response.
    pub fn attach_api_failure<T>(&self, request: Option<&T>, error: &ClientError, endpoint: &str)
    where
        T: serde::Serialize + Debug + ?Sized,
    {
        self.add_step(format!("API Call - {}", endpoint), |step| {
            if let Some(request) = request {
                step.attach_json("Request Body", to_pretty_json(request));
            }
            step.attach_text("Error", format!("{:?}", error));
            step.status = Status::Broken;
        });
    }

    pub fn record_call<T>(
        &self,
        request: Option<&T>,
        outcome: &Result<ApiResponse, ClientError>,
        endpoint: &str,
    ) where
        T: serde::Serialize + Debug + ?Sized,
    {
        match outcome {
            Ok(response) => self.attach_api_call(request, response, endpoint),
            Err(error) => self.attach_api_failure(request, error, endpoint),
        }
    }

    pub fn assertions(&self, summary: &AssertionSummary) {
        let failed = summary.records().iter().filter(|r| !r.passed()).count();
        if failed > 0 {
            tracing::warn!(failed, total = summary.records().len(), "Assertions failed");
        }
        self.add_step("Validations", |step| {
            step.attach_text("Assertions", summary.render());
            if !summary.all_passed() {
                step.fail();
            }
        });
    }

    pub fn finish(&self, status: Status) -> TestResult {
        TestResult {
            uuid: Uuid::new_v4(),
            name: self.name.clone(),
            full_name: self.full_name.clone(),
            status,
            labels: self.labels.clone(),
            steps: self.steps(),
            start: self.started_at,
            stop: Utc::now(),
        }
    }

    fn lock_steps(&self) -> MutexGuard<'_, Vec<Step>> {
        self.steps.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn response_info(response: &ApiResponse) -> String {
    format!(
        "Status Code: {}\nStatus Description: {}\nContent Length: {}\n",
        response.status.as_u16(),
        response.status.canonical_reason().unwrap_or("Unknown"),
        response.body.len()
    )
}
