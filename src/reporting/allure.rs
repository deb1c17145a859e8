//! Allure results writer.
//!
//! Writes one `<uuid>-result.json` per test case and one
//! `<uuid>-attachment.<ext>` per attachment, the layout `allure generate`
//! reads from a results directory.

use crate::reporting::{Attachment, Label, Status, Step, TestResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(thiserror::Error)]
pub enum ReportError {
    #[error("Failed to write {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize the test result")]
    Serialization(#[from] serde_json::Error),
}

impl std::fmt::Debug for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        crate::telemetry::error_chain_fmt(self, f)
    }
}

#[derive(Debug, Clone)]
pub struct AllureResultsWriter {
    results_dir: PathBuf,
}

impl AllureResultsWriter {
    pub fn new(results_dir: impl Into<PathBuf>) -> Self {
        Self {
            results_dir: results_dir.into(),
        }
    }

    /// Write the result and its attachments, returning the path of the
    /// result file.
    #[tracing::instrument(
        name = "Writing Allure result",
        skip(self, result),
        fields(test_name = %result.name, status = ?result.status)
    )]
    pub fn write(&self, result: &TestResult) -> Result<PathBuf, ReportError> {
        std::fs::create_dir_all(&self.results_dir).map_err(|source| ReportError::Io {
            path: self.results_dir.clone(),
            source,
        })?;

        let mut steps = Vec::with_capacity(result.steps.len());
        for step in &result.steps {
            steps.push(self.write_step(step)?);
        }

        let allure_result = AllureResult {
            uuid: result.uuid.to_string(),
            history_id: result.full_name.clone(),
            name: result.name.clone(),
            full_name: result.full_name.clone(),
            status: result.status,
            stage: "finished",
            start: millis(result.start),
            stop: millis(result.stop),
            labels: result.labels.iter().map(AllureLabel::from).collect(),
            steps,
        };
        let content = serde_json::to_string_pretty(&allure_result)?;
        let path = self
            .results_dir
            .join(format!("{}-result.json", result.uuid));
        self.write_file(&path, content)?;
        Ok(path)
    }

    fn write_step<'a>(&self, step: &'a Step) -> Result<AllureStep<'a>, ReportError> {
        let mut attachments = Vec::with_capacity(step.attachments.len());
        for attachment in &step.attachments {
            attachments.push(self.write_attachment(attachment)?);
        }
        Ok(AllureStep {
            name: &step.name,
            status: step.status,
            stage: "finished",
            start: millis(step.start),
            stop: millis(step.stop),
            attachments,
        })
    }

    fn write_attachment<'a>(
        &self,
        attachment: &'a Attachment,
    ) -> Result<AllureAttachment<'a>, ReportError> {
        let source = format!(
            "{}-attachment.{}",
            Uuid::new_v4(),
            attachment.content_type.extension()
        );
        self.write_file(&self.results_dir.join(&source), &attachment.content)?;
        Ok(AllureAttachment {
            name: &attachment.name,
            source,
            mime_type: attachment.content_type.mime_type(),
        })
    }

    fn write_file(&self, path: &Path, content: impl AsRef<[u8]>) -> Result<(), ReportError> {
        std::fs::write(path, content).map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn millis(timestamp: DateTime<Utc>) -> i64 {
    timestamp.timestamp_millis()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AllureResult<'a> {
    uuid: String,
    history_id: String,
    name: String,
    full_name: String,
    status: Status,
    stage: &'static str,
    start: i64,
    stop: i64,
    labels: Vec<AllureLabel<'a>>,
    steps: Vec<AllureStep<'a>>,
}

#[derive(Serialize)]
struct AllureLabel<'a> {
    name: &'a str,
    value: &'a str,
}

impl<'a> From<&'a Label> for AllureLabel<'a> {
    fn from(label: &'a Label) -> Self {
        Self {
            name: &label.name,
            value: &label.value,
        }
    }
}

#[derive(Serialize)]
struct AllureStep<'a> {
    name: &'a str,
    status: Status,
    stage: &'static str,
    start: i64,
    stop: i64,
    attachments: Vec<AllureAttachment<'a>>,
}

#[derive(Serialize)]
struct AllureAttachment<'a> {
    name: &'a str,
    source: String,
    #[serde(rename = "type")]
    mime_type: &'static str,
}
