use crate::error::GradeError;
use chrono::{DateTime, FixedOffset};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Per-submission metadata written by the grading platform.
///
/// Only the fields the late policy needs are decoded; everything else in the
/// file is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionMetadata {
    /// Submission time as written by the platform (ISO-8601 with offset)
    pub created_at: String,
    pub assignment: Assignment,
    #[serde(default)]
    pub users: Vec<SubmissionUser>,
    #[serde(default)]
    pub previous_submissions: Vec<PreviousSubmission>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Assignment {
    pub due_date: String,
    #[serde(deserialize_with = "number_or_string")]
    pub total_points: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionUser {
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PreviousSubmission {
    #[serde(deserialize_with = "number_or_string")]
    pub score: f64,
}

impl SubmissionMetadata {
    pub fn submitted_at(&self) -> Result<DateTime<FixedOffset>, GradeError> {
        parse_timestamp("created_at", &self.created_at)
    }

    pub fn due_at(&self) -> Result<DateTime<FixedOffset>, GradeError> {
        parse_timestamp("assignment.due_date", &self.assignment.due_date)
    }

    /// Emails of everyone on the submission, in the order the platform lists them
    pub fn emails(&self) -> impl Iterator<Item = &str> {
        self.users.iter().map(|u| u.email.as_str())
    }

    /// Attempt number of this submission (previous attempts plus this one)
    pub fn submission_count(&self) -> usize {
        self.previous_submissions.len() + 1
    }
}

/// The autograder's `results.json`.
///
/// Fields the grader does not touch (`visibility`, `stdout_visibility`, per-test
/// `name`, `output`, ...) round-trip unchanged through `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Results {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tests: Option<Vec<TestResult>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Results {
    /// Append to the student-visible log. Existing output is never replaced.
    pub fn append_output(&mut self, text: &str) {
        self.output.get_or_insert_with(String::new).push_str(text);
    }
}

/// Parse a platform timestamp.
///
/// Accepts RFC 3339 as well as ISO-8601 forms with a colon-less offset
/// (`2024-01-01T23:59:00-0600`) or a space separator.
pub fn parse_timestamp(field: &'static str, value: &str) -> Result<DateTime<FixedOffset>, GradeError> {
    let value = value.trim();
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z"))
        .or_else(|_| DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f%z"))
        .map_err(|_| GradeError::InvalidTimestamp {
            field,
            value: value.to_string(),
        })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Numeric {
    Number(f64),
    Text(String),
}

/// Scores and point totals show up both as JSON numbers and as numeric strings.
fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Numeric::deserialize(deserializer)? {
        Numeric::Number(n) => Ok(n),
        Numeric::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("expected a number, got '{s}'"))),
    }
}
