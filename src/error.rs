use std::path::PathBuf;
use thiserror::Error;

/// Exit code for missing, unreadable or malformed input files
pub const EXIT_IO: i32 = 1;
/// Exit code for configuration problems (schema, values, time zone)
pub const EXIT_CONFIG: i32 = 2;
/// Exit code for submission metadata or results that cannot be graded
pub const EXIT_SUBMISSION: i32 = 3;

/// Every way a grading run can fail.
///
/// All variants are fatal: the run stops and the error is surfaced to the
/// platform harness. Nothing is retried.
#[derive(Debug, Error)]
pub enum GradeError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed JSON in {}: {source}", path.display())]
    MalformedJson {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("unusable config schema {}: {message}", path.display())]
    InvalidSchema { path: PathBuf, message: String },

    #[error("config.json violates its schema at {path}: {message}")]
    SchemaViolation { path: String, message: String },

    #[error("config.json has invalid values: {source}")]
    InvalidConfig { source: serde_json::Error },

    #[error("unexpected structure in {}: {source}", path.display())]
    InvalidDocument {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid timestamp in {field}: '{value}'")]
    InvalidTimestamp { field: &'static str, value: String },

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("unknown time zone: {0}")]
    UnknownTimezone(String),
}

impl GradeError {
    /// Process exit code reported to the harness for this failure
    pub fn exit_code(&self) -> i32 {
        match self {
            GradeError::Io { .. } | GradeError::MalformedJson { .. } => EXIT_IO,
            GradeError::InvalidSchema { .. }
            | GradeError::SchemaViolation { .. }
            | GradeError::InvalidConfig { .. }
            | GradeError::UnknownTimezone(_) => EXIT_CONFIG,
            GradeError::InvalidDocument { .. }
            | GradeError::InvalidTimestamp { .. }
            | GradeError::MissingField(_) => EXIT_SUBMISSION,
        }
    }
}
