mod schema;
mod validation;

pub use schema::{Config, ExtensionOverride};
pub use validation::ConfigValidator;

use crate::error::GradeError;
use crate::storage;
use chrono_tz::Tz;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Root the grading platform mounts everything under
pub const DEFAULT_ROOT: &str = "/autograder";

/// Civil time zone used when rendering dates for students
pub const DEFAULT_TIMEZONE: &str = "America/Chicago";

/// Where a grading run reads and writes, and how it renders dates.
///
/// Passed explicitly to every stage so tests can point a run at a
/// temporary directory.
#[derive(Debug, Clone)]
pub struct GraderContext {
    root: PathBuf,
    timezone: Tz,
}

impl GraderContext {
    /// Build a context, rejecting unknown IANA time zone names
    pub fn new(root: impl Into<PathBuf>, timezone: &str) -> Result<Self, GradeError> {
        let timezone: Tz = timezone
            .parse()
            .map_err(|_| GradeError::UnknownTimezone(timezone.to_string()))?;

        Ok(Self {
            root: root.into(),
            timezone,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// `source/config.json`
    pub fn config_path(&self) -> PathBuf {
        self.root.join("source").join("config.json")
    }

    /// `source/config.schema.json`
    pub fn schema_path(&self) -> PathBuf {
        self.root.join("source").join("config.schema.json")
    }

    /// `results/results.json`
    pub fn results_path(&self) -> PathBuf {
        self.root.join("results").join("results.json")
    }

    /// `submission_metadata.json`
    pub fn metadata_path(&self) -> PathBuf {
        self.root.join("submission_metadata.json")
    }
}

impl Default for GraderContext {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            timezone: chrono_tz::America::Chicago,
        }
    }
}

/// Load `config.json`, validate it against `config.schema.json` and decode it.
///
/// # Errors
///
/// Returns an error if:
/// - Either file is missing or is not valid JSON
/// - The schema itself cannot be compiled
/// - The config violates the schema
/// - The config passes the schema but holds values the grader cannot use
pub fn load_config(ctx: &GraderContext) -> Result<Config, GradeError> {
    let config_path = ctx.config_path();
    let schema_path = ctx.schema_path();

    let raw = storage::read_json(&config_path)?;
    let schema = storage::read_json(&schema_path)?;

    ConfigValidator::new(&schema, &schema_path)?.validate(&raw)?;
    debug!(path = %config_path.display(), "config passed schema validation");

    serde_json::from_value(raw).map_err(|source| GradeError::InvalidConfig { source })
}
