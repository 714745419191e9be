use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

/// Grading policy from `source/config.json`.
///
/// Only decoded after the raw document has passed schema validation, so the
/// schema decides which extra keys are tolerated.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Config {
    /// Submission cap. `null`, absent or `0` means unlimited.
    #[serde(default)]
    pub max_submissions: Option<u32>,

    /// Days after the (possibly extended) due date that late work is still accepted
    pub max_late_days: u32,

    /// Grace days added to the due date before any penalty accrues
    pub no_penalty_days: u32,

    /// Marks deducted per started late day
    pub penalty: u32,

    /// Per-student overrides keyed by email address
    #[serde(default)]
    pub extensions: HashMap<String, ExtensionOverride>,

    // Consumed by the file-presence check, carried here so the struct mirrors the file.
    #[serde(default)]
    pub files_needed: Vec<String>,

    #[serde(default)]
    pub lab_name: Option<String>,
}

/// Partial replacement of the top-level policy constants for one student.
///
/// Every field left out falls back to the top-level value.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ExtensionOverride {
    /// `None`: not overridden. `Some(None)`: explicitly unlimited.
    #[serde(default, deserialize_with = "present_or_null")]
    pub max_submissions: Option<Option<u32>>,

    #[serde(default)]
    pub max_late_days: Option<u32>,

    #[serde(default)]
    pub no_penalty_days: Option<u32>,

    #[serde(default)]
    pub penalty: Option<u32>,
}

/// Keep an explicit `null` distinct from an absent key.
fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<u32>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<u32>::deserialize(deserializer).map(Some)
}
