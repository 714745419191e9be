use crate::error::GradeError;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// JSON Schema check for `config.json`.
///
/// Wraps a compiled `jsonschema::Validator` so the schema is parsed once and
/// failures come back as [`GradeError`] with a `$`-rooted JSON pointer.
#[derive(Debug)]
pub struct ConfigValidator {
    validator: jsonschema::Validator,
}

impl ConfigValidator {
    /// Compile `schema`. `schema_path` is only used for error reporting.
    pub fn new(schema: &Value, schema_path: &Path) -> Result<Self, GradeError> {
        let validator =
            jsonschema::validator_for(schema).map_err(|e| GradeError::InvalidSchema {
                path: PathBuf::from(schema_path),
                message: e.to_string(),
            })?;

        Ok(Self { validator })
    }

    /// Validate a raw config document, reporting the first violation
    pub fn validate(&self, config: &Value) -> Result<(), GradeError> {
        self.validator.validate(config).map_err(|error| {
            let path = error.instance_path().to_string();
            let path = if path.is_empty() {
                "$".to_string()
            } else {
                format!("${path}")
            };

            GradeError::SchemaViolation {
                path,
                message: error.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SCHEMA: &str = include_str!("../../assets/config.schema.json");

    fn validator() -> ConfigValidator {
        let schema: Value = serde_json::from_str(SCHEMA).unwrap();
        ConfigValidator::new(&schema, Path::new("config.schema.json")).unwrap()
    }

    fn valid_config() -> Value {
        json!({
            "max_submissions": 3,
            "max_late_days": 5,
            "no_penalty_days": 0,
            "penalty": 10,
            "extensions": {"a@x.com": {"penalty": 0}},
            "files_needed": ["lab1.py"],
            "lab_name": "Lab 1"
        })
    }

    #[test]
    fn test_valid_config() {
        assert!(validator().validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_null_cap_is_valid() {
        let mut config = valid_config();
        config["max_submissions"] = Value::Null;
        assert!(validator().validate(&config).is_ok());
    }

    #[test]
    fn test_missing_required_key() {
        let mut config = valid_config();
        config.as_object_mut().unwrap().remove("penalty");

        let err = validator().validate(&config).unwrap_err();
        match err {
            GradeError::SchemaViolation { path, message } => {
                assert_eq!(path, "$");
                assert!(message.contains("penalty"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_wrong_type_reports_location() {
        let mut config = valid_config();
        config["max_late_days"] = json!("five");

        let err = validator().validate(&config).unwrap_err();
        match err {
            GradeError::SchemaViolation { path, .. } => assert_eq!(path, "$/max_late_days"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_extension_key_rejected() {
        let mut config = valid_config();
        config["extensions"]["a@x.com"] = json!({"bonus": 5});
        assert!(validator().validate(&config).is_err());
    }

    #[test]
    fn test_invalid_schema_document() {
        let schema = json!({"type": 12});
        let err = ConfigValidator::new(&schema, Path::new("bad.schema.json")).unwrap_err();
        assert!(matches!(err, GradeError::InvalidSchema { .. }));
    }
}
