use crate::error::GradeError;
use atomic_write_file::AtomicWriteFile;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

/// Read a JSON document without imposing any structure on it
pub fn read_json(path: &Path) -> Result<Value, GradeError> {
    read_json_as(path)
}

/// Read a JSON document and decode it into `T`.
///
/// Syntax errors are reported as [`GradeError::MalformedJson`]; well-formed JSON
/// with the wrong shape is reported as [`GradeError::InvalidDocument`].
pub fn read_json_as<T: DeserializeOwned>(path: &Path) -> Result<T, GradeError> {
    let file = File::open(path).map_err(|source| GradeError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|source| {
        if source.is_data() {
            GradeError::InvalidDocument {
                path: path.to_path_buf(),
                source,
            }
        } else if source.is_io() {
            GradeError::Io {
                path: path.to_path_buf(),
                source: source.into(),
            }
        } else {
            GradeError::MalformedJson {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

/// Write a JSON document atomically with two-space indentation.
///
/// Readers of `path` see either the previous contents or the new ones, never
/// a partial write.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), GradeError> {
    let io_err = |source: std::io::Error| GradeError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = AtomicWriteFile::open(path).map_err(io_err)?;
    serde_json::to_writer_pretty(&mut file, value).map_err(|e| io_err(e.into()))?;
    file.flush().map_err(io_err)?;
    file.commit().map_err(io_err)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_read_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_json(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, GradeError::Io { .. }));
    }

    #[test]
    fn test_read_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{\"score\": ").unwrap();

        let err = read_json(&path).unwrap_err();
        assert!(matches!(err, GradeError::MalformedJson { .. }));
    }

    #[test]
    fn test_read_wrong_shape_is_invalid_document() {
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct Needs {
            score: f64,
        }

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shape.json");
        std::fs::write(&path, r#"{"score": "not a number"}"#).unwrap();

        let err = read_json_as::<Needs>(&path).unwrap_err();
        assert!(matches!(err, GradeError::InvalidDocument { .. }));
    }

    #[test]
    fn test_write_is_pretty_printed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");

        write_json(&path, &json!({"score": 70.0, "output": "hi"})).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n  \"score\": 70.0"));
        assert_eq!(read_json(&path).unwrap()["output"], "hi");
    }

    #[test]
    fn test_write_replaces_existing_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        std::fs::write(&path, r#"{"score": 1.0, "stale": true}"#).unwrap();

        write_json(&path, &json!({"score": 2.0})).unwrap();

        let value = read_json(&path).unwrap();
        assert_eq!(value, json!({"score": 2.0}));
    }
}
