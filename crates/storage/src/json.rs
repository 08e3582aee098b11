use std::path::{Path, PathBuf};

use async_trait::async_trait;
use quiz_core::{RawExam, RawExamFile};
use tracing::debug;

use crate::repository::{ExamSource, StorageError};

/// Decode a `{ "exams": [...] }` document.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if the text is not valid JSON or does not
/// have the expected nesting.
pub fn parse_exam_file(text: &str) -> Result<RawExamFile, StorageError> {
    serde_json::from_str(text).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Reads the question corpus from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ExamSource for JsonFileSource {
    async fn fetch_exams(&self) -> Result<Vec<RawExam>, StorageError> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(self.path.display().to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        let file = parse_exam_file(&text)?;
        debug!(path = %self.path.display(), exams = file.exams.len(), "read exam file");
        Ok(file.exams)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_malformed_json() {
        let err = parse_exam_file("{ \"exams\": [").unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }

    #[test]
    fn parse_rejects_document_without_exams() {
        let err = parse_exam_file("{}").unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));

        let err = parse_exam_file(r#"{ "exam_list": [] }"#).unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }

    #[test]
    fn parse_accepts_empty_exam_list() {
        let file = parse_exam_file(r#"{ "exams": [] }"#).unwrap();
        assert!(file.exams.is_empty());
    }
}
