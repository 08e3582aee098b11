#![forbid(unsafe_code)]

pub mod json;
pub mod repository;

pub use json::{JsonFileSource, parse_exam_file};
pub use repository::{ExamSource, InMemorySource, StorageError};
