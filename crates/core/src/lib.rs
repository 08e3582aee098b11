#![forbid(unsafe_code)]

pub mod bank;
pub mod error;
pub mod model;

pub use bank::{QuestionBank, RawChoice, RawExam, RawExamFile, RawQuestion};
pub use error::{DataFormatError, RecordLocation};
