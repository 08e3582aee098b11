use thiserror::Error;

use crate::model::{ParseLabelError, QuestionError};

/// Where in the raw exam list a problem was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordLocation {
    pub exam: usize,
    pub question: Option<usize>,
}

impl std::fmt::Display for RecordLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.question {
            Some(q) => write!(f, "exam {} question {}", self.exam, q),
            None => write!(f, "exam {}", self.exam),
        }
    }
}

/// The question corpus is malformed. Loading cannot continue without fixed data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DataFormatError {
    #[error("{at}: missing required field `{field}`")]
    MissingField {
        at: RecordLocation,
        field: &'static str,
    },

    #[error("{at}: {source}")]
    InvalidValue {
        at: RecordLocation,
        #[source]
        source: ParseLabelError,
    },

    #[error("{at}: {source}")]
    InvalidQuestion {
        at: RecordLocation,
        #[source]
        source: QuestionError,
    },
}
