use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("I/O error while {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON parse error while {context}: {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("missing input: {field}")]
    MissingInput { field: &'static str },
    #[error(
        "decoded text does not match token concatenation \
         ({expected_chars} chars expected, {reconstructed_chars} reconstructed)"
    )]
    TextMismatch {
        expected_chars: usize,
        reconstructed_chars: usize,
    },
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
}

impl AnalysisError {
    pub(crate) fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }

    pub(crate) fn json(context: &'static str, source: serde_json::Error) -> Self {
        Self::Json { context, source }
    }

    pub(crate) fn missing_input(field: &'static str) -> Self {
        Self::MissingInput { field }
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

/// Error value handed to the rendering side instead of a result.
///
/// Serializes as `{ "error": "<message>" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResult {
    pub error: String,
}

impl From<&AnalysisError> for ErrorResult {
    fn from(err: &AnalysisError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

impl From<AnalysisError> for ErrorResult {
    fn from(err: AnalysisError) -> Self {
        Self::from(&err)
    }
}
