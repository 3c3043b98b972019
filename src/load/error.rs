use thiserror::Error;

/// Errors raised while turning backend JSON into stages and cases
///
/// Loading fails fast: the first bad record aborts the whole document, so the
/// prioritizer never sees partial or invalid data.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {source_name}: {message}")]
    Io { source_name: String, message: String },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Stage {stage}: invalid {field} date '{value}'")]
    InvalidDate {
        stage: String,
        field: &'static str,
        value: String,
    },

    #[error("Stage {stage}: unknown status '{value}'")]
    UnknownStatus { stage: String, value: String },

    #[error("Stage {stage}: completion date must be set if and only if status is COMPLETED (status is {status})")]
    CompletionMismatch { stage: String, status: String },

    #[error("Duplicate stage id: {id}")]
    DuplicateStage { id: String },
}
