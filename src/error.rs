//! Error types for the onboarding wizard.

/// Top-level error type for the wizard.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Submission error: {0}")]
    Submission(#[from] SubmissionError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Local persistence errors.
///
/// None of these reach the applicant: the store logs them and carries on.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Connection pool error: {0}")]
    Pool(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the submission boundary.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("Submission rejected: {reason}")]
    Rejected { reason: String },

    #[error("Failed to encode application: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// A text value that does not name any option of a choice field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind} option: {value}")]
pub struct ChoiceError {
    pub kind: &'static str,
    pub value: String,
}

/// Result type alias for the wizard.
pub type Result<T> = std::result::Result<T, Error>;
