//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Everything here is a validation failure: it is detected before any
/// call to the generation service is attempted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Dataset is empty. Provide CSV data or a text description of the data")]
    EmptyDataset,

    #[error("Job scope is empty. Describe your responsibilities to bound the analysis")]
    EmptyScope,

    #[error("Question cannot be empty")]
    EmptyQuestion,

    #[error("Ambition level {0} is out of range (20-100 in steps of 10)")]
    AmbitionOutOfRange(u8),

    #[error("An analysis is already in progress")]
    AnalysisInFlight,
}

impl DomainError {
    /// Check if this error is caused by missing user input
    pub fn is_missing_input(&self) -> bool {
        matches!(
            self,
            DomainError::EmptyDataset | DomainError::EmptyScope | DomainError::EmptyQuestion
        )
    }
}
