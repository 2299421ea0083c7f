//! Analysis request value object

use super::ambition::AmbitionLevel;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A validated analysis request (Value Object)
///
/// Both texts are guaranteed to contain something other than whitespace.
/// They are kept verbatim (not trimmed) because the prompt embeds them as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    dataset_text: String,
    scope_text: String,
    ambition: AmbitionLevel,
}

impl AnalysisRequest {
    /// Validate and build a request.
    ///
    /// The dataset is checked before the scope, so an entirely empty form
    /// reports the missing dataset first.
    pub fn new(
        dataset_text: impl Into<String>,
        scope_text: impl Into<String>,
        ambition: AmbitionLevel,
    ) -> Result<Self, DomainError> {
        let dataset_text = dataset_text.into();
        let scope_text = scope_text.into();

        if dataset_text.trim().is_empty() {
            return Err(DomainError::EmptyDataset);
        }
        if scope_text.trim().is_empty() {
            return Err(DomainError::EmptyScope);
        }

        Ok(Self {
            dataset_text,
            scope_text,
            ambition,
        })
    }

    pub fn dataset_text(&self) -> &str {
        &self.dataset_text
    }

    pub fn scope_text(&self) -> &str {
        &self.scope_text
    }

    pub fn ambition(&self) -> AmbitionLevel {
        self.ambition
    }
}
