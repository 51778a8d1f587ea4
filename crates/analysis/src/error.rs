//! Error types for survey analysis passes.

use thiserror::Error;

/// Result type alias for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Errors that can occur during analysis.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// Input mesh is empty.
    #[error("input mesh is empty")]
    EmptyMesh,

    /// Invalid analysis parameters.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
}

impl AnalysisError {
    pub fn invalid_params(details: impl Into<String>) -> Self {
        Self::InvalidParams(details.into())
    }
}
