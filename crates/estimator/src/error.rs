//! Error types for hardpoint estimation and scale conversion.

use thiserror::Error;

/// Result type alias for estimator operations.
pub type HardpointResult<T> = Result<T, HardpointError>;

/// Errors raised by the estimator and the scale converter. All of them are
/// local to one call and recoverable by the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HardpointError {
    /// Mesh is empty, has non-finite coordinates, or no extent along the length axis.
    #[error("invalid mesh: {0}")]
    InvalidMesh(String),

    /// A spatial filter selected no vertices.
    #[error("region '{region}' selected no vertices")]
    EmptyRegion { region: &'static str },

    /// Scale conversion with a zero native length.
    #[error("native length is zero")]
    DivisionByZero,

    /// Estimator parameters out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl HardpointError {
    pub fn invalid_mesh(details: impl Into<String>) -> Self {
        Self::InvalidMesh(details.into())
    }

    pub fn invalid_config(details: impl Into<String>) -> Self {
        Self::InvalidConfig(details.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_names_the_problem() {
        let err = HardpointError::invalid_mesh("no vertices");
        assert!(err.to_string().contains("no vertices"));

        let err = HardpointError::EmptyRegion { region: "rear" };
        assert!(err.to_string().contains("rear"));

        assert!(HardpointError::DivisionByZero.to_string().contains("zero"));
    }
}
