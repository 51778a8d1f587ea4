//! Error types for mesh loading.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for loader operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Errors that can occur while loading a mesh asset.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file does not exist.
    #[error("mesh file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The container could not be parsed or its buffers resolved.
    #[error("glTF error: {0}")]
    Gltf(#[from] gltf::Error),

    /// The file parsed but holds no triangle geometry.
    #[error("no triangle geometry in {}", .0.display())]
    NoGeometry(PathBuf),

    /// A primitive lacks vertex positions.
    #[error("primitive of mesh '{mesh}' has no POSITION attribute")]
    MissingPositions { mesh: String },
}
