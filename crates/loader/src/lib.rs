//! Mesh asset loading.

pub mod error;
pub mod gltf_loader;

pub use error::*;
pub use gltf_loader::*;

use geometry::Mesh;
use std::path::Path;

/// Anything that can turn a file path into a [`Mesh`].
pub trait MeshLoader {
    fn load(&self, path: &Path) -> LoadResult<Mesh>;
}
