//! Hardpoint estimation and scene-scale conversion for ship meshes.

pub mod error;
pub mod hardpoint;
pub mod scale;

pub use error::*;
pub use hardpoint::*;
pub use scale::*;
