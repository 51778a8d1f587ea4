//! Survey passes over ship meshes: dimensions, cross-section profiles,
//! connected parts, density clustering and structural features.

pub mod cluster;
pub mod components;
pub mod cross_section;
pub mod dimensions;
pub mod error;
pub mod features;

pub use cluster::*;
pub use components::*;
pub use cross_section::*;
pub use dimensions::*;
pub use error::*;
pub use features::*;
