//! Core geometry types for ship mesh analysis.
//!
//! This crate provides the data model shared by every analysis pass:
//! - Coordinate axes
//! - Meshes and their bounding volumes
//! - Regions (filtered vertex views selected by axis predicates)

pub mod axis;
pub mod mesh;
pub mod region;

pub use axis::*;
pub use mesh::*;
pub use region::*;

// Re-export commonly used types
pub use glam::{DVec3, Mat4, Vec3};
