//! Mesh dimension extraction.
//!
//! Bounding box, centroid and the fore/aft reference coordinates on the
//! chosen length axis.

use crate::error::{AnalysisError, AnalysisResult};
use geometry::{Axis, Bounds, Mesh};
use glam::Vec3;

/// Measured dimensions of one mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct Dimensions {
    pub bounds: Bounds,
    /// Size along each axis.
    pub size: Vec3,
    /// Center of the bounding box.
    pub center: Vec3,
    /// Mean of all vertex positions.
    pub centroid: Vec3,
    /// Axis the caller says the ship is long along.
    pub length_axis: Axis,
    /// Axis with the largest extent, for cross-checking `length_axis`.
    pub longest_axis: Axis,
    /// Bow coordinate (minimum on `length_axis`).
    pub front: f32,
    /// Stern coordinate (maximum on `length_axis`).
    pub rear: f32,
    pub vertex_count: usize,
    pub face_count: usize,
}

impl Dimensions {
    pub fn measure(mesh: &Mesh, length_axis: Axis) -> AnalysisResult<Self> {
        let bounds = mesh.bounds().ok_or(AnalysisError::EmptyMesh)?;
        let centroid = mesh.centroid().ok_or(AnalysisError::EmptyMesh)?;
        Ok(Self {
            bounds,
            size: bounds.size(),
            center: bounds.center(),
            centroid,
            length_axis,
            longest_axis: bounds.longest_axis(),
            front: length_axis.of(bounds.min),
            rear: length_axis.of(bounds.max),
            vertex_count: mesh.vertex_count(),
            face_count: mesh.face_count(),
        })
    }

    /// Extent along the length axis (the native length).
    pub fn length(&self) -> f32 {
        self.rear - self.front
    }

    /// True when the configured length axis is not the longest one.
    pub fn length_axis_disagrees(&self) -> bool {
        self.bounds.extent(self.longest_axis) > self.length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_measure_box() {
        let mesh = Mesh::from_vertices(vec![
            Vec3::new(-118.0, -75.0, -71.0),
            Vec3::new(118.0, 75.0, 71.0),
            Vec3::new(0.0, 0.0, 30.0),
        ]);
        let dims = Dimensions::measure(&mesh, Axis::Z).unwrap();
        assert_eq!(dims.size, Vec3::new(236.0, 150.0, 142.0));
        assert_eq!(dims.length(), 142.0);
        assert_eq!(dims.front, -71.0);
        assert_eq!(dims.rear, 71.0);
        assert_eq!(dims.longest_axis, Axis::X);
        assert!(dims.length_axis_disagrees());
        assert_eq!(dims.centroid, Vec3::new(0.0, 0.0, 10.0));
    }

    #[test]
    fn dimensions_of_empty_mesh_fail() {
        assert_eq!(
            Dimensions::measure(&Mesh::default(), Axis::Z),
            Err(AnalysisError::EmptyMesh)
        );
    }
}
