//! Triangle meshes and axis-aligned bounding volumes.

use crate::axis::Axis;
use glam::{DVec3, Mat4, Vec3};

/// A triangle mesh in its native (as-authored) coordinate space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    faces: Vec<[u32; 3]>,
}

impl Mesh {
    /// Create a mesh from vertex positions and index triples.
    pub fn new(vertices: Vec<Vec3>, faces: Vec<[u32; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Create a point-only mesh (no faces). Estimation only needs positions.
    pub fn from_vertices(vertices: Vec<Vec3>) -> Self {
        Self {
            vertices,
            faces: Vec::new(),
        }
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Bounding volume over all vertices, `None` for an empty mesh.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.vertices.iter().copied())
    }

    /// Mean of all vertex positions (not area-weighted).
    pub fn centroid(&self) -> Option<Vec3> {
        mean_of(self.vertices.iter().copied())
    }

    /// True if every coordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.vertices.iter().all(|v| v.is_finite())
    }

    /// Number of faces referencing a vertex index outside the vertex list.
    pub fn dangling_faces(&self) -> usize {
        let n = self.vertices.len() as u32;
        self.faces
            .iter()
            .filter(|f| f.iter().any(|&i| i >= n))
            .count()
    }

    /// Append another mesh, transformed by `transform`, offsetting its face indices.
    pub fn append_transformed(&mut self, other: &Mesh, transform: Mat4) {
        let base = self.vertices.len() as u32;
        self.vertices
            .extend(other.vertices.iter().map(|&v| transform.transform_point3(v)));
        self.faces
            .extend(other.faces.iter().map(|f| [f[0] + base, f[1] + base, f[2] + base]));
    }
}

/// Mean of a set of points, accumulated in double precision.
pub fn mean_of(points: impl IntoIterator<Item = Vec3>) -> Option<Vec3> {
    let mut sum = DVec3::ZERO;
    let mut count = 0usize;
    for p in points {
        sum += p.as_dvec3();
        count += 1;
    }
    if count == 0 {
        None
    } else {
        Some((sum / count as f64).as_vec3())
    }
}

/// Axis-aligned bounding volume. Derived from a mesh, never stored with it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Tightest bounds around `points`, `None` if there are none.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Self::new(first, first);
        for p in iter {
            bounds.min = bounds.min.min(p);
            bounds.max = bounds.max.max(p);
        }
        Some(bounds)
    }

    /// Extent along a single axis.
    pub fn extent(&self, axis: Axis) -> f32 {
        axis.of(self.max) - axis.of(self.min)
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Containment test with an absolute tolerance on every face.
    pub fn contains(&self, point: Vec3, tolerance: f32) -> bool {
        point.cmpge(self.min - Vec3::splat(tolerance)).all()
            && point.cmple(self.max + Vec3::splat(tolerance)).all()
    }

    /// Axis with the largest extent. Ties go to the lower axis.
    pub fn longest_axis(&self) -> Axis {
        self.widest_of(&Axis::ALL)
    }

    /// Of the given axes, the one with the largest extent. Ties go to the earlier axis.
    ///
    /// Panics if `axes` is empty.
    pub fn widest_of(&self, axes: &[Axis]) -> Axis {
        let mut best = axes[0];
        for &axis in &axes[1..] {
            if self.extent(axis) > self.extent(best) {
                best = axis;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn box_points() -> Vec<Vec3> {
        vec![
            Vec3::new(-2.0, -1.0, -5.0),
            Vec3::new(2.0, 1.0, 5.0),
            Vec3::new(0.0, 0.0, 0.0),
        ]
    }

    #[test]
    fn bounds_from_points_tracks_extremes() {
        let b = Bounds::from_points(box_points()).unwrap();
        assert_eq!(b.min, Vec3::new(-2.0, -1.0, -5.0));
        assert_eq!(b.max, Vec3::new(2.0, 1.0, 5.0));
        assert_eq!(b.extent(Axis::Z), 10.0);
        assert_eq!(b.center(), Vec3::ZERO);
    }

    #[test]
    fn bounds_of_nothing_is_none() {
        assert!(Bounds::from_points(Vec::new()).is_none());
        assert!(Mesh::default().bounds().is_none());
        assert!(Mesh::default().centroid().is_none());
    }

    #[test]
    fn bounds_longest_axis_prefers_lower_on_tie() {
        let b = Bounds::new(Vec3::ZERO, Vec3::new(3.0, 3.0, 1.0));
        assert_eq!(b.longest_axis(), Axis::X);
        assert_eq!(b.widest_of(&[Axis::Y, Axis::Z]), Axis::Y);
    }

    #[test]
    fn bounds_contains_respects_tolerance() {
        let b = Bounds::new(Vec3::ZERO, Vec3::ONE);
        assert!(b.contains(Vec3::splat(0.5), 0.0));
        assert!(!b.contains(Vec3::new(1.01, 0.5, 0.5), 0.0));
        assert!(b.contains(Vec3::new(1.01, 0.5, 0.5), 0.02));
    }

    #[test]
    fn mesh_centroid_is_vertex_mean() {
        let mesh = Mesh::from_vertices(vec![Vec3::ZERO, Vec3::new(4.0, 2.0, -6.0)]);
        assert_eq!(mesh.centroid(), Some(Vec3::new(2.0, 1.0, -3.0)));
    }

    #[test]
    fn mesh_append_offsets_faces() {
        let tri = Mesh::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![[0, 1, 2]]);
        let mut combined = tri.clone();
        combined.append_transformed(&tri, Mat4::from_translation(Vec3::Z));
        assert_eq!(combined.vertex_count(), 6);
        assert_eq!(combined.faces()[1], [3, 4, 5]);
        assert_eq!(combined.vertices()[3], Vec3::Z);
        assert_eq!(combined.dangling_faces(), 0);
    }

    #[test]
    fn mesh_reports_dangling_faces() {
        let mesh = Mesh::new(vec![Vec3::ZERO, Vec3::X], vec![[0, 1, 2]]);
        assert_eq!(mesh.dangling_faces(), 1);
    }
}
