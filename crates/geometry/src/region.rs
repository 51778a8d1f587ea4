//! Regions: named vertex subsets selected by per-axis predicates.
//!
//! A region borrows the mesh's vertex slice and keeps only indices, so
//! refining and splitting never copy positions. Every reduction a region
//! offers (mean, extreme vertex) yields a point inside the mesh's own
//! bounding volume.

use crate::axis::Axis;
use crate::mesh::{mean_of, Bounds, Mesh};
use glam::Vec3;

/// A per-axis vertex filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Predicate {
    /// Coordinate strictly below `value`.
    Below { axis: Axis, value: f32 },
    /// Coordinate strictly above `value`.
    Above { axis: Axis, value: f32 },
    /// Coordinate strictly within `half_width` of `center`.
    Band { axis: Axis, center: f32, half_width: f32 },
    /// Coordinate strictly below the region's own `percentile` (0–100).
    BelowPercentile { axis: Axis, percentile: f32 },
    /// Coordinate strictly above the region's own `percentile` (0–100).
    AbovePercentile { axis: Axis, percentile: f32 },
}

/// Which end of an axis to look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extreme {
    Min,
    Max,
}

/// A named, filtered view over a vertex slice.
#[derive(Debug, Clone)]
pub struct Region<'a> {
    name: &'static str,
    source: &'a [Vec3],
    indices: Vec<u32>,
}

impl<'a> Region<'a> {
    /// Region covering every vertex of `source`.
    pub fn whole(name: &'static str, source: &'a [Vec3]) -> Self {
        Self {
            name,
            source,
            indices: (0..source.len() as u32).collect(),
        }
    }

    /// Region of `mesh` selected by a single predicate.
    pub fn select(name: &'static str, mesh: &'a Mesh, predicate: Predicate) -> Self {
        Self::whole(name, mesh.vertices()).refine(name, predicate)
    }

    /// Narrow this region by another predicate. Percentile predicates are
    /// resolved against this region's vertices, not the whole mesh.
    pub fn refine(&self, name: &'static str, predicate: Predicate) -> Region<'a> {
        let keep: Box<dyn Fn(Vec3) -> bool> = match predicate {
            Predicate::Below { axis, value } => Box::new(move |v: Vec3| axis.of(v) < value),
            Predicate::Above { axis, value } => Box::new(move |v: Vec3| axis.of(v) > value),
            Predicate::Band {
                axis,
                center,
                half_width,
            } => Box::new(move |v: Vec3| (axis.of(v) - center).abs() < half_width),
            Predicate::BelowPercentile { axis, percentile } => match self.percentile(axis, percentile) {
                Some(cut) => Box::new(move |v: Vec3| axis.of(v) < cut),
                None => Box::new(|_: Vec3| false),
            },
            Predicate::AbovePercentile { axis, percentile } => match self.percentile(axis, percentile) {
                Some(cut) => Box::new(move |v: Vec3| axis.of(v) > cut),
                None => Box::new(|_: Vec3| false),
            },
        };

        Region {
            name,
            source: self.source,
            indices: self
                .indices
                .iter()
                .copied()
                .filter(|&i| keep(self.source[i as usize]))
                .collect(),
        }
    }

    /// Split around `at` on `axis`. Vertices exactly at `at` belong to neither half.
    pub fn split(
        &self,
        axis: Axis,
        at: f32,
        names: (&'static str, &'static str),
    ) -> (Region<'a>, Region<'a>) {
        (
            self.refine(names.0, Predicate::Below { axis, value: at }),
            self.refine(names.1, Predicate::Above { axis, value: at }),
        )
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Indices into the source vertex slice.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn points(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.indices.iter().map(|&i| self.source[i as usize])
    }

    /// Mean position of the region's vertices.
    pub fn mean(&self) -> Option<Vec3> {
        mean_of(self.points())
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.points())
    }

    /// The vertex at the given end of `axis`. Exact ties are averaged, so
    /// the result stays on the extreme plane of the region.
    pub fn extreme(&self, axis: Axis, end: Extreme) -> Option<Vec3> {
        let coords = self.points().map(|v| axis.of(v));
        let target = match end {
            Extreme::Min => coords.fold(f32::INFINITY, f32::min),
            Extreme::Max => coords.fold(f32::NEG_INFINITY, f32::max),
        };
        mean_of(self.points().filter(|&v| axis.of(v) == target))
    }

    /// The `p`-th percentile (0–100) of this region's coordinates on `axis`.
    pub fn percentile(&self, axis: Axis, p: f32) -> Option<f32> {
        let mut values: Vec<f32> = self.points().map(|v| axis.of(v)).collect();
        percentile(&mut values, p)
    }
}

/// Percentile with linear interpolation between closest ranks.
///
/// Sorts `values` in place. `p` is clamped to 0–100.
pub fn percentile(values: &mut [f32], p: f32) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.total_cmp(b));
    let rank = (p.clamp(0.0, 100.0) / 100.0) * (values.len() - 1) as f32;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let t = rank - lo as f32;
    Some(values[lo] + (values[hi] - values[lo]) * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_mesh() -> Mesh {
        // Ten vertices along Z at 0..9, alternating X = ±1
        Mesh::from_vertices(
            (0..10)
                .map(|i| Vec3::new(if i % 2 == 0 { -1.0 } else { 1.0 }, 0.0, i as f32))
                .collect(),
        )
    }

    #[test]
    fn region_select_below_and_above() {
        let mesh = line_mesh();
        let front = Region::select("front", &mesh, Predicate::Below { axis: Axis::Z, value: 3.0 });
        let rear = Region::select("rear", &mesh, Predicate::Above { axis: Axis::Z, value: 6.0 });
        assert_eq!(front.len(), 3);
        assert_eq!(rear.len(), 3);
        assert_eq!(front.name(), "front");
        assert_eq!(rear.indices(), &[7, 8, 9]);
    }

    #[test]
    fn region_band_is_strict() {
        let mesh = line_mesh();
        let mid = Region::select(
            "mid",
            &mesh,
            Predicate::Band { axis: Axis::Z, center: 4.5, half_width: 1.5 },
        );
        assert_eq!(mid.indices(), &[4, 5]);
    }

    #[test]
    fn region_split_excludes_pivot() {
        let mesh = Mesh::from_vertices(vec![
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
        ]);
        let all = Region::whole("all", mesh.vertices());
        let (left, right) = all.split(Axis::X, 0.0, ("left", "right"));
        assert_eq!(left.len(), 1);
        assert_eq!(right.len(), 1);
    }

    #[test]
    fn region_extreme_averages_ties() {
        let mesh = Mesh::from_vertices(vec![
            Vec3::new(-2.0, 0.0, 5.0),
            Vec3::new(2.0, 0.0, 5.0),
            Vec3::new(0.0, 0.0, 1.0),
        ]);
        let all = Region::whole("all", mesh.vertices());
        assert_eq!(all.extreme(Axis::Z, Extreme::Max), Some(Vec3::new(0.0, 0.0, 5.0)));
        assert_eq!(all.extreme(Axis::Z, Extreme::Min), Some(Vec3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn region_reductions_on_empty_are_none() {
        let mesh = line_mesh();
        let none = Region::select("none", &mesh, Predicate::Above { axis: Axis::Z, value: 100.0 });
        assert!(none.is_empty());
        assert!(none.mean().is_none());
        assert!(none.bounds().is_none());
        assert!(none.extreme(Axis::Z, Extreme::Max).is_none());
        assert!(none
            .refine("still_none", Predicate::AbovePercentile { axis: Axis::Z, percentile: 50.0 })
            .is_empty());
    }

    #[test]
    fn percentile_interpolates_linearly() {
        let mut values = vec![4.0, 1.0, 3.0, 2.0];
        assert_eq!(percentile(&mut values, 0.0), Some(1.0));
        assert_eq!(percentile(&mut values, 100.0), Some(4.0));
        assert_eq!(percentile(&mut values, 50.0), Some(2.5));
        assert!(percentile(&mut [], 50.0).is_none());
    }

    #[test]
    fn region_percentile_refines_against_itself() {
        let mesh = line_mesh();
        let rear = Region::select("rear", &mesh, Predicate::Above { axis: Axis::Z, value: 4.5 });
        // rear holds z = 5..9; 80th percentile is 8.2
        let top = rear.refine("top", Predicate::AbovePercentile { axis: Axis::Z, percentile: 80.0 });
        assert_eq!(top.indices(), &[9]);
        let low = rear.refine("low", Predicate::BelowPercentile { axis: Axis::Z, percentile: 20.0 });
        assert_eq!(low.indices(), &[5]);
    }
}
