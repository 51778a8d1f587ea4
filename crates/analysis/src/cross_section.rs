//! Cross-section profile: vertex slabs at evenly spaced stations along an axis.

use crate::error::{AnalysisError, AnalysisResult};
use geometry::{Axis, Mesh, Predicate, Region};
use glam::Vec3;

/// Vertices gathered around one station.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    /// Station coordinate on the profile axis.
    pub station: f32,
    pub vertex_count: usize,
    /// Range on the first perpendicular axis (lateral for a Z profile: X).
    pub first_range: f32,
    /// Range on the second perpendicular axis (vertical for a Z profile: Y).
    pub second_range: f32,
    /// Mean of the slice's vertices.
    pub center: Vec3,
}

impl Slice {
    /// Product of both ranges, a rough silhouette area.
    pub fn area(&self) -> f32 {
        self.first_range * self.second_range
    }
}

/// Profile parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileParams {
    /// Number of stations from min to max (inclusive).
    pub stations: usize,
    /// Slab half-width as a fraction of the axis extent.
    pub tolerance_fraction: f32,
}

impl Default for ProfileParams {
    fn default() -> Self {
        Self {
            stations: 10,
            tolerance_fraction: 0.05,
        }
    }
}

/// Slice `mesh` at evenly spaced stations along `axis`. Empty stations are skipped.
pub fn slice_profile(mesh: &Mesh, axis: Axis, params: ProfileParams) -> AnalysisResult<Vec<Slice>> {
    if params.stations < 2 {
        return Err(AnalysisError::invalid_params("need at least two stations"));
    }
    if !(params.tolerance_fraction > 0.0) {
        return Err(AnalysisError::invalid_params("tolerance_fraction must be positive"));
    }
    let bounds = mesh.bounds().ok_or(AnalysisError::EmptyMesh)?;

    let lo = axis.of(bounds.min);
    let extent = bounds.extent(axis);
    let half_width = extent * params.tolerance_fraction;
    let [first, second] = axis.others();
    let whole = Region::whole("hull", mesh.vertices());

    let mut slices = Vec::new();
    for i in 0..params.stations {
        let station = lo + extent * i as f32 / (params.stations - 1) as f32;
        let slab = whole.refine(
            "slab",
            Predicate::Band {
                axis,
                center: station,
                half_width,
            },
        );
        let (Some(b), Some(center)) = (slab.bounds(), slab.mean()) else {
            continue;
        };
        slices.push(Slice {
            station,
            vertex_count: slab.len(),
            first_range: b.extent(first),
            second_range: b.extent(second),
            center,
        });
    }
    Ok(slices)
}

/// The slice with the largest silhouette area. First wins on ties.
pub fn widest_slice(slices: &[Slice]) -> Option<&Slice> {
    slices.iter().fold(None, |best: Option<&Slice>, s| match best {
        Some(b) if b.area() >= s.area() => Some(b),
        _ => Some(s),
    })
}
