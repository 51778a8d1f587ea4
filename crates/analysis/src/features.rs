//! Structural features: engine exhaust clusters, aft wings, lateral balance, dorsal peak.

use crate::cluster::{Cluster, Dbscan};
use crate::error::{AnalysisError, AnalysisResult};
use geometry::{Axis, Mesh, Predicate, Region};
use glam::Vec3;

/// Parameters for the stern exhaust survey.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExhaustParams {
    /// Stern slab depth as a fraction of the length extent.
    pub tail_fraction: f32,
    /// The slab must hold more vertices than this before clustering.
    pub min_vertices: usize,
    /// DBSCAN radius as a fraction of the largest mesh dimension.
    pub eps_fraction: f32,
    pub min_samples: usize,
}

impl Default for ExhaustParams {
    fn default() -> Self {
        Self {
            tail_fraction: 0.05,
            min_vertices: 100,
            eps_fraction: 0.05,
            min_samples: 20,
        }
    }
}

/// Result of the stern exhaust survey.
#[derive(Debug, Clone, PartialEq)]
pub struct ExhaustSurvey {
    /// Coordinate on the length axis above which vertices were taken.
    pub tail_cut: f32,
    pub tail_vertices: usize,
    /// Empty when the slab was too sparse to cluster.
    pub clusters: Vec<Cluster>,
}

/// Cluster the vertices of the stern slab into candidate exhaust bells.
pub fn exhaust_clusters(
    mesh: &Mesh,
    length_axis: Axis,
    params: ExhaustParams,
) -> AnalysisResult<ExhaustSurvey> {
    if !(params.tail_fraction > 0.0 && params.tail_fraction <= 1.0) {
        return Err(AnalysisError::invalid_params("tail_fraction must be in (0, 1]"));
    }
    let bounds = mesh.bounds().ok_or(AnalysisError::EmptyMesh)?;
    let tail_cut = length_axis.of(bounds.max) - bounds.extent(length_axis) * params.tail_fraction;
    let tail = Region::select(
        "tail",
        mesh,
        Predicate::Above {
            axis: length_axis,
            value: tail_cut,
        },
    );

    let clusters = if tail.len() > params.min_vertices {
        let eps = bounds.size().max_element() * params.eps_fraction;
        let points: Vec<Vec3> = tail.points().collect();
        Dbscan::new(eps, params.min_samples)?.clusters(&points)
    } else {
        log::debug!(
            "stern slab holds {} vertices, not clustering (need > {})",
            tail.len(),
            params.min_vertices
        );
        Vec::new()
    };

    Ok(ExhaustSurvey {
        tail_cut,
        tail_vertices: tail.len(),
        clusters,
    })
}

/// Parameters for the aft wing search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WingParams {
    /// Aft section depth as a fraction of the length extent.
    pub aft_fraction: f32,
    /// Vertices below this lateral percentile of the aft section form the
    /// left wing; above `100 - lateral_percentile`, the right.
    pub lateral_percentile: f32,
}

impl Default for WingParams {
    fn default() -> Self {
        Self {
            aft_fraction: 0.3,
            lateral_percentile: 20.0,
        }
    }
}

/// Lateral extremes of the aft section, where wings and winglets sit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WingProtrusions {
    /// Coordinate on the length axis above which vertices count as aft.
    pub aft_cut: f32,
    pub aft_vertices: usize,
    pub left: Option<Vec3>,
    pub right: Option<Vec3>,
}

pub fn wing_protrusions(
    mesh: &Mesh,
    length_axis: Axis,
    lateral_axis: Axis,
    params: WingParams,
) -> AnalysisResult<WingProtrusions> {
    if lateral_axis == length_axis {
        return Err(AnalysisError::invalid_params("lateral axis must differ from length axis"));
    }
    if !(params.aft_fraction > 0.0 && params.aft_fraction <= 1.0) {
        return Err(AnalysisError::invalid_params("aft_fraction must be in (0, 1]"));
    }
    if !(0.0..50.0).contains(&params.lateral_percentile) {
        return Err(AnalysisError::invalid_params("lateral_percentile must be in [0, 50)"));
    }
    let bounds = mesh.bounds().ok_or(AnalysisError::EmptyMesh)?;
    let aft_cut = length_axis.of(bounds.max) - bounds.extent(length_axis) * params.aft_fraction;
    let aft = Region::select(
        "aft",
        mesh,
        Predicate::Above {
            axis: length_axis,
            value: aft_cut,
        },
    );
    let left = aft.refine(
        "left_wing",
        Predicate::BelowPercentile {
            axis: lateral_axis,
            percentile: params.lateral_percentile,
        },
    );
    let right = aft.refine(
        "right_wing",
        Predicate::AbovePercentile {
            axis: lateral_axis,
            percentile: 100.0 - params.lateral_percentile,
        },
    );

    Ok(WingProtrusions {
        aft_cut,
        aft_vertices: aft.len(),
        left: left.mean(),
        right: right.mean(),
    })
}

/// Vertex counts either side of the centroid on the lateral axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Symmetry {
    pub axis: Axis,
    pub left: usize,
    pub right: usize,
}

impl Symmetry {
    /// Right / left count, 1.0 for a balanced hull. `None` when the left side is empty.
    pub fn ratio(&self) -> Option<f32> {
        (self.left > 0).then(|| self.right as f32 / self.left as f32)
    }
}

pub fn symmetry(mesh: &Mesh, lateral_axis: Axis) -> AnalysisResult<Symmetry> {
    let centroid = mesh.centroid().ok_or(AnalysisError::EmptyMesh)?;
    let (left, right) = Region::whole("hull", mesh.vertices()).split(
        lateral_axis,
        lateral_axis.of(centroid),
        ("left", "right"),
    );
    Ok(Symmetry {
        axis: lateral_axis,
        left: left.len(),
        right: right.len(),
    })
}

/// Mean of the highest vertices (above `percentile` on `up_axis`) within
/// `band` of the centroid along `length_axis`. Finds bridge towers and
/// dorsal fins. `None` when the band is empty.
pub fn dorsal_peak(
    mesh: &Mesh,
    length_axis: Axis,
    up_axis: Axis,
    band: f32,
    percentile: f32,
) -> AnalysisResult<Option<Vec3>> {
    if up_axis == length_axis {
        return Err(AnalysisError::invalid_params("up axis must differ from length axis"));
    }
    let centroid = mesh.centroid().ok_or(AnalysisError::EmptyMesh)?;
    let mid = Region::select(
        "midship",
        mesh,
        Predicate::Band {
            axis: length_axis,
            center: length_axis.of(centroid),
            half_width: band,
        },
    );
    let top = mid.refine(
        "dorsal",
        Predicate::AbovePercentile {
            axis: up_axis,
            percentile,
        },
    );
    Ok(top.mean())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hull along Z (0..=100) with three exhaust bells packed into the stern.
    fn ship_with_exhausts() -> Mesh {
        let mut vertices = Vec::new();
        for z in 0..=100 {
            for x in [-20.0, 20.0] {
                vertices.push(Vec3::new(x, 0.0, z as f32));
            }
        }
        for bell_x in [-15.0, 0.0, 15.0] {
            for i in 0..50 {
                let a = i as f32 * 0.4;
                vertices.push(Vec3::new(bell_x + a.cos(), a.sin(), 98.0 + (i % 3) as f32));
            }
        }
        Mesh::from_vertices(vertices)
    }

    #[test]
    fn exhaust_clusters_finds_each_bell() {
        let survey = exhaust_clusters(&ship_with_exhausts(), Axis::Z, ExhaustParams::default()).unwrap();
        assert!((survey.tail_cut - 95.0).abs() < 1e-4);
        assert!(survey.tail_vertices > 150);
        assert_eq!(survey.clusters.len(), 3);
        let mut xs: Vec<f32> = survey.clusters.iter().map(|c| c.centroid.x).collect();
        xs.sort_by(|a, b| a.total_cmp(b));
        assert!((xs[0] + 15.0).abs() < 1.0);
        assert!(xs[1].abs() < 1.0);
        assert!((xs[2] - 15.0).abs() < 1.0);
    }

    #[test]
    fn exhaust_clusters_far_from_origin() {
        let shifted: Vec<Vec3> = ship_with_exhausts()
            .vertices()
            .iter()
            .map(|&v| v + Vec3::new(0.0, 1e10, 0.0))
            .collect();
        let mesh = Mesh::from_vertices(shifted);
        let survey = exhaust_clusters(&mesh, Axis::Z, ExhaustParams::default()).unwrap();
        assert_eq!(survey.clusters.len(), 3);
    }

    #[test]
    fn exhaust_clusters_skips_sparse_stern() {
        let mesh = Mesh::from_vertices((0..=100).map(|z| Vec3::new(0.0, 0.0, z as f32)).collect());
        let survey = exhaust_clusters(&mesh, Axis::Z, ExhaustParams::default()).unwrap();
        assert_eq!(survey.tail_vertices, 5);
        assert!(survey.clusters.is_empty());
    }

    #[test]
    fn wing_protrusions_finds_aft_wings() {
        let mut vertices = Vec::new();
        for z in 0..=100 {
            for x in [-2.0, -1.0, 0.0, 1.0, 2.0] {
                vertices.push(Vec3::new(x, 0.0, z as f32));
            }
        }
        for z in 80..=100 {
            for x in [-15.0, -14.0, 14.0, 15.0] {
                vertices.push(Vec3::new(x, 1.0, z as f32));
            }
        }
        let mesh = Mesh::from_vertices(vertices);
        let wings = wing_protrusions(&mesh, Axis::Z, Axis::X, WingParams::default()).unwrap();

        assert!((wings.aft_cut - 70.0).abs() < 1e-4);
        assert_eq!(wings.aft_vertices, 30 * 5 + 21 * 4);
        let left = wings.left.unwrap();
        let right = wings.right.unwrap();
        assert!((left - Vec3::new(-14.5, 1.0, 90.0)).length() < 1e-4);
        assert!((right - Vec3::new(14.5, 1.0, 90.0)).length() < 1e-4);
    }

    #[test]
    fn wing_protrusions_rejects_bad_params() {
        let mesh = Mesh::from_vertices(vec![Vec3::ZERO, Vec3::Z]);
        assert!(wing_protrusions(&mesh, Axis::Z, Axis::Z, WingParams::default()).is_err());
        let wide = WingParams {
            lateral_percentile: 60.0,
            ..WingParams::default()
        };
        assert!(wing_protrusions(&mesh, Axis::Z, Axis::X, wide).is_err());
        assert_eq!(
            wing_protrusions(&Mesh::default(), Axis::Z, Axis::X, WingParams::default()),
            Err(AnalysisError::EmptyMesh)
        );
    }

    #[test]
    fn symmetry_counts_both_sides() {
        let mesh = Mesh::from_vertices(vec![
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(-2.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 5.0),
        ]);
        let s = symmetry(&mesh, Axis::X).unwrap();
        assert_eq!((s.left, s.right), (2, 2));
        assert_eq!(s.ratio(), Some(1.0));

        let lopsided = Symmetry { axis: Axis::X, left: 0, right: 3 };
        assert_eq!(lopsided.ratio(), None);
    }

    #[test]
    fn dorsal_peak_finds_tower() {
        let mut vertices = Vec::new();
        for z in -50..=50 {
            for x in [-5.0, 5.0] {
                vertices.push(Vec3::new(x, 0.0, z as f32));
            }
        }
        // Tower near midship
        for y in 1..=10 {
            vertices.push(Vec3::new(0.0, (y * 3) as f32, 2.0));
        }
        let mesh = Mesh::from_vertices(vertices);
        let peak = dorsal_peak(&mesh, Axis::Z, Axis::Y, 20.0, 90.0).unwrap().unwrap();
        assert!(peak.y > 15.0);
        assert!((peak.z - 2.0).abs() < 1e-4);
        assert!(dorsal_peak(&mesh, Axis::Z, Axis::Z, 20.0, 90.0).is_err());
    }
}
