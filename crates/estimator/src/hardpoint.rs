//! Hardpoint estimation: weapon and engine mounts read off raw mesh geometry.
//!
//! The ship is cut along its length axis into a front region and a rear
//! region around the vertex centroid. Weapons come from the lateral halves
//! of the front region, the main engine is the aft-most vertex, and
//! secondary engines come from the lateral halves of the rear region.
//! Every position is a vertex or a mean of vertices, so nothing lands
//! outside the hull's bounding volume.

use crate::error::{HardpointError, HardpointResult};
use geometry::{Axis, Bounds, Extreme, Mesh, Predicate, Region};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a hardpoint mounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HardpointRole {
    Weapon,
    Engine,
}

impl fmt::Display for HardpointRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HardpointRole::Weapon => f.write_str("weapon"),
            HardpointRole::Engine => f.write_str("engine"),
        }
    }
}

/// A named attachment point in the mesh's native coordinate space.
#[derive(Debug, Clone, PartialEq)]
pub struct Hardpoint {
    pub position: Vec3,
    pub role: HardpointRole,
    /// Free-form label (e.g. `left_cannon`, `main`).
    pub kind: String,
    /// Effect size relative to the main engine. Engines only.
    pub relative_scale: Option<f32>,
}

impl Hardpoint {
    pub fn weapon(position: Vec3, kind: impl Into<String>) -> Self {
        Self {
            position,
            role: HardpointRole::Weapon,
            kind: kind.into(),
            relative_scale: None,
        }
    }

    pub fn engine(position: Vec3, kind: impl Into<String>, relative_scale: f32) -> Self {
        Self {
            position,
            role: HardpointRole::Engine,
            kind: kind.into(),
            relative_scale: Some(relative_scale),
        }
    }
}

/// Result of one estimation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HardpointSet {
    pub weapons: Vec<Hardpoint>,
    pub engines: Vec<Hardpoint>,
}

impl HardpointSet {
    /// Weapons first, then engines.
    pub fn iter(&self) -> impl Iterator<Item = &Hardpoint> {
        self.weapons.iter().chain(self.engines.iter())
    }

    pub fn len(&self) -> usize {
        self.weapons.len() + self.engines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty() && self.engines.is_empty()
    }
}

/// Tunable estimation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    /// Front/rear cut offset from the centroid, as a fraction of the length extent.
    #[serde(default = "default_region_fraction")]
    pub region_fraction: f32,
    /// Each rear half must hold more vertices than this to yield a secondary engine.
    #[serde(default = "default_secondary_min_vertices")]
    pub secondary_min_vertices: usize,
    /// Relative scale given to secondary engines.
    #[serde(default = "default_secondary_scale")]
    pub secondary_scale: f32,
}

fn default_region_fraction() -> f32 {
    0.25
}
fn default_secondary_min_vertices() -> usize {
    5
}
fn default_secondary_scale() -> f32 {
    0.7
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            region_fraction: default_region_fraction(),
            secondary_min_vertices: default_secondary_min_vertices(),
            secondary_scale: default_secondary_scale(),
        }
    }
}

impl EstimatorConfig {
    pub fn validate(&self) -> HardpointResult<()> {
        if !(self.region_fraction > 0.0 && self.region_fraction < 0.5) {
            return Err(HardpointError::invalid_config(format!(
                "region_fraction must be in (0, 0.5), got {}",
                self.region_fraction
            )));
        }
        if !(self.secondary_scale > 0.0 && self.secondary_scale <= 1.0) {
            return Err(HardpointError::invalid_config(format!(
                "secondary_scale must be in (0, 1], got {}",
                self.secondary_scale
            )));
        }
        Ok(())
    }
}

/// Axes and reference points of one mesh, measured once per estimation.
#[derive(Debug, Clone, Copy)]
struct ShipFrame {
    centroid: Vec3,
    length_axis: Axis,
    lateral_axis: Axis,
    length_extent: f32,
}

impl ShipFrame {
    fn measure(mesh: &Mesh, length_axis: Axis) -> HardpointResult<Self> {
        if mesh.is_empty() {
            return Err(HardpointError::invalid_mesh("mesh has no vertices"));
        }
        if !mesh.is_finite() {
            return Err(HardpointError::invalid_mesh("mesh has non-finite coordinates"));
        }
        let bounds: Bounds = mesh
            .bounds()
            .ok_or_else(|| HardpointError::invalid_mesh("mesh has no vertices"))?;
        let centroid = mesh
            .centroid()
            .ok_or_else(|| HardpointError::invalid_mesh("mesh has no vertices"))?;

        let length_extent = bounds.extent(length_axis);
        if length_extent <= 0.0 {
            return Err(HardpointError::invalid_mesh(format!(
                "mesh has zero extent along {length_axis}"
            )));
        }

        Ok(Self {
            centroid,
            length_axis,
            lateral_axis: bounds.widest_of(&length_axis.others()),
            length_extent,
        })
    }

    fn front_cut(&self, k: f32) -> f32 {
        self.length_axis.of(self.centroid) - k * self.length_extent
    }

    fn rear_cut(&self, k: f32) -> f32 {
        self.length_axis.of(self.centroid) + k * self.length_extent
    }
}

/// Derives weapon and engine hardpoints from mesh geometry.
#[derive(Debug, Clone, Default)]
pub struct HardpointEstimator {
    config: EstimatorConfig,
}

impl HardpointEstimator {
    pub fn new(config: EstimatorConfig) -> HardpointResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Estimate hardpoints for a ship whose long dimension lies on `length_axis`.
    /// The negative end of that axis is the bow.
    pub fn estimate(&self, mesh: &Mesh, length_axis: Axis) -> HardpointResult<HardpointSet> {
        let frame = ShipFrame::measure(mesh, length_axis)?;
        Ok(HardpointSet {
            weapons: self.weapons(mesh, &frame)?,
            engines: self.engines(mesh, &frame)?,
        })
    }

    /// Like [`estimate`](Self::estimate), but an empty front or rear region is
    /// replaced by a single hardpoint at that end's extreme vertex.
    pub fn estimate_with_fallback(
        &self,
        mesh: &Mesh,
        length_axis: Axis,
    ) -> HardpointResult<HardpointSet> {
        let frame = ShipFrame::measure(mesh, length_axis)?;
        let whole = Region::whole("hull", mesh.vertices());

        let weapons = match self.weapons(mesh, &frame) {
            Err(HardpointError::EmptyRegion { region }) => {
                log::warn!("{region} region empty, falling back to the fore-most vertex");
                whole
                    .extreme(length_axis, Extreme::Min)
                    .map(|p| vec![Hardpoint::weapon(p, "nose_cannon")])
                    .unwrap_or_default()
            }
            other => other?,
        };
        let engines = match self.engines(mesh, &frame) {
            Err(HardpointError::EmptyRegion { region }) => {
                log::warn!("{region} region empty, falling back to the aft-most vertex");
                whole
                    .extreme(length_axis, Extreme::Max)
                    .map(|p| vec![Hardpoint::engine(p, "main", 1.0)])
                    .unwrap_or_default()
            }
            other => other?,
        };

        Ok(HardpointSet { weapons, engines })
    }

    fn weapons(&self, mesh: &Mesh, frame: &ShipFrame) -> HardpointResult<Vec<Hardpoint>> {
        let front = Region::select(
            "front",
            mesh,
            Predicate::Below {
                axis: frame.length_axis,
                value: frame.front_cut(self.config.region_fraction),
            },
        );
        let Some(front_mean) = front.mean() else {
            return Err(HardpointError::EmptyRegion { region: "front" });
        };
        log::debug!("front region: {} vertices", front.len());

        let (left, right) = front.split(
            frame.lateral_axis,
            frame.lateral_axis.of(front_mean),
            ("front_left", "front_right"),
        );
        match (left.mean(), right.mean()) {
            (Some(l), Some(r)) => Ok(vec![
                Hardpoint::weapon(l, "left_cannon"),
                Hardpoint::weapon(r, "right_cannon"),
            ]),
            _ => Ok(vec![Hardpoint::weapon(front_mean, "center_cannon")]),
        }
    }

    fn engines(&self, mesh: &Mesh, frame: &ShipFrame) -> HardpointResult<Vec<Hardpoint>> {
        let rear = Region::select(
            "rear",
            mesh,
            Predicate::Above {
                axis: frame.length_axis,
                value: frame.rear_cut(self.config.region_fraction),
            },
        );
        let (Some(rear_mean), Some(aft_most)) =
            (rear.mean(), rear.extreme(frame.length_axis, Extreme::Max))
        else {
            return Err(HardpointError::EmptyRegion { region: "rear" });
        };
        log::debug!("rear region: {} vertices", rear.len());

        let mut engines = vec![Hardpoint::engine(aft_most, "main", 1.0)];

        let (left, right) = rear.split(
            frame.lateral_axis,
            frame.lateral_axis.of(rear_mean),
            ("rear_left", "rear_right"),
        );
        let min = self.config.secondary_min_vertices;
        if left.len() > min && right.len() > min {
            let scale = self.config.secondary_scale;
            if let (Some(l), Some(r)) = (left.mean(), right.mean()) {
                engines.push(Hardpoint::engine(l, "left_secondary", scale));
                engines.push(Hardpoint::engine(r, "right_secondary", scale));
            }
        } else {
            log::debug!(
                "rear halves too sparse for secondary engines ({} / {}, need > {min})",
                left.len(),
                right.len()
            );
        }

        Ok(engines)
    }
}

/// Estimate with the default configuration.
pub fn estimate(mesh: &Mesh, length_axis: Axis) -> HardpointResult<HardpointSet> {
    HardpointEstimator::default().estimate(mesh, length_axis)
}
