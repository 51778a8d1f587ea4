//! One survey pass over a model: load, measure, inspect, estimate, scale.

use crate::config::{ModelEntry, SurveyConfig};
use analysis::{
    components, dorsal_peak, exhaust_clusters, slice_profile, symmetry, wing_protrusions,
    Component, Dimensions, ExhaustParams, ExhaustSurvey, ProfileParams, Slice, Symmetry,
    WingParams, WingProtrusions,
};
use anyhow::{Context, Result};
use estimator::{HardpointEstimator, HardpointSet, ScaledHardpoint, SceneScale};
use geometry::{Axis, Mesh};
use glam::Vec3;
use loader::MeshLoader;

/// Percentile on the up axis that counts as "top" for the dorsal peak.
const DORSAL_PERCENTILE: f32 = 90.0;

/// Everything learned about one model.
#[derive(Debug, Clone)]
pub struct ModelSurvey {
    pub name: String,
    pub dimensions: Dimensions,
    pub lateral_axis: Axis,
    pub profile: Vec<Slice>,
    /// Edge-connected parts, largest first.
    pub components: Vec<Component>,
    pub exhaust: ExhaustSurvey,
    pub wings: WingProtrusions,
    pub symmetry: Symmetry,
    /// Half-width of the midship band searched for a dorsal peak.
    pub dorsal_band: f32,
    pub dorsal_peak: Option<Vec3>,
    pub hardpoints: HardpointSet,
    pub scale: SceneScale,
    pub scaled: Vec<ScaledHardpoint>,
    pub hit_radius: f32,
}

/// Load `model` through `loader` and survey it.
pub fn survey_model(
    loader: &impl MeshLoader,
    estimator: &HardpointEstimator,
    config: &SurveyConfig,
    model: &ModelEntry,
) -> Result<ModelSurvey> {
    let mesh = loader
        .load(&model.path)
        .with_context(|| format!("loading {}", model.path.display()))?;
    survey_mesh(&mesh, estimator, config, model)
}

/// Survey an already loaded mesh.
pub fn survey_mesh(
    mesh: &Mesh,
    estimator: &HardpointEstimator,
    config: &SurveyConfig,
    model: &ModelEntry,
) -> Result<ModelSurvey> {
    let axis = model.length_axis;
    let dimensions = Dimensions::measure(mesh, axis)?;
    if dimensions.length_axis_disagrees() {
        log::warn!(
            "{}: configured length axis {} is shorter than {} ({:.3} < {:.3})",
            model.name,
            axis,
            dimensions.longest_axis,
            dimensions.length(),
            dimensions.bounds.extent(dimensions.longest_axis)
        );
    }

    let native_length = match model.native_length {
        Some(configured) => {
            let measured = dimensions.length();
            if (configured - measured).abs() > 0.01 * measured {
                log::warn!(
                    "{}: configured native length {configured} differs from measured {measured:.3}",
                    model.name
                );
            }
            configured
        }
        None => dimensions.length(),
    };

    let profile = slice_profile(
        mesh,
        axis,
        ProfileParams {
            stations: config.profile_stations,
            ..ProfileParams::default()
        },
    )?;
    let parts = components(mesh)?;
    let exhaust = exhaust_clusters(mesh, axis, ExhaustParams::default())?;
    let lateral_axis = dimensions.bounds.widest_of(&axis.others());
    let wings = wing_protrusions(mesh, axis, lateral_axis, WingParams::default())?;
    let balance = symmetry(mesh, lateral_axis)?;
    let dorsal_band = model
        .dorsal_band
        .unwrap_or(config.dorsal_band_fraction * dimensions.length());
    let dorsal = if model.up_axis == axis {
        log::warn!("{}: up axis equals length axis, skipping dorsal peak", model.name);
        None
    } else {
        dorsal_peak(mesh, axis, model.up_axis, dorsal_band, DORSAL_PERCENTILE)?
    };

    let hardpoints = estimator.estimate_with_fallback(mesh, axis)?;
    let scale = SceneScale::new(native_length, model.desired_length)
        .with_context(|| format!("scaling {}", model.name))?;
    let scaled = scale.convert(&hardpoints, config.conservative_factor);
    let hit_radius = scale.hit_radius(config.hit_radius_fraction);

    log::info!(
        "{}: {} weapons, {} engines, model scale {:.5}",
        model.name,
        hardpoints.weapons.len(),
        hardpoints.engines.len(),
        scale.model_scale()
    );

    Ok(ModelSurvey {
        name: model.name.clone(),
        dimensions,
        lateral_axis,
        profile,
        components: parts,
        exhaust,
        wings,
        symmetry: balance,
        dorsal_band,
        dorsal_peak: dorsal,
        hardpoints,
        scale,
        scaled,
        hit_radius,
    })
}
