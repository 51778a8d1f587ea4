//! Survey configuration (models, estimator and scale settings). Loaded from survey.ron at startup.

use estimator::EstimatorConfig;
use geometry::Axis;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One mesh asset to survey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelEntry {
    /// Name used in the report and the config snippet.
    pub name: String,
    /// Path to the `.glb` / `.gltf` file.
    pub path: PathBuf,
    /// Axis the ship's long dimension lies on. The negative end is the bow.
    #[serde(default = "default_length_axis")]
    pub length_axis: Axis,
    /// Axis pointing up, for the dorsal peak search.
    #[serde(default = "default_up_axis")]
    pub up_axis: Axis,
    /// Native length override. Defaults to the measured extent on `length_axis`.
    #[serde(default)]
    pub native_length: Option<f32>,
    /// Ship length in scene units.
    pub desired_length: f32,
    /// Half-width of the midship band searched for a dorsal peak, in native
    /// units. Defaults to `dorsal_band_fraction` of the measured length.
    #[serde(default)]
    pub dorsal_band: Option<f32>,
}

fn default_length_axis() -> Axis {
    Axis::Z
}
fn default_up_axis() -> Axis {
    Axis::Y
}

/// Survey settings. Loaded from `survey.ron` in the current directory unless a path is given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyConfig {
    #[serde(default = "default_models")]
    pub models: Vec<ModelEntry>,
    #[serde(default)]
    pub estimator: EstimatorConfig,
    /// Damping applied to engine effect sizes after model scaling.
    #[serde(default = "default_conservative_factor")]
    pub conservative_factor: f32,
    /// Hit radius as a fraction of the desired length.
    #[serde(default = "default_hit_radius_fraction")]
    pub hit_radius_fraction: f32,
    /// Cross-section stations along the length axis.
    #[serde(default = "default_profile_stations")]
    pub profile_stations: usize,
    /// Dorsal band half-width as a fraction of a model's length.
    #[serde(default = "default_dorsal_band_fraction")]
    pub dorsal_band_fraction: f32,
}

fn default_models() -> Vec<ModelEntry> {
    vec![
        ModelEntry {
            name: "Starship_Calypso".to_string(),
            path: PathBuf::from("../solar system/textures/Starship_Calypso_0521230350_texture.glb"),
            length_axis: Axis::Z,
            up_axis: Axis::Y,
            native_length: Some(142.672),
            desired_length: 20.0,
            dorsal_band: Some(20.0),
        },
        ModelEntry {
            name: "Sky_Predator".to_string(),
            path: PathBuf::from("../solar system/textures/Sky_Predator_0522121524_texture.glb"),
            length_axis: Axis::Z,
            up_axis: Axis::Y,
            native_length: Some(1.983),
            desired_length: 8.0,
            dorsal_band: None,
        },
    ]
}
fn default_conservative_factor() -> f32 {
    0.5
}
fn default_hit_radius_fraction() -> f32 {
    0.4
}
fn default_profile_stations() -> usize {
    10
}
fn default_dorsal_band_fraction() -> f32 {
    0.14
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            models: default_models(),
            estimator: EstimatorConfig::default(),
            conservative_factor: default_conservative_factor(),
            hit_radius_fraction: default_hit_radius_fraction(),
            profile_stations: default_profile_stations(),
            dorsal_band_fraction: default_dorsal_band_fraction(),
        }
    }
}

impl SurveyConfig {
    /// Load config from `path`. If the file is missing or invalid, returns default config.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(data) => match Self::from_ron(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            },
            Err(_) => log::info!("No config at {:?}, using defaults", path),
        }
        Self::default()
    }

    pub fn from_ron(data: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(data)
    }

    /// Pretty RON for logging the effective settings.
    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }
}

/// `survey.ron` in the current directory.
pub fn default_config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("survey.ron")
}
