//! Conversion from native mesh units to in-scene units.
//!
//! Positions scale uniformly by `desired_length / native_length`. Effect
//! sizes get an extra, caller-chosen damping factor. Hit radius is derived
//! from the desired length alone and never from the model scale.

use crate::error::{HardpointError, HardpointResult};
use crate::hardpoint::{HardpointRole, HardpointSet};
use glam::Vec3;

/// A validated native → scene length ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneScale {
    native_length: f32,
    desired_length: f32,
    model_scale: f32,
}

impl SceneScale {
    /// Fails with [`HardpointError::DivisionByZero`] when `native_length` is zero.
    pub fn new(native_length: f32, desired_length: f32) -> HardpointResult<Self> {
        if native_length == 0.0 {
            return Err(HardpointError::DivisionByZero);
        }
        Ok(Self {
            native_length,
            desired_length,
            model_scale: desired_length / native_length,
        })
    }

    pub fn native_length(&self) -> f32 {
        self.native_length
    }

    pub fn desired_length(&self) -> f32 {
        self.desired_length
    }

    /// `desired_length / native_length`.
    pub fn model_scale(&self) -> f32 {
        self.model_scale
    }

    pub fn position(&self, native: Vec3) -> Vec3 {
        native * self.model_scale
    }

    pub fn effect_scale(&self, native_effect_scale: f32, conservative_factor: f32) -> f32 {
        native_effect_scale * self.model_scale * conservative_factor
    }

    /// Hit radius for this ship; see [`hit_radius`].
    pub fn hit_radius(&self, fraction: f32) -> f32 {
        hit_radius(self.desired_length, fraction)
    }

    /// Convert every hardpoint of a set. Weapons carry no effect scale.
    pub fn convert(&self, set: &HardpointSet, conservative_factor: f32) -> Vec<ScaledHardpoint> {
        set.iter()
            .map(|hp| ScaledHardpoint {
                role: hp.role,
                kind: hp.kind.clone(),
                position: self.position(hp.position),
                effect_scale: hp
                    .relative_scale
                    .map(|s| self.effect_scale(s, conservative_factor)),
            })
            .collect()
    }
}

/// A hardpoint expressed in scene units.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledHardpoint {
    pub role: HardpointRole,
    pub kind: String,
    pub position: Vec3,
    pub effect_scale: Option<f32>,
}

impl ScaledHardpoint {
    pub fn is_engine(&self) -> bool {
        self.role == HardpointRole::Engine
    }
}

/// Convert one position and effect size to scene units.
///
/// Returns `(scene_position, scene_effect_scale)`.
pub fn to_scene_units(
    native_length: f32,
    desired_length: f32,
    native_position: Vec3,
    native_effect_scale: f32,
    conservative_factor: f32,
) -> HardpointResult<(Vec3, f32)> {
    let scale = SceneScale::new(native_length, desired_length)?;
    Ok((
        scale.position(native_position),
        scale.effect_scale(native_effect_scale, conservative_factor),
    ))
}

/// Hit-detection radius: `desired_length * fraction`.
pub fn hit_radius(desired_length: f32, fraction: f32) -> f32 {
    desired_length * fraction
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardpoint::Hardpoint;

    #[test]
    fn scene_scale_matches_calypso_numbers() {
        let scale = SceneScale::new(142.672, 20.0).unwrap();
        assert!((scale.model_scale() - 20.0 / 142.672).abs() < 1e-7);
        assert!((scale.model_scale() - 0.14018).abs() < 1e-4);

        let p = scale.position(Vec3::new(23.6, 15.0, -66.5));
        assert!((p.x - 3.308).abs() < 1e-3, "x = {}", p.x);
        assert!((p.y - 2.103).abs() < 1e-3, "y = {}", p.y);
        assert!((p.z - -9.322).abs() < 1e-3, "z = {}", p.z);
    }

    #[test]
    fn zero_native_length_is_division_by_zero() {
        assert_eq!(
            to_scene_units(0.0, 20.0, Vec3::ONE, 1.0, 0.5),
            Err(HardpointError::DivisionByZero)
        );
        assert_eq!(SceneScale::new(0.0, 8.0), Err(HardpointError::DivisionByZero));
    }

    #[test]
    fn scene_position_scales_inversely_with_native_length() {
        let native = Vec3::new(12.0, -4.0, 30.0);
        let (base, _) = to_scene_units(10.0, 20.0, native, 1.0, 1.0).unwrap();
        for c in [0.5_f32, 2.0, 3.0, 10.0] {
            let (scaled, _) = to_scene_units(10.0 * c, 20.0, native, 1.0, 1.0).unwrap();
            assert!((scaled - base / c).length() < 1e-4);
        }
    }

    #[test]
    fn effect_scale_applies_conservative_factor() {
        let (_, effect) = to_scene_units(2.0, 8.0, Vec3::ZERO, 0.7, 0.5).unwrap();
        assert!((effect - 0.7 * 4.0 * 0.5).abs() < 1e-6);
    }

    #[test]
    fn hit_radius_ignores_model_scale() {
        let small = SceneScale::new(1.983, 8.0).unwrap();
        let large = SceneScale::new(142.672, 8.0).unwrap();
        assert_eq!(small.hit_radius(0.4), large.hit_radius(0.4));
        assert!((hit_radius(20.0, 0.35) - 7.0).abs() < 1e-6);
    }

    #[test]
    fn convert_keeps_roles_and_scales_engines_only() {
        let set = HardpointSet {
            weapons: vec![Hardpoint::weapon(Vec3::new(1.0, 0.0, -2.0), "left_cannon")],
            engines: vec![Hardpoint::engine(Vec3::new(0.0, 0.0, 4.0), "main", 1.0)],
        };
        let scale = SceneScale::new(2.0, 1.0).unwrap();
        let out = scale.convert(&set, 0.3);
        assert_eq!(out.len(), 2);
        assert!(!out[0].is_engine());
        assert_eq!(out[0].effect_scale, None);
        assert_eq!(out[0].position, Vec3::new(0.5, 0.0, -1.0));
        assert!(out[1].is_engine());
        assert!((out[1].effect_scale.unwrap() - 0.15).abs() < 1e-6);
    }
}
