//! Plain-text survey report and the pasteable scene config block.

use crate::survey::ModelSurvey;
use analysis::widest_slice;
use estimator::ScaledHardpoint;
use glam::Vec3;
use std::fmt;

const MAX_LISTED_PARTS: usize = 5;

fn vec(v: Vec3) -> String {
    format!("({:.3}, {:.3}, {:.3})", v.x, v.y, v.z)
}

impl fmt::Display for ModelSurvey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &self.dimensions;
        writeln!(f, "=== {} ===", self.name)?;
        writeln!(f, "vertices: {}  faces: {}", d.vertex_count, d.face_count)?;
        writeln!(f, "bounds:   {} .. {}", vec(d.bounds.min), vec(d.bounds.max))?;
        writeln!(f, "size:     {}", vec(d.size))?;
        writeln!(f, "center:   {}  centroid: {}", vec(d.center), vec(d.centroid))?;
        writeln!(
            f,
            "length axis: {} (front {:.3}, rear {:.3}, length {:.3}); longest axis: {}",
            d.length_axis,
            d.front,
            d.rear,
            d.length(),
            d.longest_axis
        )?;
        if d.length_axis_disagrees() {
            writeln!(f, "  ! length axis is not the longest axis")?;
        }

        writeln!(f, "\ncross-section along {}:", d.length_axis)?;
        let [first, second] = d.length_axis.others();
        for s in &self.profile {
            writeln!(
                f,
                "  {:>10.3}: {:>6} verts  {first} {:.3}  {second} {:.3}",
                s.station, s.vertex_count, s.first_range, s.second_range
            )?;
        }
        if let Some(widest) = widest_slice(&self.profile) {
            writeln!(f, "  widest at {:.3}", widest.station)?;
        }

        writeln!(f, "\n{} connected parts", self.components.len())?;
        for (i, part) in self.components.iter().take(MAX_LISTED_PARTS).enumerate() {
            writeln!(
                f,
                "  #{i}: {} faces, {} verts, center {}, size {}",
                part.faces,
                part.vertices,
                vec(part.centroid),
                vec(part.bounds.size())
            )?;
        }
        if self.components.len() > MAX_LISTED_PARTS {
            writeln!(f, "  ... {} more", self.components.len() - MAX_LISTED_PARTS)?;
        }

        writeln!(
            f,
            "\nstern slab beyond {:.3}: {} vertices, {} exhaust clusters",
            self.exhaust.tail_cut,
            self.exhaust.tail_vertices,
            self.exhaust.clusters.len()
        )?;
        for c in &self.exhaust.clusters {
            writeln!(f, "  #{}: {} verts at {}", c.label, c.size, vec(c.centroid))?;
        }

        writeln!(
            f,
            "\naft section beyond {:.3}: {} vertices",
            self.wings.aft_cut, self.wings.aft_vertices
        )?;
        for (side, center) in [("left", self.wings.left), ("right", self.wings.right)] {
            match center {
                Some(p) => writeln!(f, "  {side} wing: {}", vec(p))?,
                None => writeln!(f, "  {side} wing: none")?,
            }
        }

        write!(
            f,
            "\nsymmetry on {}: {} left / {} right",
            self.symmetry.axis, self.symmetry.left, self.symmetry.right
        )?;
        match self.symmetry.ratio() {
            Some(r) => writeln!(f, " (ratio {r:.3})")?,
            None => writeln!(f)?,
        }
        match self.dorsal_peak {
            Some(p) => writeln!(f, "dorsal peak (band {:.3}): {}", self.dorsal_band, vec(p))?,
            None => writeln!(f, "dorsal peak (band {:.3}): none", self.dorsal_band)?,
        }

        writeln!(f, "\nhardpoints (native, lateral axis {}):", self.lateral_axis)?;
        if self.hardpoints.is_empty() {
            writeln!(f, "  none")?;
        }
        for hp in self.hardpoints.iter() {
            match hp.relative_scale {
                Some(s) => writeln!(f, "  {} {:<16} {}  scale {s:.2}", hp.role, hp.kind, vec(hp.position))?,
                None => writeln!(f, "  {} {:<16} {}", hp.role, hp.kind, vec(hp.position))?,
            }
        }

        writeln!(
            f,
            "\nscene: native {:.3} -> desired {:.3}, model scale {:.5}, hit radius {:.3}",
            self.scale.native_length(),
            self.scale.desired_length(),
            self.scale.model_scale(),
            self.hit_radius
        )?;
        for hp in &self.scaled {
            match hp.effect_scale {
                Some(s) => writeln!(f, "  {} {:<16} {}  effect {s:.3}", hp.role, hp.kind, vec(hp.position))?,
                None => writeln!(f, "  {} {:<16} {}", hp.role, hp.kind, vec(hp.position))?,
            }
        }

        writeln!(f)?;
        write!(f, "{}", ConfigSnippet::new(self))
    }
}

/// Ship entry formatted for pasting into the scene's ship table.
pub struct ConfigSnippet<'a> {
    name: &'a str,
    native_length: f32,
    desired_length: f32,
    hardpoints: &'a [ScaledHardpoint],
}

impl<'a> ConfigSnippet<'a> {
    pub fn new(survey: &'a ModelSurvey) -> Self {
        Self {
            name: &survey.name,
            native_length: survey.scale.native_length(),
            desired_length: survey.scale.desired_length(),
            hardpoints: &survey.scaled,
        }
    }
}

fn position(v: Vec3) -> String {
    format!("{{ x: {:.3}, y: {:.3}, z: {:.3} }}", v.x, v.y, v.z)
}

impl fmt::Display for ConfigSnippet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "'{}': {{", self.name)?;
        writeln!(f, "    nativeLength: {},", self.native_length)?;
        writeln!(f, "    desiredLength: {},", self.desired_length)?;
        writeln!(f, "    weaponHardpoints: [")?;
        for hp in self.hardpoints.iter().filter(|hp| !hp.is_engine()) {
            writeln!(
                f,
                "        {{ position: {}, type: '{}' }},",
                position(hp.position),
                hp.kind
            )?;
        }
        writeln!(f, "    ],")?;
        writeln!(f, "    enginePositions: [")?;
        for hp in self.hardpoints.iter().filter(|hp| hp.is_engine()) {
            writeln!(
                f,
                "        {{ position: {}, scale: {:.3}, type: '{}' }},",
                position(hp.position),
                hp.effect_scale.unwrap_or(1.0),
                hp.kind
            )?;
        }
        writeln!(f, "    ]")?;
        writeln!(f, "}},")
    }
}
