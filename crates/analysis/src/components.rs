//! Connected parts of a mesh.
//!
//! Two faces belong to the same part when they share an edge. Vertices are
//! welded by exact position first, so copies split along UV or normal
//! seams do not cut a part in two.

use crate::error::{AnalysisError, AnalysisResult};
use geometry::{mean_of, Bounds, Mesh};
use glam::Vec3;
use std::collections::HashMap;

/// One edge-connected part.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub faces: usize,
    /// Distinct vertex positions.
    pub vertices: usize,
    pub centroid: Vec3,
    pub bounds: Bounds,
}

/// Edge-connected components, largest (by face count) first.
///
/// Faces that reference missing vertices are ignored. A mesh without faces
/// has no components.
pub fn components(mesh: &Mesh) -> AnalysisResult<Vec<Component>> {
    if mesh.is_empty() {
        return Err(AnalysisError::EmptyMesh);
    }

    let mut welded: HashMap<[u32; 3], u32> = HashMap::new();
    let mut positions: Vec<Vec3> = Vec::new();
    let ids: Vec<u32> = mesh
        .vertices()
        .iter()
        .map(|&v| {
            // + 0.0 folds -0.0 into 0.0
            let key = (v + Vec3::ZERO).to_array().map(f32::to_bits);
            *welded.entry(key).or_insert_with(|| {
                positions.push(v);
                (positions.len() - 1) as u32
            })
        })
        .collect();

    let faces: Vec<[u32; 3]> = mesh
        .faces()
        .iter()
        .filter(|f| f.iter().all(|&i| (i as usize) < ids.len()))
        .map(|f| f.map(|i| ids[i as usize]))
        .collect();

    let mut edge_faces: HashMap<(u32, u32), Vec<usize>> = HashMap::new();
    for (face_idx, face) in faces.iter().enumerate() {
        for k in 0..3 {
            let (a, b) = (face[k], face[(k + 1) % 3]);
            if a == b {
                continue;
            }
            let edge = if a < b { (a, b) } else { (b, a) };
            edge_faces.entry(edge).or_default().push(face_idx);
        }
    }

    let mut adjacent: Vec<Vec<usize>> = vec![Vec::new(); faces.len()];
    for shared in edge_faces.values() {
        let first = shared[0];
        for &other in &shared[1..] {
            adjacent[first].push(other);
            adjacent[other].push(first);
        }
    }

    let mut visited = vec![false; faces.len()];
    let mut parts = Vec::new();
    for seed in 0..faces.len() {
        if visited[seed] {
            continue;
        }
        visited[seed] = true;
        let mut stack = vec![seed];
        let mut face_count = 0;
        let mut members: Vec<u32> = Vec::new();
        while let Some(face_idx) = stack.pop() {
            face_count += 1;
            members.extend_from_slice(&faces[face_idx]);
            for &next in &adjacent[face_idx] {
                if !visited[next] {
                    visited[next] = true;
                    stack.push(next);
                }
            }
        }
        members.sort_unstable();
        members.dedup();

        let points = members.iter().map(|&id| positions[id as usize]);
        let (Some(centroid), Some(bounds)) = (mean_of(points.clone()), Bounds::from_points(points))
        else {
            continue;
        };
        parts.push(Component {
            faces: face_count,
            vertices: members.len(),
            centroid,
            bounds,
        });
    }

    parts.sort_by(|a, b| b.faces.cmp(&a.faces));
    log::debug!("{} connected components", parts.len());
    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad(origin: Vec3) -> (Vec<Vec3>, Vec<[u32; 3]>) {
        let vertices = vec![
            origin,
            origin + Vec3::X,
            origin + Vec3::new(1.0, 1.0, 0.0),
            origin + Vec3::Y,
        ];
        (vertices, vec![[0, 1, 2], [0, 2, 3]])
    }

    #[test]
    fn components_separates_disjoint_parts() {
        let (mut vertices, mut faces) = quad(Vec3::ZERO);
        let (far, far_faces) = quad(Vec3::new(10.0, 0.0, 0.0));
        vertices.extend(far);
        faces.extend(far_faces.iter().map(|f| f.map(|i| i + 4)));
        faces.push([4, 6, 7]);

        let parts = components(&Mesh::new(vertices, faces)).unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].faces, 3);
        assert_eq!(parts[1].faces, 2);
        assert_eq!(parts[1].vertices, 4);
        assert!((parts[1].centroid - Vec3::new(0.5, 0.5, 0.0)).length() < 1e-6);
        assert_eq!(parts[0].bounds.min, Vec3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn components_welds_seam_copies() {
        // Second triangle uses its own copies of the shared edge's vertices
        let vertices = vec![
            Vec3::ZERO,
            Vec3::X,
            Vec3::Y,
            Vec3::X,
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(-0.0, 1.0, 0.0),
        ];
        let parts = components(&Mesh::new(vertices, vec![[0, 1, 2], [3, 4, 5]])).unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].vertices, 4);
    }

    #[test]
    fn components_needs_a_shared_edge() {
        // Two triangles touching at a single vertex
        let vertices = vec![
            Vec3::ZERO,
            Vec3::X,
            Vec3::Y,
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
        ];
        let parts = components(&Mesh::new(vertices, vec![[0, 1, 2], [0, 3, 4]])).unwrap();
        assert_eq!(parts.len(), 2);
    }

    #[test]
    fn components_ignores_dangling_faces_and_point_clouds() {
        let (vertices, mut faces) = quad(Vec3::ZERO);
        faces.push([0, 1, 99]);
        let parts = components(&Mesh::new(vertices.clone(), faces)).unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].faces, 2);

        assert!(components(&Mesh::from_vertices(vertices)).unwrap().is_empty());
        assert_eq!(components(&Mesh::default()), Err(AnalysisError::EmptyMesh));
    }
}
