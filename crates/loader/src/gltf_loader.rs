//! glTF 2.0 / GLB mesh loading.
//!
//! Every triangle primitive reachable from the scene graph is flattened
//! into one mesh in scene space (node transforms applied). Images are
//! never decoded; only buffers are resolved.

use crate::error::{LoadError, LoadResult};
use crate::MeshLoader;
use geometry::Mesh;
use glam::{Mat4, Vec3};
use gltf::mesh::Mode;
use std::collections::HashSet;
use std::path::Path;

/// Loads `.glb` and `.gltf` files.
#[derive(Debug, Clone, Copy)]
pub struct GltfLoader {
    /// Apply node transforms. Off gives raw per-primitive coordinates.
    pub apply_transforms: bool,
}

impl Default for GltfLoader {
    fn default() -> Self {
        Self {
            apply_transforms: true,
        }
    }
}

impl MeshLoader for GltfLoader {
    fn load(&self, path: &Path) -> LoadResult<Mesh> {
        if !path.is_file() {
            return Err(LoadError::NotFound(path.to_path_buf()));
        }

        let gltf::Gltf { document, blob } = gltf::Gltf::open(path)?;
        let buffers = gltf::import_buffers(&document, path.parent(), blob)?;

        let mut mesh = Mesh::default();
        let scene = document
            .default_scene()
            .or_else(|| document.scenes().next());
        match scene {
            Some(scene) => {
                for node in scene.nodes() {
                    self.visit(&node, Mat4::IDENTITY, &buffers, &mut mesh)?;
                }
            }
            None => {
                // No scene: treat every parentless node as a root
                let children: HashSet<usize> = document
                    .nodes()
                    .flat_map(|n| n.children().map(|c| c.index()).collect::<Vec<_>>())
                    .collect();
                for node in document.nodes().filter(|n| !children.contains(&n.index())) {
                    self.visit(&node, Mat4::IDENTITY, &buffers, &mut mesh)?;
                }
            }
        }

        if mesh.is_empty() {
            return Err(LoadError::NoGeometry(path.to_path_buf()));
        }
        if mesh.dangling_faces() > 0 {
            log::warn!(
                "{}: {} faces reference missing vertices",
                path.display(),
                mesh.dangling_faces()
            );
        }
        log::info!(
            "Loaded {}: {} vertices, {} faces",
            path.display(),
            mesh.vertex_count(),
            mesh.face_count()
        );
        Ok(mesh)
    }
}

impl GltfLoader {
    fn visit(
        &self,
        node: &gltf::Node,
        parent: Mat4,
        buffers: &[gltf::buffer::Data],
        out: &mut Mesh,
    ) -> LoadResult<()> {
        let world = if self.apply_transforms {
            parent * Mat4::from_cols_array_2d(&node.transform().matrix())
        } else {
            Mat4::IDENTITY
        };

        if let Some(gltf_mesh) = node.mesh() {
            let name = gltf_mesh
                .name()
                .map(str::to_string)
                .unwrap_or_else(|| format!("#{}", gltf_mesh.index()));
            for primitive in gltf_mesh.primitives() {
                if primitive.mode() != Mode::Triangles {
                    log::warn!("mesh '{name}': skipping {:?} primitive", primitive.mode());
                    continue;
                }
                let part = read_primitive(&primitive, buffers, &name)?;
                out.append_transformed(&part, world);
            }
        }

        for child in node.children() {
            self.visit(&child, world, buffers, out)?;
        }
        Ok(())
    }
}

fn read_primitive(
    primitive: &gltf::Primitive,
    buffers: &[gltf::buffer::Data],
    mesh_name: &str,
) -> LoadResult<Mesh> {
    let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));
    let vertices: Vec<Vec3> = reader
        .read_positions()
        .ok_or_else(|| LoadError::MissingPositions {
            mesh: mesh_name.to_string(),
        })?
        .map(Vec3::from)
        .collect();

    let indices: Vec<u32> = match reader.read_indices() {
        Some(indices) => indices.into_u32().collect(),
        None => (0..vertices.len() as u32).collect(),
    };
    let faces = indices
        .chunks_exact(3)
        .map(|t| [t[0], t[1], t[2]])
        .collect();

    Ok(Mesh::new(vertices, faces))
}
