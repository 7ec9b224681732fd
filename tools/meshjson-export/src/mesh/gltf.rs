//! glTF/GLB mesh source

use anyhow::{Context, Result, bail};
use gltf::mesh::Mode;
use meshjson_common::{LoopVertex, Triangle};
use std::path::Path;

use super::normals::smooth_normals;
use super::types::{SourceError, SourceMesh};

/// Read one mesh of a glTF/GLB file as a triangle stream.
///
/// `mesh_index` selects the mesh (default: first). All primitives of the mesh
/// are concatenated in order. Node transforms are not applied; positions are
/// in mesh space.
pub fn load_gltf(input: &Path, mesh_index: Option<usize>) -> Result<SourceMesh> {
    let (document, buffers, _images) =
        gltf::import(input).with_context(|| format!("Failed to load glTF: {:?}", input))?;

    let mesh_count = document.meshes().len();
    let index = mesh_index.unwrap_or(0);
    let mesh = match document.meshes().nth(index) {
        Some(mesh) => mesh,
        None if mesh_count == 0 => return Err(SourceError::NoMesh(input.to_path_buf()).into()),
        None => bail!(
            "Mesh index {} out of range ({} meshes in {:?})",
            index,
            mesh_count,
            input
        ),
    };

    let mut source = SourceMesh::default();

    for primitive in mesh.primitives() {
        let mode = primitive.mode();
        let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

        // Positions (required)
        let positions: Vec<[f64; 3]> = reader
            .read_positions()
            .context("No positions in mesh primitive")?
            .map(widen)
            .collect();

        // Indices (optional)
        let corners: Vec<usize> = match reader.read_indices() {
            Some(indices) => indices.into_u32().map(|i| i as usize).collect(),
            None => (0..positions.len()).collect(),
        };
        if let Some(&bad) = corners.iter().find(|&&i| i >= positions.len()) {
            bail!(
                "Primitive {} index {} out of range ({} positions)",
                primitive.index(),
                bad,
                positions.len()
            );
        }

        let tris = assemble_triangles(mode, &corners)
            .ok_or_else(|| SourceError::invalid_kind(input, format!("{:?} primitive", mode)))?;

        // Normals (optional)
        let normals: Vec<[f64; 3]> = match reader.read_normals() {
            Some(iter) => {
                let normals: Vec<[f64; 3]> = iter.map(widen).collect();
                if normals.len() != positions.len() {
                    bail!(
                        "Primitive {} has {} normals for {} positions",
                        primitive.index(),
                        normals.len(),
                        positions.len()
                    );
                }
                normals
            }
            None => {
                tracing::warn!(
                    "Primitive {} of {:?} has no normals, generating smooth normals",
                    primitive.index(),
                    input
                );
                source.generated_normals = true;
                smooth_normals(&positions, &tris)
            }
        };

        source.triangles.extend(tris.iter().map(|&tri| -> Triangle {
            tri.map(|v| LoopVertex::new(positions[v], normals[v]))
        }));
    }

    tracing::debug!(
        "Read glTF {:?} mesh {}: {} triangles",
        input,
        index,
        source.triangles.len()
    );

    Ok(source)
}

fn widen(v: [f32; 3]) -> [f64; 3] {
    v.map(f64::from)
}

/// Split a primitive's corner list into triangles.
///
/// Returns `None` for point and line modes.
fn assemble_triangles(mode: Mode, corners: &[usize]) -> Option<Vec<[usize; 3]>> {
    let tris = match mode {
        Mode::Triangles => corners
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect(),
        Mode::TriangleStrip => corners
            .windows(3)
            .enumerate()
            .map(|(i, w)| {
                if i % 2 == 0 {
                    [w[0], w[1], w[2]]
                } else {
                    [w[1], w[0], w[2]]
                }
            })
            .collect(),
        Mode::TriangleFan => corners
            .windows(2)
            .skip(1)
            .map(|w| [w[0], w[1], corners[0]])
            .collect(),
        Mode::Points | Mode::Lines | Mode::LineLoop | Mode::LineStrip => return None,
    };
    Some(tris)
}
