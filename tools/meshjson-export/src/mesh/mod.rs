//! Mesh sources (OBJ/glTF -> triangle stream)

mod gltf;
mod normals;
mod obj;
mod types;

use anyhow::Result;
use std::path::Path;

// Re-export public API
pub use gltf::load_gltf;
pub use obj::load_obj;
pub use types::{SourceError, SourceFormat, SourceMesh};

/// Read a mesh file as a triangle stream, picking the reader by extension.
///
/// `mesh_index` only applies to glTF files; OBJ files hold a single mesh.
pub fn load_triangles(input: &Path, mesh_index: Option<usize>) -> Result<SourceMesh> {
    match SourceFormat::from_path(input)? {
        SourceFormat::Obj => {
            if mesh_index.is_some_and(|i| i != 0) {
                tracing::warn!("Ignoring mesh index for OBJ input {:?}", input);
            }
            load_obj(input)
        }
        SourceFormat::Gltf => load_gltf(input, mesh_index),
    }
}
