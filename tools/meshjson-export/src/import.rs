//! Import pipeline (.json -> Wavefront OBJ)
//!
//! The OBJ writer stands in for a host mesh builder: it receives the vertex
//! list, the face list and, when present, one normal per face corner.

use anyhow::{Context, Result};
use meshjson_common::{MeshArrays, Reconstruction, expand};
use std::io::{self, Write};
use std::path::Path;

use crate::fs::{MAX_MESH_JSON_BYTES, read_file_with_limit, write_atomic};

/// Statistics of a completed import
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub vertex_count: usize,
    pub face_count: usize,
    pub has_normals: bool,
}

/// Read a mesh JSON file and build reconstruction data (no output written).
pub fn import_to_memory(input: &Path) -> Result<Reconstruction> {
    let bytes = read_file_with_limit(input, MAX_MESH_JSON_BYTES)?;
    let arrays = MeshArrays::from_slice(&bytes)
        .with_context(|| format!("Failed to parse mesh JSON: {:?}", input))?;
    let reconstruction =
        expand(&arrays).with_context(|| format!("Malformed mesh data: {:?}", input))?;
    Ok(reconstruction)
}

/// Convert a mesh JSON file to OBJ.
///
/// Malformed input aborts before anything is written; the output file is
/// replaced atomically.
pub fn import_mesh(input: &Path, output: &Path) -> Result<ImportSummary> {
    let reconstruction = import_to_memory(input)?;

    let mut obj = Vec::new();
    write_obj(&mut obj, &reconstruction)?;
    write_atomic(output, &obj)?;

    let summary = ImportSummary {
        vertex_count: reconstruction.vertices.len(),
        face_count: reconstruction.faces.len(),
        has_normals: reconstruction.loop_normals.is_some(),
    };
    tracing::info!(
        "Imported mesh: {} vertices, {} faces, normals={}",
        summary.vertex_count,
        summary.face_count,
        summary.has_normals
    );

    Ok(summary)
}

/// Write reconstruction data as Wavefront OBJ.
///
/// Emits one `vn` per face corner so the file carries the same per-corner
/// normals a mesh builder would receive.
pub fn write_obj<W: Write>(w: &mut W, mesh: &Reconstruction) -> io::Result<()> {
    for [x, y, z] in &mesh.vertices {
        writeln!(w, "v {} {} {}", x, y, z)?;
    }

    match &mesh.loop_normals {
        Some(normals) => {
            for [x, y, z] in normals {
                writeln!(w, "vn {} {} {}", x, y, z)?;
            }
            for (f, [a, b, c]) in mesh.faces.iter().enumerate() {
                let n = f * 3 + 1;
                writeln!(
                    w,
                    "f {}//{} {}//{} {}//{}",
                    a + 1,
                    n,
                    b + 1,
                    n + 1,
                    c + 1,
                    n + 2
                )?;
            }
        }
        None => {
            for [a, b, c] in &mesh.faces {
                writeln!(w, "f {} {} {}", a + 1, b + 1, c + 1)?;
            }
        }
    }

    Ok(())
}
