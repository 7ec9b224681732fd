//! Export pipeline (mesh file -> .json)

use anyhow::{Context, Result};
use meshjson_common::{MeshArrays, Precision, weld};
use std::path::Path;

use crate::fs::write_atomic;
use crate::mesh::load_triangles;

/// Statistics of a completed export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSummary {
    pub triangle_count: usize,
    pub vertex_count: usize,
    pub bytes: usize,
    pub generated_normals: bool,
}

/// Read and weld a mesh file into in-memory arrays (no output written).
///
/// Returns: (arrays, normals were generated)
pub fn export_to_memory(
    input: &Path,
    precision: Precision,
    mesh_index: Option<usize>,
) -> Result<(MeshArrays, bool)> {
    let source = load_triangles(input, mesh_index)?;
    let welded = weld(source.triangles, precision)
        .with_context(|| format!("Failed to weld mesh: {:?}", input))?;
    Ok((welded.into_arrays(), source.generated_normals))
}

/// Convert a mesh file to the JSON array format.
///
/// The output file is written only if reading and welding succeed, and is
/// replaced atomically.
pub fn export_mesh(
    input: &Path,
    output: &Path,
    precision: Precision,
    mesh_index: Option<usize>,
) -> Result<ExportSummary> {
    let (arrays, generated_normals) = export_to_memory(input, precision, mesh_index)?;
    let json = arrays.to_json().context("Failed to serialize mesh JSON")?;

    write_atomic(output, json.as_bytes())?;

    let summary = ExportSummary {
        triangle_count: arrays.triangle_count(),
        vertex_count: arrays.vertex_count(),
        bytes: json.len(),
        generated_normals,
    };
    tracing::info!(
        "Exported mesh: {} triangles, {} unique vertices, precision={}, {} bytes",
        summary.triangle_count,
        summary.vertex_count,
        precision,
        summary.bytes
    );

    Ok(summary)
}
