//! Mesh reconstruction from JSON arrays
//!
//! Groups the flat arrays back into a vertex list and a face list, and expands
//! per-vertex normals to one normal per face corner for mesh builders that
//! take custom split normals.
//!
//! Normals are broadcast by *vertex index*: every corner that references
//! vertex `i` gets normal `i`. The export side welds on position and normal
//! together, so a file produced by [`crate::weld`] already carries one vertex
//! per distinct normal and nothing is lost. Files from other producers that
//! share a vertex between corners with different normals cannot express that
//! split, and it does not survive reconstruction.

use crate::error::MalformedData;
use crate::format::MeshArrays;

/// Input for rebuilding a mesh: vertices, (empty) edges, faces and optional
/// per-corner normals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconstruction {
    pub vertices: Vec<[f64; 3]>,
    /// Always empty; edges are derived from faces by the mesh builder.
    pub edges: Vec<[u32; 2]>,
    pub faces: Vec<[u32; 3]>,
    /// One normal per face corner, in face then corner order. `None` when the
    /// file carries no usable normals.
    pub loop_normals: Option<Vec<[f64; 3]>>,
}

impl Reconstruction {
    /// Number of face corners
    pub fn loop_count(&self) -> usize {
        self.faces.len() * 3
    }

    /// Per-corner normals of face `face`, if normals are present.
    pub fn face_normals(&self, face: usize) -> Option<&[[f64; 3]]> {
        let normals = self.loop_normals.as_ref()?;
        normals.get(face * 3..face * 3 + 3)
    }
}

/// Validate mesh arrays and build reconstruction data.
///
/// Fails if positions or indices are not whole triples, or if any index
/// references a missing vertex. A normals array whose length differs from the
/// positions array is not an error: normals are skipped and only positions and
/// faces are rebuilt.
pub fn expand(arrays: &MeshArrays) -> Result<Reconstruction, MalformedData> {
    let MeshArrays {
        positions,
        normals,
        indices,
    } = arrays;

    if positions.len() % 3 != 0 {
        return Err(MalformedData::PositionsNotTriples(positions.len()));
    }
    if indices.len() % 3 != 0 {
        return Err(MalformedData::IndicesNotTriples(indices.len()));
    }

    let vertices = group_triples(positions.iter().map(|n| n.as_f64()));
    let vertex_count = vertices.len();

    if let Some((slot, &index)) = indices
        .iter()
        .enumerate()
        .find(|&(_, &i)| i as usize >= vertex_count)
    {
        return Err(MalformedData::IndexOutOfRange {
            slot,
            index,
            vertex_count,
        });
    }

    let faces = group_triples(indices.iter().copied());

    let loop_normals = if normals.len() == positions.len() {
        let per_vertex = group_triples(normals.iter().map(|n| n.as_f64()));
        Some(
            indices
                .iter()
                .map(|&i| per_vertex[i as usize])
                .collect::<Vec<_>>(),
        )
    } else {
        tracing::warn!(
            "Normal array length {} does not match position array length {}, skipping normals",
            normals.len(),
            positions.len()
        );
        None
    };

    tracing::debug!(
        "Expanded {} vertices, {} faces (normals: {})",
        vertex_count,
        faces.len(),
        loop_normals.is_some()
    );

    Ok(Reconstruction {
        vertices,
        edges: Vec::new(),
        faces,
        loop_normals,
    })
}

/// Group a flat sequence into consecutive triples. Length must be a multiple of 3.
fn group_triples<T: Copy + Default>(flat: impl Iterator<Item = T>) -> Vec<[T; 3]> {
    let mut out = Vec::with_capacity(flat.size_hint().0 / 3);
    let mut current = [T::default(); 3];
    for (i, value) in flat.enumerate() {
        current[i % 3] = value;
        if i % 3 == 2 {
            out.push(current);
        }
    }
    out
}
