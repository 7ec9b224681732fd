//! Errors raised while reading mesh arrays

/// Mesh arrays that cannot be turned back into a mesh.
///
/// Raised before any reconstruction output exists, so a caller never sees a
/// partially rebuilt mesh.
#[derive(Debug, thiserror::Error)]
pub enum MalformedData {
    /// Not a JSON array of `[positions, normals, indices]`
    #[error("invalid mesh JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("position array length {0} is not a multiple of 3")]
    PositionsNotTriples(usize),

    #[error("index array length {0} is not a multiple of 3")]
    IndicesNotTriples(usize),

    #[error("index {index} at slot {slot} references a missing vertex (vertex count {vertex_count})")]
    IndexOutOfRange {
        slot: usize,
        index: u32,
        vertex_count: usize,
    },
}
