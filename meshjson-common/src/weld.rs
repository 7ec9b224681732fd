//! Vertex welding
//!
//! Turns a per-corner triangle stream into unique vertex arrays plus an index
//! buffer. Two corners weld together only when their quantized position *and*
//! quantized normal are identical, so hard edges (same position, different
//! normal) keep separate vertices.
//!
//! Vertex indices are assigned densely in first-encounter order (triangle
//! order, then corner order), which makes output byte-identical across runs for
//! the same input.

use hashbrown::HashMap;

use crate::format::MeshArrays;
use crate::quantize::{quantize, Number, Precision};

/// One corner of one triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopVertex {
    pub position: [f64; 3],
    pub normal: [f64; 3],
}

impl LoopVertex {
    pub fn new(position: [f64; 3], normal: [f64; 3]) -> Self {
        Self { position, normal }
    }

    fn is_finite(&self) -> bool {
        self.position
            .iter()
            .chain(self.normal.iter())
            .all(|c| c.is_finite())
    }
}

/// Three corners in winding order
pub type Triangle = [LoopVertex; 3];

/// Quantized `(x, y, z, nx, ny, nz)`. The only criterion for welding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexKey([Number; 6]);

impl VertexKey {
    pub fn new(vertex: &LoopVertex, precision: Precision) -> Self {
        let [x, y, z] = vertex.position;
        let [nx, ny, nz] = vertex.normal;
        Self([x, y, z, nx, ny, nz].map(|c| quantize(c, precision)))
    }

    pub fn position(&self) -> [Number; 3] {
        [self.0[0], self.0[1], self.0[2]]
    }

    pub fn normal(&self) -> [Number; 3] {
        [self.0[3], self.0[4], self.0[5]]
    }
}

/// Input that cannot be welded
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WeldError {
    /// NaN or infinite coordinate (no JSON representation)
    #[error("triangle {triangle} corner {corner} has a non-finite position or normal component")]
    NonFiniteComponent { triangle: usize, corner: usize },

    #[error("mesh has {0} vertices or indices, exceeds the u32 index range")]
    TooManyVertices(usize),
}

/// Output of [`weld`]: unique vertices and the index buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeldedMesh {
    arrays: MeshArrays,
}

impl WeldedMesh {
    pub fn positions(&self) -> &[Number] {
        &self.arrays.positions
    }

    pub fn normals(&self) -> &[Number] {
        &self.arrays.normals
    }

    pub fn indices(&self) -> &[u32] {
        &self.arrays.indices
    }

    /// Number of distinct vertex keys
    pub fn vertex_count(&self) -> usize {
        self.arrays.vertex_count()
    }

    pub fn triangle_count(&self) -> usize {
        self.arrays.triangle_count()
    }

    pub fn as_arrays(&self) -> &MeshArrays {
        &self.arrays
    }

    pub fn into_arrays(self) -> MeshArrays {
        self.arrays
    }
}

impl From<WeldedMesh> for MeshArrays {
    fn from(mesh: WeldedMesh) -> Self {
        mesh.arrays
    }
}

/// Insertion-ordered map from [`VertexKey`] to dense vertex index.
///
/// Insertion order itself lives in the output arrays; the map only resolves
/// lookups.
struct VertexTable {
    indices: HashMap<VertexKey, u32>,
    arrays: MeshArrays,
}

impl VertexTable {
    fn with_capacity(corners: usize) -> Self {
        Self {
            indices: HashMap::with_capacity(corners),
            arrays: MeshArrays {
                positions: Vec::with_capacity(corners * 3),
                normals: Vec::with_capacity(corners * 3),
                indices: Vec::with_capacity(corners),
            },
        }
    }

    /// Resolve a key to its index, appending a new vertex on first sight.
    fn resolve(&mut self, key: VertexKey) -> Result<u32, WeldError> {
        if let Some(&index) = self.indices.get(&key) {
            return Ok(index);
        }

        let count = self.indices.len();
        let index = u32::try_from(count).map_err(|_| WeldError::TooManyVertices(count + 1))?;
        self.arrays.positions.extend_from_slice(&key.position());
        self.arrays.normals.extend_from_slice(&key.normal());
        self.indices.insert(key, index);
        Ok(index)
    }

    fn push_index(&mut self, index: u32) -> Result<(), WeldError> {
        let len = self.arrays.indices.len();
        if len >= u32::MAX as usize {
            return Err(WeldError::TooManyVertices(len + 1));
        }
        self.arrays.indices.push(index);
        Ok(())
    }
}

/// Weld a triangle stream into unique vertices and an index buffer.
///
/// Every corner is quantized at `precision`; corners with equal keys share
/// one output vertex. Zero triangles produce three empty arrays.
///
/// Fails without returning partial output if any component is non-finite.
pub fn weld<I>(triangles: I, precision: Precision) -> Result<WeldedMesh, WeldError>
where
    I: IntoIterator<Item = Triangle>,
{
    let triangles = triangles.into_iter();
    let mut table = VertexTable::with_capacity(triangles.size_hint().0 * 3);

    for (t, triangle) in triangles.enumerate() {
        for (corner, vertex) in triangle.iter().enumerate() {
            if !vertex.is_finite() {
                return Err(WeldError::NonFiniteComponent {
                    triangle: t,
                    corner,
                });
            }

            let index = table.resolve(VertexKey::new(vertex, precision))?;
            table.push_index(index)?;
        }
    }

    let mesh = WeldedMesh {
        arrays: table.arrays,
    };
    tracing::debug!(
        "Welded {} triangles into {} unique vertices (precision {})",
        mesh.triangle_count(),
        mesh.vertex_count(),
        precision
    );
    Ok(mesh)
}
