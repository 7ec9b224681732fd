//! JSON array mesh format (.json)
//!
//! A single JSON array with exactly three flat arrays, written without any
//! whitespace:
//!
//! # Layout
//! ```text
//! [positions, normals, indices]
//!
//! positions: [x0,y0,z0, x1,y1,z1, ...]     3 numbers per unique vertex
//! normals:   [nx0,ny0,nz0, ...]            same length, index-aligned
//! indices:   [a0,b0,c0, a1,b1,c1, ...]     3 vertex indices per triangle
//! ```
//!
//! Integral values are written without a decimal point (see [`crate::quantize`]).
//! This is the layout three.js-style loaders expect for indexed geometry.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::io::Write;

use crate::error::MalformedData;
use crate::quantize::Number;

/// File extension for the JSON array format
pub const MESH_JSON_EXT: &str = "json";

/// The three flat arrays shared by the export and import paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeshArrays {
    /// Unique vertex positions, `3 * vertex_count` values
    pub positions: Vec<Number>,
    /// Unique vertex normals, index-aligned with `positions`
    pub normals: Vec<Number>,
    /// Triangle corners, `3 * triangle_count` values
    pub indices: Vec<u32>,
}

impl MeshArrays {
    /// Number of whole vertices in `positions`
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of whole triangles in `indices`
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() && self.normals.is_empty() && self.indices.is_empty()
    }

    /// Serialize to compact JSON text.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize compact JSON to a writer.
    pub fn write_json<W: Write>(&self, writer: W) -> Result<(), serde_json::Error> {
        serde_json::to_writer(writer, self)
    }

    /// Parse JSON text.
    ///
    /// Only the shape is checked here (three numeric arrays, non-negative
    /// integer indices). Length and range checks happen in [`crate::expand`].
    pub fn from_json(text: &str) -> Result<Self, MalformedData> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parse JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, MalformedData> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

impl Serialize for MeshArrays {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.positions, &self.normals, &self.indices).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for MeshArrays {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (positions, normals, indices) =
            <(Vec<Number>, Vec<Number>, Vec<u32>)>::deserialize(deserializer)?;
        Ok(Self {
            positions,
            normals,
            indices,
        })
    }
}
