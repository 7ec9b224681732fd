//! Shared mesh types and algorithms for the JSON array mesh format
//!
//! This crate is the I/O-free core used by `meshjson-export`:
//!
//! # Modules
//!
//! - [`quantize`] - Decimal rounding with integral normalization
//! - [`weld`] - Vertex welding (triangle stream → unique vertices + indices)
//! - [`expand`] - Reconstruction (arrays → vertices, faces, per-corner normals)
//! - [`format`] - The `[positions, normals, indices]` JSON wire format
//!
//! Every call builds its own tables and output; nothing is shared between
//! calls, so separate meshes can be processed on separate threads.

pub mod error;
pub mod expand;
pub mod format;
pub mod quantize;
pub mod weld;

pub use error::MalformedData;
pub use expand::{Reconstruction, expand};
pub use format::{MESH_JSON_EXT, MeshArrays};
pub use quantize::{Number, Precision, PrecisionError, quantize};
pub use weld::{LoopVertex, Triangle, VertexKey, WeldError, WeldedMesh, weld};
