//! meshjson-export library
//!
//! Provides the mesh conversion pipelines for use by other tools:
//!
//! - export: OBJ/glTF → triangle stream → weld → `.json`
//! - import: `.json` → validate/expand → OBJ
//! - batch export driven by a `meshjson.toml` manifest

pub mod export;
pub mod fs;
pub mod import;
pub mod manifest;
pub mod mesh;

// Re-export the core types so callers need only this crate
pub use meshjson_common::{
    MalformedData, MeshArrays, Number, Precision, PrecisionError, Reconstruction, WeldError,
};

// Re-export key pipeline entry points
pub use export::{ExportSummary, export_mesh, export_to_memory};
pub use import::{ImportSummary, import_mesh, import_to_memory, write_obj};
pub use mesh::{SourceError, SourceFormat, SourceMesh, load_triangles};
