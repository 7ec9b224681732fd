//! Types shared by the mesh sources

use meshjson_common::Triangle;
use std::path::{Path, PathBuf};

/// Triangle stream read from a source file
#[derive(Debug, Clone, Default)]
pub struct SourceMesh {
    /// Triangles in file order, corners in winding order
    pub triangles: Vec<Triangle>,
    /// True if some or all normals were generated because the file had none
    pub generated_normals: bool,
}

/// Source geometry that cannot be exported.
///
/// Raised before welding, so no output is produced.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Not triangle mesh data (points, lines, unknown file type, ...)
    #[error("{}: not a triangle mesh ({reason})", path.display())]
    InvalidInputKind { path: PathBuf, reason: String },

    #[error("{}: no mesh found", .0.display())]
    NoMesh(PathBuf),
}

impl SourceError {
    pub(crate) fn invalid_kind(path: &Path, reason: impl Into<String>) -> Self {
        SourceError::InvalidInputKind {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

/// Mesh file formats accepted as export input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Obj,
    Gltf,
}

impl SourceFormat {
    /// Detect the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "obj" => Ok(SourceFormat::Obj),
            "gltf" | "glb" => Ok(SourceFormat::Gltf),
            _ => Err(SourceError::invalid_kind(
                path,
                "unsupported file type (use .obj, .gltf, or .glb)",
            )),
        }
    }
}
