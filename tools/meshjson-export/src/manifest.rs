//! meshjson.toml manifest parsing and batch export
//!
//! ```toml
//! [output]
//! dir = "build"
//! precision = 4
//!
//! [[meshes]]
//! id = "crate"
//! path = "models/crate.obj"
//! precision = 2
//!
//! [[meshes]]
//! id = "ship"
//! path = "models/ship.glb"
//! mesh = 1
//! ```
//!
//! Relative paths are resolved against the manifest's directory.

use anyhow::{Context, Result, bail};
use hashbrown::HashSet;
use meshjson_common::{MESH_JSON_EXT, Precision};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::export::{ExportSummary, export_mesh};
use crate::mesh::SourceFormat;

/// Default manifest file name
pub const DEFAULT_MANIFEST: &str = "meshjson.toml";

/// meshjson.toml manifest structure
#[derive(Debug, Deserialize)]
pub struct MeshManifest {
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub meshes: Vec<MeshEntry>,

    /// Directory containing the manifest (set by [`load_manifest`])
    #[serde(skip)]
    pub base_dir: PathBuf,
}

/// Output settings shared by all meshes
#[derive(Debug, Deserialize)]
pub struct OutputSection {
    /// Output directory for .json files.
    /// Default: "." (next to the manifest)
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    /// Decimal places kept for every mesh (1-10).
    /// Default: 3
    #[serde(default)]
    pub precision: Precision,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            precision: Precision::default(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Single mesh entry
#[derive(Debug, Deserialize)]
pub struct MeshEntry {
    /// Output file stem
    pub id: String,
    /// Source mesh (OBJ/glTF/GLB)
    pub path: PathBuf,

    /// Overrides `output.precision` for this mesh.
    #[serde(default)]
    pub precision: Option<Precision>,

    /// glTF mesh index. If not specified, uses the first mesh in the file.
    #[serde(default)]
    pub mesh: Option<usize>,
}

impl MeshManifest {
    /// Parse manifest text. Relative paths resolve against `base_dir`.
    pub fn from_toml(text: &str, base_dir: &Path) -> Result<Self> {
        let mut manifest: MeshManifest = toml::from_str(text).context("Invalid manifest")?;
        manifest.base_dir = base_dir.to_path_buf();
        Ok(manifest)
    }

    /// Absolute (or manifest-relative) source path of an entry
    pub fn source_path(&self, entry: &MeshEntry) -> PathBuf {
        self.base_dir.join(&entry.path)
    }

    /// Output directory, honoring an override
    pub fn output_dir(&self, override_dir: Option<&Path>) -> PathBuf {
        match override_dir {
            Some(dir) => dir.to_path_buf(),
            None => self.base_dir.join(&self.output.dir),
        }
    }

    /// Effective precision of an entry
    pub fn precision_for(&self, entry: &MeshEntry) -> Precision {
        entry.precision.unwrap_or(self.output.precision)
    }
}

/// Load and parse a manifest file.
pub fn load_manifest(path: &Path) -> Result<MeshManifest> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {:?}", path))?;
    let base_dir = path.parent().unwrap_or(Path::new("."));
    MeshManifest::from_toml(&text, base_dir)
        .with_context(|| format!("Failed to load manifest: {:?}", path))
}

/// Check ids and source files without exporting anything.
pub fn validate(manifest: &MeshManifest) -> Result<()> {
    if manifest.meshes.is_empty() {
        tracing::warn!("Manifest declares no meshes");
    }

    let mut ids = HashSet::new();
    for entry in &manifest.meshes {
        if entry.id.trim().is_empty() {
            bail!("Mesh entry for {:?} has an empty id", entry.path);
        }
        if entry.id.contains(['/', '\\']) {
            bail!("Mesh id {:?} must not contain path separators", entry.id);
        }
        if !ids.insert(entry.id.as_str()) {
            bail!("Duplicate mesh id {:?}", entry.id);
        }

        let source = manifest.source_path(entry);
        SourceFormat::from_path(&source)?;
        if !source.is_file() {
            bail!("Mesh {:?}: source file not found: {:?}", entry.id, source);
        }
    }

    Ok(())
}

/// Export every mesh in the manifest.
///
/// Stops at the first failure. Files exported before the failure stay in
/// place; each file is written atomically.
pub fn build_all(
    manifest: &MeshManifest,
    output_override: Option<&Path>,
) -> Result<Vec<ExportSummary>> {
    validate(manifest)?;

    let out_dir = manifest.output_dir(output_override);
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", out_dir))?;

    let mut summaries = Vec::with_capacity(manifest.meshes.len());
    for entry in &manifest.meshes {
        let source = manifest.source_path(entry);
        let output = out_dir.join(format!("{}.{}", entry.id, MESH_JSON_EXT));
        tracing::info!("Exporting {:?}: {:?} -> {:?}", entry.id, source, output);

        let summary = export_mesh(&source, &output, manifest.precision_for(entry), entry.mesh)
            .with_context(|| format!("Failed to export mesh {:?}", entry.id))?;
        summaries.push(summary);
    }

    Ok(summaries)
}
