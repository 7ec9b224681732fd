//! Filesystem helpers for mesh export and import.

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Maximum allowed mesh JSON size for reading into memory.
pub const MAX_MESH_JSON_BYTES: u64 = 512 * 1024 * 1024; // 512 MiB

/// Read a file into memory with a size cap.
pub fn read_file_with_limit(path: &Path, max_bytes: u64) -> Result<Vec<u8>> {
    let metadata = fs::metadata(path)
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;
    let len = metadata.len();
    if len > max_bytes {
        anyhow::bail!(
            "File too large: {} ({} bytes, max {} bytes)",
            path.display(),
            len,
            max_bytes
        );
    }
    fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Write `data` to `path` so that readers see either the old file or the
/// complete new one.
///
/// Data goes to `<name>.tmp` next to the destination, is synced, then renamed
/// over it. On failure the temporary file is removed and the destination is
/// left untouched.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let tmp_path = tmp_path_for(path)?;
    let result = write_then_rename(&tmp_path, path, data);
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

fn write_then_rename(tmp_path: &Path, path: &Path, data: &[u8]) -> Result<()> {
    {
        let mut f = fs::File::create(tmp_path)
            .with_context(|| format!("Failed to create output: {}", tmp_path.display()))?;
        f.write_all(data)
            .with_context(|| format!("Failed to write output: {}", tmp_path.display()))?;
        f.sync_all()?;
    }

    #[cfg(windows)]
    {
        if path.exists() {
            // Windows rename fails if destination exists.
            fs::remove_file(path)?;
        }
    }

    fs::rename(tmp_path, path)
        .with_context(|| format!("Failed to move output into place: {}", path.display()))
}

fn tmp_path_for(path: &Path) -> Result<PathBuf> {
    let name = path
        .file_name()
        .with_context(|| format!("Output path has no file name: {}", path.display()))?;
    let mut tmp_name = OsString::from(name);
    tmp_name.push(".tmp");
    Ok(path.with_file_name(tmp_name))
}
