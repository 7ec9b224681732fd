//! OBJ mesh source

use anyhow::{Context, Result, bail};
use meshjson_common::{LoopVertex, Triangle};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::normals::smooth_normals;
use super::types::{SourceError, SourceMesh};

/// One face corner: position index, optional normal index (0-based)
type Corner = (usize, Option<usize>);

/// Read an OBJ file as a triangle stream.
///
/// Polygons are fan-triangulated. Point and line elements are ignored; a file
/// with no faces at all is rejected as not being a triangle mesh. If any
/// corner lacks a `vn` reference, smooth normals are generated for the whole
/// mesh.
pub fn load_obj(input: &Path) -> Result<SourceMesh> {
    let file = File::open(input).with_context(|| format!("Failed to open OBJ: {:?}", input))?;
    let (positions, normals_raw, corners) =
        parse_obj(BufReader::new(file)).with_context(|| format!("Failed to parse OBJ: {:?}", input))?;

    if corners.is_empty() {
        return Err(SourceError::invalid_kind(input, "no faces").into());
    }

    let has_normals = corners.iter().all(|(_, n)| n.is_some());
    let normals: Vec<[f64; 3]> = if has_normals {
        corners
            .iter()
            .map(|&(_, n)| n.map(|n| normals_raw[n]).unwrap_or([0.0, 0.0, 1.0]))
            .collect()
    } else {
        tracing::warn!("OBJ {:?} has corners without normals, generating smooth normals", input);
        let tris: Vec<[usize; 3]> = corners
            .chunks_exact(3)
            .map(|c| [c[0].0, c[1].0, c[2].0])
            .collect();
        let vertex_normals = smooth_normals(&positions, &tris);
        corners.iter().map(|&(v, _)| vertex_normals[v]).collect()
    };

    let triangles: Vec<Triangle> = corners
        .chunks_exact(3)
        .zip(normals.chunks_exact(3))
        .map(|(c, n)| {
            [
                LoopVertex::new(positions[c[0].0], n[0]),
                LoopVertex::new(positions[c[1].0], n[1]),
                LoopVertex::new(positions[c[2].0], n[2]),
            ]
        })
        .collect();

    tracing::debug!(
        "Read OBJ {:?}: {} positions, {} triangles",
        input,
        positions.len(),
        triangles.len()
    );

    Ok(SourceMesh {
        triangles,
        generated_normals: !has_normals,
    })
}

/// Parse OBJ text into positions, normals and triangulated corners.
///
/// Returned corners always reference existing positions/normals, three per
/// triangle.
#[allow(clippy::type_complexity)]
fn parse_obj<R: BufRead>(reader: R) -> Result<(Vec<[f64; 3]>, Vec<[f64; 3]>, Vec<Corner>)> {
    let mut positions: Vec<[f64; 3]> = Vec::new();
    let mut normals: Vec<[f64; 3]> = Vec::new();
    let mut corners: Vec<Corner> = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let line_no = line_no + 1;

        match parts[0] {
            "v" => positions.push(parse_vec3(&parts, line_no)?),
            "vn" => normals.push(parse_vec3(&parts, line_no)?),
            "f" => {
                let face: Vec<Corner> = parts[1..]
                    .iter()
                    .map(|v| parse_obj_vertex(v, positions.len(), normals.len()))
                    .collect::<Option<_>>()
                    .with_context(|| format!("line {line_no}: invalid face reference"))?;

                if face.len() < 3 {
                    bail!("line {line_no}: face has fewer than 3 vertices");
                }

                // Fan triangulation (convex polygons)
                for i in 1..face.len() - 1 {
                    corners.extend([face[0], face[i], face[i + 1]]);
                }
            }
            _ => {}
        }
    }

    Ok((positions, normals, corners))
}

fn parse_vec3(parts: &[&str], line_no: usize) -> Result<[f64; 3]> {
    if parts.len() < 4 {
        bail!("line {line_no}: expected 3 components");
    }
    let mut out = [0.0; 3];
    for (slot, s) in out.iter_mut().zip(&parts[1..4]) {
        *slot = s
            .parse()
            .with_context(|| format!("line {line_no}: invalid number {s:?}"))?;
    }
    Ok(out)
}

/// Parse OBJ vertex reference: "v", "v/vt", "v/vt/vn", or "v//vn"
///
/// Texture coordinates are ignored. Returns `None` for malformed or dangling
/// references.
fn parse_obj_vertex(s: &str, position_count: usize, normal_count: usize) -> Option<Corner> {
    let parts: Vec<&str> = s.split('/').collect();

    let vi = resolve_index(parts.first()?, position_count)?;

    let vni = match parts.get(2).filter(|s| !s.is_empty()) {
        Some(n) => Some(resolve_index(n, normal_count)?),
        None => None,
    };

    Some((vi, vni))
}

/// OBJ indices are 1-based; negative values count back from the latest element.
fn resolve_index(s: &str, count: usize) -> Option<usize> {
    let i: i64 = s.parse().ok()?;
    let index = if i > 0 {
        usize::try_from(i - 1).ok()?
    } else if i < 0 {
        count.checked_sub(usize::try_from(-i).ok()?)?
    } else {
        return None;
    };
    (index < count).then_some(index)
}
