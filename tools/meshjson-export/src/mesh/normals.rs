//! Vertex normal generation for sources without normals

use glam::DVec3;

/// Smooth vertex normals for an indexed triangle list.
///
/// Each triangle contributes its unnormalized face normal (length = 2 × area)
/// to its three vertices, so larger faces weigh more. Vertices with no usable
/// contribution get `+Z`. All indices must be in range.
pub(crate) fn smooth_normals(positions: &[[f64; 3]], triangles: &[[usize; 3]]) -> Vec<[f64; 3]> {
    let mut sums = vec![DVec3::ZERO; positions.len()];

    for &[a, b, c] in triangles {
        let pa = DVec3::from_array(positions[a]);
        let pb = DVec3::from_array(positions[b]);
        let pc = DVec3::from_array(positions[c]);
        let face = (pb - pa).cross(pc - pa);

        sums[a] += face;
        sums[b] += face;
        sums[c] += face;
    }

    sums.into_iter()
        .map(|n| n.try_normalize().unwrap_or(DVec3::Z).to_array())
        .collect()
}
