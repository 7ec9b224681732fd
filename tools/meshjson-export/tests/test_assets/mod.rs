//! Test asset generators (OBJ text, GLB binaries, manifests).
#![allow(dead_code)]

use std::io;
use std::path::Path;

/// Unit cube with one normal per face (hard edges): 8 positions, 6 normals,
/// 6 quads.
pub fn generate_cube_obj(path: &Path) -> io::Result<()> {
    let obj = "\
# cube
v -0.5 -0.5 -0.5
v 0.5 -0.5 -0.5
v 0.5 0.5 -0.5
v -0.5 0.5 -0.5
v -0.5 -0.5 0.5
v 0.5 -0.5 0.5
v 0.5 0.5 0.5
v -0.5 0.5 0.5
vn 0 0 -1
vn 0 0 1
vn 0 -1 0
vn 0 1 0
vn -1 0 0
vn 1 0 0
f 1//1 4//1 3//1 2//1
f 5//2 6//2 7//2 8//2
f 1//3 2//3 6//3 5//3
f 4//4 8//4 7//4 3//4
f 1//5 5//5 8//5 4//5
f 2//6 3//6 7//6 6//6
";
    std::fs::write(path, obj)
}

/// One triangle with unrounded coordinates and normals
pub fn generate_triangle_obj(path: &Path) -> io::Result<()> {
    let obj = "\
v 0.00012 0.0 0.0
v 1.23456 0.0 0.0
v 0.0 0.98765 0.0
vn 0.0001 0.0 1.0
vn 0.1 0.0 0.995
vn 0.0 0.1 0.995
f 1//1 2//2 3//3
";
    std::fs::write(path, obj)
}

/// Flat quad without any `vn` lines (normals must be generated)
pub fn generate_quad_obj_without_normals(path: &Path) -> io::Result<()> {
    std::fs::write(path, "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n")
}

/// Polyline only, no faces
pub fn generate_line_obj(path: &Path) -> io::Result<()> {
    std::fs::write(path, "v 0 0 0\nv 1 0 0\nv 1 1 0\nl 1 2 3\n")
}

/// glTF primitive topology, as stored in the `mode` field
#[derive(Debug, Clone, Copy)]
pub enum GlbMode {
    Lines = 1,
    Triangles = 4,
    TriangleStrip = 5,
}

/// Flat unit quad in the XY plane facing +Z.
///
/// With `TriangleStrip` the 4 vertices form 2 triangles without indices; with
/// `Triangles` an index buffer `[0,1,2, 2,1,3]` is added.
pub fn generate_quad_glb(path: &Path, mode: GlbMode, with_normals: bool) -> io::Result<()> {
    let positions: [[f32; 3]; 4] = [
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [1.0, 1.0, 0.0],
    ];
    let normals: [[f32; 3]; 4] = [[0.0, 0.0, 1.0]; 4];
    let indices: [u16; 6] = [0, 1, 2, 2, 1, 3];

    let mut buffer: Vec<u8> = Vec::new();
    buffer.extend_from_slice(bytemuck::cast_slice(&positions));
    buffer.extend_from_slice(bytemuck::cast_slice(&normals));
    buffer.extend_from_slice(bytemuck::cast_slice(&indices));

    let mut attributes = serde_json::json!({ "POSITION": 0 });
    if with_normals {
        attributes["NORMAL"] = serde_json::json!(1);
    }
    let mut primitive = serde_json::json!({
        "attributes": attributes,
        "mode": mode as u32,
    });
    if matches!(mode, GlbMode::Triangles) {
        primitive["indices"] = serde_json::json!(2);
    }

    let root = serde_json::json!({
        "asset": { "version": "2.0" },
        "buffers": [{ "byteLength": buffer.len() }],
        "bufferViews": [
            { "buffer": 0, "byteOffset": 0, "byteLength": 48 },
            { "buffer": 0, "byteOffset": 48, "byteLength": 48 },
            { "buffer": 0, "byteOffset": 96, "byteLength": 12 }
        ],
        "accessors": [
            {
                "bufferView": 0, "componentType": 5126, "count": 4, "type": "VEC3",
                "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0]
            },
            { "bufferView": 1, "componentType": 5126, "count": 4, "type": "VEC3" },
            { "bufferView": 2, "componentType": 5123, "count": 6, "type": "SCALAR" }
        ],
        "meshes": [{ "primitives": [primitive] }],
        "nodes": [{ "mesh": 0 }],
        "scenes": [{ "nodes": [0] }],
        "scene": 0
    });

    let json = serde_json::to_string(&root).expect("Failed to serialize glTF JSON");
    std::fs::write(path, assemble_glb(json.as_bytes(), &buffer))
}

/// Assemble the final GLB binary
fn assemble_glb(json_bytes: &[u8], buffer_data: &[u8]) -> Vec<u8> {
    // Pad JSON to 4-byte alignment
    let json_padding = (4 - (json_bytes.len() % 4)) % 4;
    let json_chunk_length = json_bytes.len() + json_padding;

    // Pad buffer to 4-byte alignment
    let buffer_padding = (4 - (buffer_data.len() % 4)) % 4;
    let buffer_chunk_length = buffer_data.len() + buffer_padding;

    let total_length = 12 + 8 + json_chunk_length + 8 + buffer_chunk_length;
    let mut glb = Vec::with_capacity(total_length);

    // Header
    glb.extend_from_slice(b"glTF"); // magic
    glb.extend_from_slice(&2u32.to_le_bytes()); // version
    glb.extend_from_slice(&(total_length as u32).to_le_bytes()); // length

    // JSON chunk
    glb.extend_from_slice(&(json_chunk_length as u32).to_le_bytes());
    glb.extend_from_slice(&0x4E4F534Au32.to_le_bytes()); // "JSON"
    glb.extend_from_slice(json_bytes);
    glb.extend(std::iter::repeat_n(0x20u8, json_padding)); // pad with spaces

    // BIN chunk
    glb.extend_from_slice(&(buffer_chunk_length as u32).to_le_bytes());
    glb.extend_from_slice(&0x004E4942u32.to_le_bytes()); // "BIN\0"
    glb.extend_from_slice(buffer_data);
    glb.extend(std::iter::repeat_n(0u8, buffer_padding)); // pad with zeros

    glb
}
