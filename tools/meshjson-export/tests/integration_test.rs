//! Integration tests for meshjson-export
//!
//! Tests the full pipeline: generate test assets -> run the CLI -> verify output

mod test_assets;

use std::path::Path;
use std::process::Output;
use tempfile::tempdir;

/// Test a single unrounded triangle -> exact JSON text
#[test]
fn test_triangle_obj_to_json() {
    let dir = tempdir().expect("Failed to create temp dir");
    let obj_path = dir.path().join("triangle.obj");
    let json_path = dir.path().join("triangle.json");

    test_assets::generate_triangle_obj(&obj_path).expect("Failed to generate OBJ");
    let out = run(&["export", path_str(&obj_path), "-o", path_str(&json_path)]);
    assert!(out.status.success(), "export failed: {}", stderr(&out));

    let text = std::fs::read_to_string(&json_path).expect("Failed to read JSON");
    assert_eq!(
        text,
        "[[0,0,0,1.235,0,0,0,0.988,0],[0,0,1,0.1,0,0.995,0,0.1,0.995],[0,1,2]]"
    );
}

/// Hard-edged cube: corners sharing a position but not a normal stay separate
#[test]
fn test_cube_obj_to_json() {
    let dir = tempdir().expect("Failed to create temp dir");
    let obj_path = dir.path().join("cube.obj");
    let json_path = dir.path().join("cube.json");

    test_assets::generate_cube_obj(&obj_path).expect("Failed to generate OBJ");
    let out = run(&["export", path_str(&obj_path), "-o", path_str(&json_path)]);
    assert!(out.status.success(), "export failed: {}", stderr(&out));

    let (positions, normals, indices) = read_arrays(&json_path);
    assert_eq!(positions.len(), 24 * 3);
    assert_eq!(normals.len(), 24 * 3);
    assert_eq!(indices.len(), 36);
    assert!(indices.iter().all(|&i| i < 24));
    assert_eq!(&indices[..3], &[0, 1, 2]);
}

/// Output defaults to the input path with a .json extension
#[test]
fn test_default_output_path() {
    let dir = tempdir().expect("Failed to create temp dir");
    let obj_path = dir.path().join("quad.obj");

    test_assets::generate_quad_obj_without_normals(&obj_path).expect("Failed to generate OBJ");
    let out = run(&["export", path_str(&obj_path)]);
    assert!(out.status.success(), "export failed: {}", stderr(&out));

    // Generated normals are identical for the flat quad, so 4 corners weld
    let (positions, normals, indices) = read_arrays(&dir.path().join("quad.json"));
    assert_eq!(positions.len(), 12);
    assert_eq!(normals, [0.0, 0.0, 1.0].repeat(4));
    assert_eq!(indices, vec![0, 1, 2, 0, 2, 3]);
}

/// Precision is accepted in 1..=10 only; nothing is written otherwise
#[test]
fn test_precision_range() {
    let dir = tempdir().expect("Failed to create temp dir");
    let obj_path = dir.path().join("triangle.obj");
    let json_path = dir.path().join("triangle.json");
    test_assets::generate_triangle_obj(&obj_path).expect("Failed to generate OBJ");

    for bad in ["0", "11", "-1", "three"] {
        let out = run(&[
            "export",
            path_str(&obj_path),
            "-o",
            path_str(&json_path),
            "-p",
            bad,
        ]);
        assert!(!out.status.success(), "precision {bad} should be rejected");
        assert!(!json_path.exists());
    }

    let out = run(&[
        "export",
        path_str(&obj_path),
        "-o",
        path_str(&json_path),
        "-p",
        "1",
    ]);
    assert!(out.status.success(), "export failed: {}", stderr(&out));
    let text = std::fs::read_to_string(&json_path).expect("Failed to read JSON");
    assert_eq!(text, "[[0,0,0,1.2,0,0,0,1,0],[0,0,1,0.1,0,1,0,0.1,1],[0,1,2]]");
}

/// Inputs that are not triangle meshes fail without writing output
#[test]
fn test_invalid_input_kind() {
    let dir = tempdir().expect("Failed to create temp dir");
    let line_path = dir.path().join("polyline.obj");
    let json_path = dir.path().join("out.json");

    test_assets::generate_line_obj(&line_path).expect("Failed to generate OBJ");
    let out = run(&["export", path_str(&line_path), "-o", path_str(&json_path)]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("not a triangle mesh"), "{}", stderr(&out));
    assert!(!json_path.exists());

    let fbx_path = dir.path().join("model.fbx");
    std::fs::write(&fbx_path, b"Kaydara FBX Binary").expect("Failed to write file");
    let out = run(&["export", path_str(&fbx_path), "-o", path_str(&json_path)]);
    assert!(!out.status.success());
    assert!(!json_path.exists());
}

/// JSON -> OBJ with per-corner normals
#[test]
fn test_import_writes_obj() {
    let dir = tempdir().expect("Failed to create temp dir");
    let json_path = dir.path().join("quad.json");
    let obj_path = dir.path().join("quad.obj");

    std::fs::write(
        &json_path,
        "[[0,0,0, 1,0,0, 1,1,0, 0,1,0], [0,0,1, 0,0,1, 0,0,1, 0,0,1], [0,1,2, 0,2,3]]",
    )
    .expect("Failed to write JSON");

    let out = run(&["import", path_str(&json_path), "-o", path_str(&obj_path)]);
    assert!(out.status.success(), "import failed: {}", stderr(&out));

    let text = std::fs::read_to_string(&obj_path).expect("Failed to read OBJ");
    assert_eq!(count_lines(&text, "v "), 4);
    assert_eq!(count_lines(&text, "vn "), 6);
    assert!(text.contains("f 1//1 2//2 3//3\n"));
    assert!(text.contains("f 1//4 3//5 4//6\n"));
}

/// Normals whose length differs from positions are skipped, not fatal
#[test]
fn test_import_normal_length_mismatch() {
    let dir = tempdir().expect("Failed to create temp dir");
    let json_path = dir.path().join("tri.json");
    let obj_path = dir.path().join("tri.obj");

    std::fs::write(&json_path, "[[0,0,0,1,0,0,0,1,0],[0,0,1],[0,1,2]]")
        .expect("Failed to write JSON");

    let out = run(&["import", path_str(&json_path), "-o", path_str(&obj_path)]);
    assert!(out.status.success(), "import failed: {}", stderr(&out));

    let text = std::fs::read_to_string(&obj_path).expect("Failed to read OBJ");
    assert_eq!(count_lines(&text, "v "), 3);
    assert_eq!(count_lines(&text, "vn "), 0);
    assert!(text.contains("f 1 2 3\n"));
}

/// Out-of-range indices abort the import and leave existing output alone
#[test]
fn test_import_index_out_of_range() {
    let dir = tempdir().expect("Failed to create temp dir");
    let json_path = dir.path().join("bad.json");
    let obj_path = dir.path().join("bad.obj");

    std::fs::write(&json_path, "[[0,0,0,1,0,0,0,1,0],[0,0,1,0,0,1,0,0,1],[0,1,5]]")
        .expect("Failed to write JSON");
    std::fs::write(&obj_path, "# previous\n").expect("Failed to write sentinel");

    let out = run(&["import", path_str(&json_path), "-o", path_str(&obj_path)]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("missing vertex"), "{}", stderr(&out));

    let text = std::fs::read_to_string(&obj_path).expect("Failed to read OBJ");
    assert_eq!(text, "# previous\n");
    assert!(!dir.path().join("bad.obj.tmp").exists());
}

/// Garbage JSON fails cleanly
#[test]
fn test_import_rejects_non_json() {
    let dir = tempdir().expect("Failed to create temp dir");
    let json_path = dir.path().join("junk.json");
    let obj_path = dir.path().join("junk.obj");

    std::fs::write(&json_path, "{\"positions\": []}").expect("Failed to write JSON");
    let out = run(&["import", path_str(&json_path), "-o", path_str(&obj_path)]);
    assert!(!out.status.success());
    assert!(!obj_path.exists());
}

/// Export -> import keeps vertex and face counts
#[test]
fn test_round_trip_cube() {
    let dir = tempdir().expect("Failed to create temp dir");
    let obj_path = dir.path().join("cube.obj");
    let json_path = dir.path().join("cube.json");
    let back_path = dir.path().join("cube_back.obj");

    test_assets::generate_cube_obj(&obj_path).expect("Failed to generate OBJ");
    let out = run(&["export", path_str(&obj_path), "-o", path_str(&json_path)]);
    assert!(out.status.success(), "export failed: {}", stderr(&out));
    let out = run(&["import", path_str(&json_path), "-o", path_str(&back_path)]);
    assert!(out.status.success(), "import failed: {}", stderr(&out));

    let text = std::fs::read_to_string(&back_path).expect("Failed to read OBJ");
    assert_eq!(count_lines(&text, "v "), 24);
    assert_eq!(count_lines(&text, "vn "), 36);
    assert_eq!(count_lines(&text, "f "), 12);
}

/// Manifest-driven batch export
#[test]
fn test_build_from_manifest() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::create_dir(dir.path().join("models")).expect("Failed to create dir");
    test_assets::generate_cube_obj(&dir.path().join("models/cube.obj"))
        .expect("Failed to generate OBJ");
    test_assets::generate_triangle_obj(&dir.path().join("models/tri.obj"))
        .expect("Failed to generate OBJ");

    let manifest_path = dir.path().join("meshjson.toml");
    std::fs::write(
        &manifest_path,
        r#"
[output]
dir = "build"

[[meshes]]
id = "cube"
path = "models/cube.obj"

[[meshes]]
id = "tri"
path = "models/tri.obj"
precision = 1
"#,
    )
    .expect("Failed to write manifest");

    let out = run(&["check", path_str(&manifest_path)]);
    assert!(out.status.success(), "check failed: {}", stderr(&out));
    assert!(!dir.path().join("build").exists());

    let out = run(&["build", path_str(&manifest_path)]);
    assert!(out.status.success(), "build failed: {}", stderr(&out));

    let (_, _, cube_indices) = read_arrays(&dir.path().join("build/cube.json"));
    assert_eq!(cube_indices.len(), 36);
    let tri = std::fs::read_to_string(dir.path().join("build/tri.json"))
        .expect("Failed to read JSON");
    assert_eq!(tri, "[[0,0,0,1.2,0,0,0,1,0],[0,0,1,0.1,0,1,0,0.1,1],[0,1,2]]");
}

/// Check fails for a manifest pointing at a missing file
#[test]
fn test_check_missing_source() {
    let dir = tempdir().expect("Failed to create temp dir");
    let manifest_path = dir.path().join("meshjson.toml");
    std::fs::write(&manifest_path, "[[meshes]]\nid = \"gone\"\npath = \"gone.obj\"\n")
        .expect("Failed to write manifest");

    let out = run(&["check", path_str(&manifest_path)]);
    assert!(!out.status.success());
}

// Helper to run the meshjson-export binary
fn run(args: &[&str]) -> Output {
    std::process::Command::new(env!("CARGO_BIN_EXE_meshjson-export"))
        .args(args)
        .output()
        .expect("Failed to run meshjson-export")
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("Non-UTF-8 temp path")
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

fn count_lines(text: &str, prefix: &str) -> usize {
    text.lines().filter(|l| l.starts_with(prefix)).count()
}

/// Parse an output file as (positions, normals, indices)
fn read_arrays(path: &Path) -> (Vec<f64>, Vec<f64>, Vec<u32>) {
    let text = std::fs::read_to_string(path).expect("Failed to read JSON");
    serde_json::from_str(&text).expect("Output is not [positions, normals, indices]")
}
