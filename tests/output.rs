//! Output directory and filename provider tests.

use std::collections::HashSet;

use framesift::{FramesiftError, generate_image_filename, prepare_output_directory};

#[test]
fn missing_parents_are_created() {
    let scratch = tempfile::tempdir().expect("Failed to create temp dir");
    let nested = scratch.path().join("a").join("b").join("c");

    prepare_output_directory(&nested).expect("Preparation should succeed");
    assert!(nested.is_dir());
}

#[test]
fn preparation_is_idempotent() {
    let scratch = tempfile::tempdir().expect("Failed to create temp dir");
    let target = scratch.path().join("out");

    prepare_output_directory(&target).expect("First preparation should succeed");
    prepare_output_directory(&target).expect("Second preparation should also succeed");
    assert!(target.is_dir());
}

#[test]
fn existing_file_is_a_path_conflict() {
    let scratch = tempfile::tempdir().expect("Failed to create temp dir");
    let occupied = scratch.path().join("occupied");
    std::fs::write(&occupied, b"not a directory").expect("Failed to write file");

    let result = prepare_output_directory(&occupied);
    assert!(matches!(result, Err(FramesiftError::PathConflict { .. })));

    let error_message = result.unwrap_err().to_string();
    assert!(
        error_message.contains("is not a directory"),
        "Error message should mention the conflict: {error_message}",
    );
}

#[test]
fn generated_filenames_are_unique_png_paths() {
    let scratch = tempfile::tempdir().expect("Failed to create temp dir");

    let mut seen = HashSet::new();
    for _ in 0..100 {
        let path = generate_image_filename(scratch.path());
        assert_eq!(path.parent(), Some(scratch.path()));
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("png"));
        assert!(seen.insert(path), "Filename provider returned a duplicate");
    }
}
