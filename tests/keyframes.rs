//! Keyframe selection integration tests.
//!
//! The selection algorithm is driven through `extract_keyframes_from` with
//! synthetic sources and a seeded generator, so acceptance decisions are
//! fully deterministic.

mod common;

use common::SyntheticSource;
use framesift::{FramesiftError, KeyframeOptions, PixelDeviationScorer, extract_keyframes_from};
use rand::{SeedableRng, rngs::StdRng};

fn rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Count regular files inside a directory.
fn files_in(directory: &std::path::Path) -> usize {
    std::fs::read_dir(directory)
        .expect("Failed to read output directory")
        .count()
}

#[test]
fn spacing_is_enforced_between_accepted_keyframes() {
    // 10 frames at 1 fps, sampling [0, 5). Requesting 5 candidates forces
    // the draw to use every frame in the range, so the candidates are
    // exactly 0..5 regardless of the seed. A minimum interval of 20% of
    // the 10 s duration (2 s) admits frames 0, 2, and 4 only.
    let mut source = SyntheticSource::new(10, 1.0);
    let output = tempfile::tempdir().expect("Failed to create temp dir");

    let options = KeyframeOptions::new(5, 10.0, 0.0, 0.5).with_min_interval_pct(0.2);
    let paths = extract_keyframes_from(
        &mut source,
        &mut rng(),
        output.path(),
        &options,
        &PixelDeviationScorer,
    )
    .expect("Extraction should succeed");

    assert_eq!(paths.len(), 3, "Expected frames 0, 2 and 4 to be accepted");
    for path in &paths {
        assert!(path.exists(), "Accepted keyframe {} not on disk", path.display());
        assert_eq!(path.parent(), Some(output.path()));
    }
    assert_eq!(files_in(output.path()), 3);
}

#[test]
fn flat_frames_are_rejected_and_under_yield_is_success() {
    let mut source = SyntheticSource::all_flat(10, 1.0);
    let output = tempfile::tempdir().expect("Failed to create temp dir");

    let options = KeyframeOptions::new(5, 10.0, 0.0, 0.5);
    let paths = extract_keyframes_from(
        &mut source,
        &mut rng(),
        output.path(),
        &options,
        &PixelDeviationScorer,
    )
    .expect("All-flat extraction is still a success");

    assert!(paths.is_empty(), "Uniform frames must never be accepted");
    assert_eq!(files_in(output.path()), 0);
}

#[test]
fn complexity_threshold_is_strict() {
    // The checkerboard scores exactly 127.5; a threshold at that value
    // must reject it (strictly-greater acceptance), a lower one admits it.
    let options_at = KeyframeOptions::new(5, 127.5, 0.0, 0.5).with_min_interval_pct(0.0);
    let options_below = KeyframeOptions::new(5, 127.0, 0.0, 0.5).with_min_interval_pct(0.0);

    let output = tempfile::tempdir().expect("Failed to create temp dir");
    let mut source = SyntheticSource::new(10, 1.0);
    let paths = extract_keyframes_from(
        &mut source,
        &mut rng(),
        output.path(),
        &options_at,
        &PixelDeviationScorer,
    )
    .expect("Extraction should succeed");
    assert!(paths.is_empty(), "Score equal to the threshold must be rejected");

    let mut source = SyntheticSource::new(10, 1.0);
    let paths = extract_keyframes_from(
        &mut source,
        &mut rng(),
        output.path(),
        &options_below,
        &PixelDeviationScorer,
    )
    .expect("Extraction should succeed");
    assert_eq!(paths.len(), 5, "Scores above the threshold must be accepted");
}

#[test]
fn unreadable_candidates_are_skipped_without_advancing_spacing() {
    // Candidates are exactly 0..4 (range [0, 4), four requested). With a
    // 2 s minimum interval: frame 0 accepted, frame 1 rejected by spacing,
    // frame 2 unreadable (skipped), frame 3 accepted — which only works if
    // the unreadable frame left the last-accepted time untouched.
    let mut source = SyntheticSource::new(8, 1.0).with_unreadable(&[2]);
    let output = tempfile::tempdir().expect("Failed to create temp dir");

    let options = KeyframeOptions::new(4, 10.0, 0.0, 0.5).with_min_interval_pct(0.25);
    let paths = extract_keyframes_from(
        &mut source,
        &mut rng(),
        output.path(),
        &options,
        &PixelDeviationScorer,
    )
    .expect("Extraction should succeed");

    assert_eq!(paths.len(), 2, "Expected frames 0 and 3 to be accepted");
}

#[test]
fn insufficient_range_is_a_precondition_failure() {
    // [0, 3) holds three distinct frame numbers; five were requested.
    let mut source = SyntheticSource::new(10, 1.0);
    let output = tempfile::tempdir().expect("Failed to create temp dir");

    let options = KeyframeOptions::new(5, 10.0, 0.0, 0.3);
    let result = extract_keyframes_from(
        &mut source,
        &mut rng(),
        output.path(),
        &options,
        &PixelDeviationScorer,
    );

    assert!(matches!(
        result,
        Err(FramesiftError::InsufficientRange {
            available: 3,
            requested: 5,
        })
    ));
    assert_eq!(files_in(output.path()), 0, "Nothing may be written on failure");
    assert!(source.reads.is_empty(), "No frame may be decoded on failure");
}

#[test]
fn conflicting_output_path_fails_before_reading_frames() {
    let scratch = tempfile::tempdir().expect("Failed to create temp dir");
    let conflicting = scratch.path().join("occupied");
    std::fs::write(&conflicting, b"not a directory").expect("Failed to write file");

    let mut source = SyntheticSource::new(100, 25.0);
    let options = KeyframeOptions::new(5, 10.0, 0.1, 0.9);
    let result = extract_keyframes_from(
        &mut source,
        &mut rng(),
        &conflicting,
        &options,
        &PixelDeviationScorer,
    );

    assert!(matches!(result, Err(FramesiftError::PathConflict { .. })));
    assert!(source.reads.is_empty());
}

#[test]
fn zero_requested_images_is_rejected() {
    let mut source = SyntheticSource::new(100, 25.0);
    let output = tempfile::tempdir().expect("Failed to create temp dir");

    let options = KeyframeOptions::new(0, 10.0, 0.1, 0.9);
    let result = extract_keyframes_from(
        &mut source,
        &mut rng(),
        output.path(),
        &options,
        &PixelDeviationScorer,
    );

    assert!(matches!(result, Err(FramesiftError::InvalidImageCount)));
}

#[test]
fn invalid_percentage_bounds_are_rejected() {
    let output = tempfile::tempdir().expect("Failed to create temp dir");

    for (start_pct, end_pct) in [(0.9, 0.1), (0.5, 0.5), (-0.1, 0.5), (0.1, 1.0)] {
        let mut source = SyntheticSource::new(100, 25.0);
        let options = KeyframeOptions::new(5, 10.0, start_pct, end_pct);
        let result = extract_keyframes_from(
            &mut source,
            &mut rng(),
            output.path(),
            &options,
            &PixelDeviationScorer,
        );

        assert!(
            matches!(result, Err(FramesiftError::InvalidSampleRange { .. })),
            "Expected ({start_pct}, {end_pct}) to be rejected",
        );
    }
}

#[test]
fn mixed_filtering_yields_partial_results() {
    // Candidates 0..5 with no spacing constraint; frames 1 and 3 are flat,
    // frame 4 is unreadable. Only 0 and 2 survive.
    let mut source = SyntheticSource::new(10, 1.0)
        .with_flat(&[1, 3])
        .with_unreadable(&[4]);
    let output = tempfile::tempdir().expect("Failed to create temp dir");

    let options = KeyframeOptions::new(5, 10.0, 0.0, 0.5).with_min_interval_pct(0.0);
    let paths = extract_keyframes_from(
        &mut source,
        &mut rng(),
        output.path(),
        &options,
        &PixelDeviationScorer,
    )
    .expect("Partial yield is still a success");

    assert_eq!(paths.len(), 2);
    assert_eq!(source.reads, vec![0, 1, 2, 3, 4], "Candidates are visited in ascending order");
}
