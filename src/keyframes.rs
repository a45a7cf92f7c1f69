//! Complexity-filtered keyframe extraction.
//!
//! Samples frames at random timestamps within a sub-range of the video,
//! rejects frames that are too close in time to the previously accepted one
//! or too visually uniform, and writes each accepted frame as its own image
//! file. Filtering is lossy by design: the number of written images can be
//! smaller than requested, and callers must not assume exact counts.

use std::path::{Path, PathBuf};

use rand::Rng;

use crate::{
    error::FramesiftError,
    output::{generate_image_filename, prepare_output_directory},
    sampling::{draw_distinct_frames, resolve_sample_range},
    scorer::{FrameScorer, PixelDeviationScorer},
    source::{FrameSource, VideoSource},
};

/// Options for complexity-filtered keyframe extraction.
///
/// `num_images` is the target count; `complexity_threshold` is the strict
/// lower bound an accepted frame's score must exceed; `start_pct`/`end_pct`
/// bound the sampled sub-range of the video (both in `[0, 1)`, start below
/// end). The minimum spacing between accepted keyframes defaults to 1% of
/// the video duration.
///
/// # Example
///
/// ```no_run
/// use framesift::{KeyframeOptions, extract_complex_keyframes};
///
/// let options = KeyframeOptions::new(5, 20.0, 0.1, 0.9).with_min_interval_pct(0.02);
/// let paths = extract_complex_keyframes("input.mp4", "shots/", &options)?;
/// println!("wrote {} keyframes", paths.len());
/// # Ok::<(), framesift::FramesiftError>(())
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct KeyframeOptions {
    /// Target number of keyframes to extract.
    pub num_images: usize,
    /// Strict lower bound on the complexity score of accepted frames.
    pub complexity_threshold: f64,
    /// Start of the sampled sub-range as a fraction of total frame count.
    pub start_pct: f64,
    /// End of the sampled sub-range as a fraction of total frame count.
    pub end_pct: f64,
    /// Minimum spacing between accepted keyframes as a fraction of the
    /// video duration. Defaults to 0.01.
    pub min_interval_pct: f64,
}

impl KeyframeOptions {
    /// Create new keyframe options.
    ///
    /// The minimum spacing between accepted keyframes defaults to 1% of the
    /// video duration; override it with
    /// [`with_min_interval_pct`](KeyframeOptions::with_min_interval_pct).
    pub fn new(num_images: usize, complexity_threshold: f64, start_pct: f64, end_pct: f64) -> Self {
        Self {
            num_images,
            complexity_threshold,
            start_pct,
            end_pct,
            min_interval_pct: 0.01,
        }
    }

    /// Set the minimum spacing between accepted keyframes as a fraction of
    /// the video duration.
    pub fn with_min_interval_pct(mut self, min_interval_pct: f64) -> Self {
        self.min_interval_pct = min_interval_pct;
        self
    }

    fn validate(&self) -> Result<(), FramesiftError> {
        if self.num_images == 0 {
            return Err(FramesiftError::InvalidImageCount);
        }
        Ok(())
    }
}

/// Extract visually complex keyframes from a video file.
///
/// Prepares the output directory, opens the video, and runs
/// [`extract_keyframes_from`] with a thread-local random generator and the
/// default [`PixelDeviationScorer`]. The video handle is released on every
/// exit path when the source is dropped.
///
/// # Errors
///
/// Directory preparation errors are returned before the video is opened;
/// see [`extract_keyframes_from`] for the remaining failure modes.
pub fn extract_complex_keyframes<P, Q>(
    video_path: P,
    output_directory: Q,
    options: &KeyframeOptions,
) -> Result<Vec<PathBuf>, FramesiftError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let output_directory = output_directory.as_ref();
    prepare_output_directory(output_directory)?;

    let mut source = VideoSource::open(video_path)?;
    extract_keyframes_from(
        &mut source,
        &mut rand::thread_rng(),
        output_directory,
        options,
        &PixelDeviationScorer,
    )
}

/// Extract keyframes from an already-opened frame source.
///
/// This is the selection algorithm proper, generic over the frame supply,
/// the random generator, and the complexity heuristic so it can be driven
/// deterministically in tests:
///
/// 1. Draw `num_images` distinct frame numbers uniformly from the sampled
///    sub-range, sorted ascending.
/// 2. Walk the candidates in order. A candidate with no readable frame is
///    skipped without affecting spacing. A readable candidate is accepted
///    when it is at least the minimum interval after the previously
///    ACCEPTED keyframe (the first candidate is never rejected by spacing)
///    and its complexity score strictly exceeds the threshold.
/// 3. Each accepted frame is written to a fresh unique path inside
///    `output_directory`.
///
/// # Errors
///
/// - [`FramesiftError::InvalidImageCount`] when `num_images` is zero.
/// - Directory preparation errors from
///   [`prepare_output_directory`](crate::prepare_output_directory).
/// - [`FramesiftError::InvalidSampleRange`] for bad percentage bounds.
/// - [`FramesiftError::InsufficientRange`] when the sub-range holds fewer
///   than `num_images` distinct frame numbers. Nothing is written.
/// - [`FramesiftError::Image`] / [`FramesiftError::Io`] when an accepted
///   frame cannot be encoded to disk.
pub fn extract_keyframes_from<S, R>(
    source: &mut S,
    rng: &mut R,
    output_directory: impl AsRef<Path>,
    options: &KeyframeOptions,
    scorer: &dyn FrameScorer,
) -> Result<Vec<PathBuf>, FramesiftError>
where
    S: FrameSource,
    R: Rng + ?Sized,
{
    options.validate()?;
    let output_directory = output_directory.as_ref();
    prepare_output_directory(output_directory)?;

    let (start_frame, end_frame) =
        resolve_sample_range(source.frame_count(), options.start_pct, options.end_pct)?;
    let frame_rate = source.frame_rate();
    let min_interval_seconds = source.duration_seconds() * options.min_interval_pct;

    let candidates = draw_distinct_frames(rng, start_frame, end_frame, options.num_images)?;
    log::debug!(
        "Sampling {} candidate frames in [{start_frame}, {end_frame}) with minimum spacing {min_interval_seconds:.3}s",
        candidates.len(),
    );

    let mut written = Vec::with_capacity(options.num_images);
    // Sentinel: the first candidate can never be rejected by spacing.
    let mut last_accepted_time = -min_interval_seconds;

    for frame_number in candidates {
        let Some(frame) = source.read_frame(frame_number)? else {
            log::debug!("No frame available at {frame_number}, skipping candidate");
            continue;
        };

        // Spacing is measured against the last ACCEPTED keyframe, not the
        // last candidate.
        let current_time = frame_number as f64 / frame_rate;
        if current_time < last_accepted_time + min_interval_seconds {
            log::debug!(
                "Frame {frame_number} at {current_time:.3}s is within {min_interval_seconds:.3}s of the last accepted keyframe, skipping"
            );
            continue;
        }

        let score = scorer.score(&frame);
        log::debug!("Frame {frame_number} at {current_time:.3}s scored {score:.2}");
        if score <= options.complexity_threshold {
            continue;
        }

        let frame_path = generate_image_filename(output_directory);
        frame.save(&frame_path)?;
        written.push(frame_path);
        last_accepted_time = current_time;
    }

    log::info!(
        "Extracted {} of {} requested keyframes",
        written.len(),
        options.num_images,
    );
    Ok(written)
}
