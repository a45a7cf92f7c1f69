//! Candidate timestamp selection.
//!
//! Shared arithmetic for turning the caller's percentage bounds into a frame
//! range, and the distinct-random draw the keyframe selector samples
//! candidates with.

use rand::Rng;

use crate::error::FramesiftError;

/// Resolve `start_pct`/`end_pct` into the `[start_frame, end_frame)`
/// sub-range of a video with `frame_count` frames.
///
/// The percentages bound which part of the video is eligible for sampling,
/// keeping leading and trailing degenerate frames (black leaders, credits)
/// out of reach.
///
/// # Errors
///
/// Returns [`FramesiftError::InvalidSampleRange`] unless both percentages
/// lie in `[0, 1)` and `start_pct < end_pct`.
pub fn resolve_sample_range(
    frame_count: u64,
    start_pct: f64,
    end_pct: f64,
) -> Result<(u64, u64), FramesiftError> {
    if !(0.0..1.0).contains(&start_pct) || !(0.0..1.0).contains(&end_pct) || start_pct >= end_pct {
        return Err(FramesiftError::InvalidSampleRange { start_pct, end_pct });
    }

    let start_frame = (frame_count as f64 * start_pct) as u64;
    let end_frame = (frame_count as f64 * end_pct) as u64;
    Ok((start_frame, end_frame))
}

/// Draw `count` distinct frame numbers uniformly from
/// `[start_frame, end_frame)` without replacement, sorted ascending.
///
/// # Errors
///
/// Returns [`FramesiftError::InsufficientRange`] when the range holds fewer
/// than `count` distinct integers. This is a precondition, not a silent
/// truncation.
pub fn draw_distinct_frames<R: Rng + ?Sized>(
    rng: &mut R,
    start_frame: u64,
    end_frame: u64,
    count: usize,
) -> Result<Vec<u64>, FramesiftError> {
    let available = end_frame.saturating_sub(start_frame);
    if available < count as u64 {
        return Err(FramesiftError::InsufficientRange {
            available,
            requested: count,
        });
    }

    let mut frame_numbers: Vec<u64> = rand::seq::index::sample(rng, available as usize, count)
        .into_iter()
        .map(|offset| start_frame + offset as u64)
        .collect();
    frame_numbers.sort_unstable();
    Ok(frame_numbers)
}
