//! Frame complexity scoring.
//!
//! The keyframe selector filters candidate frames through a [`FrameScorer`],
//! keeping the heuristic swappable without touching the selection algorithm.
//! [`PixelDeviationScorer`] is the default: population standard deviation
//! over all raw channel values, a cheap proxy for "visually interesting"
//! versus "flat/blank".

use image::DynamicImage;

/// Scores the visual complexity of a decoded frame.
///
/// Higher scores mean more visual detail. The keyframe selector accepts a
/// frame only when its score strictly exceeds the caller-supplied threshold,
/// so implementations should return values on a scale the caller can
/// threshold against.
pub trait FrameScorer {
    /// Compute the complexity score of `frame`.
    fn score(&self, frame: &DynamicImage) -> f64;
}

/// Population standard deviation over all RGB channel values.
///
/// A completely uniform frame (solid colour, black leader, blank card)
/// scores 0.0; a half-black, half-white frame scores 127.5. Thresholds in
/// the 10–40 range work well for rejecting flat frames.
///
/// # Example
///
/// ```
/// use framesift::{FrameScorer, PixelDeviationScorer};
/// use image::{DynamicImage, Rgb, RgbImage};
///
/// let flat = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([128, 128, 128])));
/// assert_eq!(PixelDeviationScorer.score(&flat), 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PixelDeviationScorer;

impl FrameScorer for PixelDeviationScorer {
    fn score(&self, frame: &DynamicImage) -> f64 {
        let rgb = frame.to_rgb8();
        let samples = rgb.as_raw();
        if samples.is_empty() {
            return 0.0;
        }
        let count = samples.len() as f64;
        let mean: f64 = samples.iter().map(|&value| value as f64).sum::<f64>() / count;
        let variance: f64 = samples
            .iter()
            .map(|&value| {
                let difference = value as f64 - mean;
                difference * difference
            })
            .sum::<f64>()
            / count;
        variance.sqrt()
    }
}
