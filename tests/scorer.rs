//! Complexity scorer tests.

mod common;

use framesift::{FrameScorer, PixelDeviationScorer};
use image::{DynamicImage, Rgb, RgbImage};

#[test]
fn uniform_frames_score_zero() {
    let flat = common::flat_frame(64, 48);
    assert_eq!(PixelDeviationScorer.score(&flat), 0.0);

    let black = DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 48, Rgb([0, 0, 0])));
    assert_eq!(PixelDeviationScorer.score(&black), 0.0);
}

#[test]
fn checkerboard_scores_half_the_value_range() {
    // Half the samples are 0, half are 255: mean 127.5, deviation 127.5.
    let busy = common::busy_frame(64, 48);
    let score = PixelDeviationScorer.score(&busy);
    assert!(
        (score - 127.5).abs() < 1e-9,
        "Expected a population standard deviation of 127.5, got {score}",
    );
}

#[test]
fn higher_contrast_scores_higher() {
    let gradient = DynamicImage::ImageRgb8(RgbImage::from_fn(64, 48, |x, _| {
        let value = (x * 4) as u8;
        Rgb([value, value, value])
    }));

    let flat_score = PixelDeviationScorer.score(&common::flat_frame(64, 48));
    let gradient_score = PixelDeviationScorer.score(&gradient);
    let busy_score = PixelDeviationScorer.score(&common::busy_frame(64, 48));

    assert!(flat_score < gradient_score);
    assert!(gradient_score < busy_score);
}

#[test]
fn empty_image_scores_zero() {
    let empty = DynamicImage::new_rgb8(0, 0);
    assert_eq!(PixelDeviationScorer.score(&empty), 0.0);
}
