//! Shared helpers for the integration tests.
//!
//! `SyntheticSource` drives the selection algorithms through the
//! `FrameSource` boundary without needing a real video file.

#![allow(dead_code)]

use std::collections::HashSet;

use framesift::{FrameSource, FramesiftError};
use image::{DynamicImage, Rgb, RgbImage};

/// Uniform mid-gray frame. Population standard deviation 0.0.
pub fn flat_frame(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([128, 128, 128])))
}

/// Black/white checkerboard frame. Population standard deviation 127.5
/// for even dimensions.
pub fn busy_frame(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        if (x + y) % 2 == 0 {
            Rgb([0, 0, 0])
        } else {
            Rgb([255, 255, 255])
        }
    }))
}

/// Scripted frame supply.
///
/// Every frame decodes to a checkerboard unless its number is listed in
/// `flat` (decodes to a uniform frame) or `unreadable` (yields no frame at
/// all). Read requests are recorded in order.
pub struct SyntheticSource {
    pub frame_count: u64,
    pub frame_rate: f64,
    pub width: u32,
    pub height: u32,
    pub unreadable: HashSet<u64>,
    pub flat: HashSet<u64>,
    pub reads: Vec<u64>,
}

impl SyntheticSource {
    pub fn new(frame_count: u64, frame_rate: f64) -> Self {
        Self {
            frame_count,
            frame_rate,
            width: 64,
            height: 48,
            unreadable: HashSet::new(),
            flat: HashSet::new(),
            reads: Vec::new(),
        }
    }

    /// A source whose every frame is uniform (scores 0.0).
    pub fn all_flat(frame_count: u64, frame_rate: f64) -> Self {
        let mut source = Self::new(frame_count, frame_rate);
        source.flat = (0..frame_count).collect();
        source
    }

    pub fn with_unreadable(mut self, frame_numbers: &[u64]) -> Self {
        self.unreadable = frame_numbers.iter().copied().collect();
        self
    }

    pub fn with_flat(mut self, frame_numbers: &[u64]) -> Self {
        self.flat = frame_numbers.iter().copied().collect();
        self
    }
}

impl FrameSource for SyntheticSource {
    fn frame_count(&self) -> u64 {
        self.frame_count
    }

    fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    fn read_frame(&mut self, frame_number: u64) -> Result<Option<DynamicImage>, FramesiftError> {
        self.reads.push(frame_number);
        if self.unreadable.contains(&frame_number) {
            return Ok(None);
        }
        if self.flat.contains(&frame_number) {
            return Ok(Some(flat_frame(self.width, self.height)));
        }
        Ok(Some(busy_frame(self.width, self.height)))
    }
}
