//! Error types for the `framesift` crate.
//!
//! This module defines [`FramesiftError`], the unified error type returned by
//! all fallible operations in the crate. Variants carry enough context to
//! diagnose the problem without needing additional logging at the call site,
//! including file paths, frame numbers, and upstream error messages.

use std::{io::Error as IoError, path::PathBuf};

use ffmpeg_next::Error as FfmpegError;
use image::ImageError;
use thiserror::Error;

/// The unified error type for all `framesift` operations.
///
/// Every public function that can fail returns `Result<T, FramesiftError>`.
/// No panic or raw FFmpeg fault escapes the extraction entry points; every
/// failure surfaces as one of these variants with a human-readable message.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FramesiftError {
    /// The output path exists but is not a directory.
    #[error("Output path {path} already exists and is not a directory")]
    PathConflict {
        /// The conflicting path.
        path: PathBuf,
    },

    /// The execution environment refused to create the output directory.
    #[error("Permission denied while creating output directory {path}")]
    PermissionDenied {
        /// The directory that could not be created.
        path: PathBuf,
    },

    /// Directory creation failed for a reason other than permissions or a
    /// conflicting file.
    #[error("Failed to create output directory {path}: {source}")]
    DirectoryCreation {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: IoError,
    },

    /// The video file could not be opened or decoded.
    #[error("Failed to open video file at {path}: {reason}")]
    VideoOpen {
        /// Path that was passed to [`crate::VideoSource::open`].
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// The file does not contain a video stream.
    #[error("No video stream found in file")]
    NoVideoStream,

    /// The sample range does not hold enough distinct frame numbers for the
    /// requested draw.
    #[error(
        "Sample range holds {available} frames but {requested} distinct timestamps were requested"
    )]
    InsufficientRange {
        /// Number of distinct frame numbers available in the range.
        available: u64,
        /// Number of distinct timestamps that were requested.
        requested: usize,
    },

    /// An in-range frame could not be read while collecting thumbnail sheet
    /// tiles. Fatal for the sheet pipeline, unlike the keyframe selector's
    /// skip-on-read-failure policy.
    #[error("Failed to read frame {frame_number} for the thumbnail sheet")]
    FrameRead {
        /// The frame number that could not be read.
        frame_number: u64,
    },

    /// The start/end percentages do not describe a usable sample range.
    #[error(
        "Invalid sample range: start_pct ({start_pct}) and end_pct ({end_pct}) must lie in [0, 1) with start_pct < end_pct"
    )]
    InvalidSampleRange {
        /// The requested start percentage.
        start_pct: f64,
        /// The requested end percentage.
        end_pct: f64,
    },

    /// A thumbnail grid with zero rows or columns was requested.
    #[error("Invalid grid layout {columns}x{rows}: both dimensions must be at least 1")]
    InvalidGrid {
        /// Requested column count.
        columns: u32,
        /// Requested row count.
        rows: u32,
    },

    /// Zero output images were requested.
    #[error("At least one output image must be requested")]
    InvalidImageCount,

    /// Grid composition was attempted with no tiles.
    #[error("Cannot compose a thumbnail sheet from zero tiles")]
    EmptySheet,

    /// An error originating from the FFmpeg libraries.
    #[error("FFmpeg error: {0}")]
    Ffmpeg(String),

    /// An error from the `image` crate while resizing or encoding frames.
    #[error("Image processing error: {0}")]
    Image(#[from] ImageError),

    /// An I/O error occurred while writing output files.
    #[error("I/O error: {0}")]
    Io(#[from] IoError),
}

impl From<FfmpegError> for FramesiftError {
    fn from(error: FfmpegError) -> Self {
        FramesiftError::Ffmpeg(error.to_string())
    }
}
