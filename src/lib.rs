//! # framesift
//!
//! Extract representative still frames from video files.
//!
//! `framesift` provides two extraction pipelines over the same FFmpeg-backed
//! decode primitives (via the
//! [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next) crate):
//!
//! - **Keyframe selection** — sample frames at random timestamps, keep only
//!   those that are visually complex and far enough apart in time, and write
//!   each accepted frame as its own image.
//! - **Thumbnail sheets** — sample frames at evenly-spaced timestamps and
//!   composite them into a single bordered contact-sheet grid.
//!
//! Both are built for downstream tools (media browsers, indexers) that need
//! preview images for a video without decoding the whole file.
//!
//! ## Quick Start
//!
//! ### Extract complex keyframes
//!
//! ```no_run
//! use framesift::{KeyframeOptions, extract_complex_keyframes};
//!
//! // Up to 5 keyframes from the middle 80% of the video, rejecting frames
//! // whose pixel deviation is 20.0 or below.
//! let options = KeyframeOptions::new(5, 20.0, 0.1, 0.9);
//! let paths = extract_complex_keyframes("input.mp4", "shots/", &options)?;
//! println!("wrote {} keyframes", paths.len());
//! # Ok::<(), framesift::FramesiftError>(())
//! ```
//!
//! ### Generate a thumbnail sheet
//!
//! ```no_run
//! use framesift::{SheetOptions, generate_thumbnail_sheet};
//!
//! let options = SheetOptions::new(3, 2, 0.05, 0.95);
//! let sheet = generate_thumbnail_sheet("input.mp4", "previews/", &options)?;
//! println!("sheet written to {}", sheet.display());
//! # Ok::<(), framesift::FramesiftError>(())
//! ```
//!
//! ## Features
//!
//! - **Lossy-by-design selection** — the keyframe pipeline may yield fewer
//!   images than requested; spacing and complexity filters always win.
//! - **Swappable complexity heuristic** — selection is written against the
//!   [`FrameScorer`] trait; [`PixelDeviationScorer`] (population standard
//!   deviation over all channels) is the default.
//! - **Testable selection logic** — both pipelines expose source-generic
//!   workers over the [`FrameSource`] trait, so the algorithms run against
//!   synthetic frame supplies in tests.
//! - **Scoped resource release** — the FFmpeg demuxer is tied to
//!   [`VideoSource`] ownership and is released exactly once on every exit
//!   path, including early failure returns.
//! - **Uniform errors** — every failure surfaces as a [`FramesiftError`]
//!   with a human-readable diagnostic; no raw FFmpeg fault escapes the
//!   public entry points.
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed on your system.

pub mod error;
pub mod keyframes;
pub mod output;
pub mod sampling;
pub mod scorer;
pub mod sheet;
pub mod source;

mod conversion;

pub use error::FramesiftError;
pub use keyframes::{KeyframeOptions, extract_complex_keyframes, extract_keyframes_from};
pub use output::{generate_image_filename, prepare_output_directory};
pub use sampling::{draw_distinct_frames, resolve_sample_range};
pub use scorer::{FrameScorer, PixelDeviationScorer};
pub use sheet::{SheetOptions, compose_grid, generate_thumbnail_sheet, sheet_from_source};
pub use source::{FrameSource, VideoSource};
