//! Thumbnail contact-sheet generation.
//!
//! Samples frames at fixed, evenly-spaced timestamps across a sub-range of
//! the video, scales them down, and composites them into a single bordered
//! grid image. Unlike the keyframe selector, a failed read of an in-range
//! frame is fatal here: the sheet either represents the requested sampling
//! or is not written at all.

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage, imageops, imageops::FilterType};

use crate::{
    error::FramesiftError,
    output::{generate_image_filename, prepare_output_directory},
    sampling::resolve_sample_range,
    source::{FrameSource, VideoSource},
};

/// Width in pixels of the white border around every grid cell.
const BORDER_WIDTH: u32 = 5;

/// Options for thumbnail sheet generation.
///
/// `columns` and `rows` define the grid layout (both at least 1);
/// `start_pct`/`end_pct` bound the sampled sub-range of the video. Tiles
/// are scaled by `1 / columns` on both axes, so sheets keep the source
/// aspect ratio and roughly the source width regardless of the column
/// count.
///
/// # Example
///
/// ```no_run
/// use framesift::{SheetOptions, generate_thumbnail_sheet};
///
/// let options = SheetOptions::new(3, 2, 0.05, 0.95);
/// let sheet = generate_thumbnail_sheet("input.mp4", "previews/", &options)?;
/// println!("sheet written to {}", sheet.display());
/// # Ok::<(), framesift::FramesiftError>(())
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct SheetOptions {
    /// Number of columns in the grid.
    pub columns: u32,
    /// Number of rows in the grid.
    pub rows: u32,
    /// Start of the sampled sub-range as a fraction of total frame count.
    pub start_pct: f64,
    /// End of the sampled sub-range as a fraction of total frame count.
    pub end_pct: f64,
}

impl SheetOptions {
    /// Create new sheet options.
    pub fn new(columns: u32, rows: u32, start_pct: f64, end_pct: f64) -> Self {
        Self {
            columns,
            rows,
            start_pct,
            end_pct,
        }
    }

    fn validate(&self) -> Result<(), FramesiftError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(FramesiftError::InvalidGrid {
                columns: self.columns,
                rows: self.rows,
            });
        }
        Ok(())
    }
}

/// Generate a thumbnail contact sheet from a video file.
///
/// Prepares the output directory, opens the video, and runs
/// [`sheet_from_source`]. The video handle is released on every exit path
/// when the source is dropped.
///
/// # Errors
///
/// Directory preparation errors are returned before the video is opened;
/// see [`sheet_from_source`] for the remaining failure modes.
pub fn generate_thumbnail_sheet<P, Q>(
    video_path: P,
    output_directory: Q,
    options: &SheetOptions,
) -> Result<PathBuf, FramesiftError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let output_directory = output_directory.as_ref();
    prepare_output_directory(output_directory)?;

    let mut source = VideoSource::open(video_path)?;
    sheet_from_source(&mut source, output_directory, options)
}

/// Generate a thumbnail sheet from an already-opened frame source.
///
/// Collects up to `columns × rows` frames at evenly-spaced frame numbers
/// (interval `⌊range / (columns × rows)⌋`; an interval of zero repeats the
/// start frame), stopping early once the computed frame number leaves the
/// sampled range. Collected frames are scaled by `1 / columns` on both axes
/// and composited with [`compose_grid`]; a short collection produces a
/// sheet with empty cells and a warning, not an error.
///
/// # Errors
///
/// - [`FramesiftError::InvalidGrid`] for a zero-dimension grid.
/// - Directory preparation errors from
///   [`prepare_output_directory`](crate::prepare_output_directory).
/// - [`FramesiftError::InvalidSampleRange`] for bad percentage bounds.
/// - [`FramesiftError::FrameRead`] when an in-range frame cannot be read —
///   fatal, the pipeline aborts.
/// - [`FramesiftError::EmptySheet`] when the sampled range is empty and no
///   tile could be collected.
/// - [`FramesiftError::Image`] / [`FramesiftError::Io`] when the composite
///   cannot be encoded to disk.
pub fn sheet_from_source<S: FrameSource>(
    source: &mut S,
    output_directory: impl AsRef<Path>,
    options: &SheetOptions,
) -> Result<PathBuf, FramesiftError> {
    options.validate()?;
    let output_directory = output_directory.as_ref();
    prepare_output_directory(output_directory)?;

    let (start_frame, end_frame) =
        resolve_sample_range(source.frame_count(), options.start_pct, options.end_pct)?;

    let cell_count = u64::from(options.columns) * u64::from(options.rows);
    let interval = (end_frame - start_frame) / cell_count;
    log::debug!(
        "Collecting up to {cell_count} thumbnails in [{start_frame}, {end_frame}) at interval {interval}"
    );

    let mut frames = Vec::with_capacity(cell_count as usize);
    for index in 0..cell_count {
        let frame_number = start_frame + index * interval;
        if frame_number >= end_frame {
            break;
        }

        match source.read_frame(frame_number)? {
            Some(frame) => frames.push(frame),
            None => return Err(FramesiftError::FrameRead { frame_number }),
        }
    }

    if (frames.len() as u64) < cell_count {
        log::warn!(
            "Collected only {} of {cell_count} thumbnails; the sheet will have empty cells",
            frames.len(),
        );
    }

    let tiles: Vec<RgbImage> = frames
        .iter()
        .map(|frame| {
            let tile_width = (frame.width() / options.columns).max(1);
            let tile_height = (frame.height() / options.columns).max(1);
            frame
                .resize_exact(tile_width, tile_height, FilterType::Triangle)
                .to_rgb8()
        })
        .collect();

    let sheet = compose_grid(&tiles, options.columns, options.rows)?;
    let sheet_path = generate_image_filename(output_directory);
    sheet.save(&sheet_path)?;

    log::info!(
        "Wrote {}x{} thumbnail sheet to {}",
        options.columns,
        options.rows,
        sheet_path.display(),
    );
    Ok(sheet_path)
}

/// Composite tiles into a white, bordered grid image.
///
/// The canvas is sized `columns × (tile_w + 2·border)` by
/// `rows × (tile_h + 2·border)` using the FIRST tile's dimensions for every
/// cell (frames from one video share dimensions — this is an invariant
/// assumption, not a guarded case). Tiles fill the grid row by row; cells
/// beyond the tile count stay white, and tiles beyond `columns × rows` are
/// ignored.
///
/// # Errors
///
/// - [`FramesiftError::InvalidGrid`] for a zero-dimension grid.
/// - [`FramesiftError::EmptySheet`] when `tiles` is empty.
pub fn compose_grid(
    tiles: &[RgbImage],
    columns: u32,
    rows: u32,
) -> Result<RgbImage, FramesiftError> {
    if columns == 0 || rows == 0 {
        return Err(FramesiftError::InvalidGrid { columns, rows });
    }
    let first = tiles.first().ok_or(FramesiftError::EmptySheet)?;

    let (tile_width, tile_height) = first.dimensions();
    let cell_width = tile_width + 2 * BORDER_WIDTH;
    let cell_height = tile_height + 2 * BORDER_WIDTH;

    let mut canvas = RgbImage::from_pixel(
        columns * cell_width,
        rows * cell_height,
        Rgb([255, 255, 255]),
    );

    for (index, tile) in tiles.iter().enumerate().take((columns * rows) as usize) {
        let column = index as u32 % columns;
        let row = index as u32 / columns;
        let x = i64::from(column * cell_width + BORDER_WIDTH);
        let y = i64::from(row * cell_height + BORDER_WIDTH);
        imageops::replace(&mut canvas, tile, x, y);
    }

    Ok(canvas)
}
