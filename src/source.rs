//! Video frame access.
//!
//! This module defines [`FrameSource`], the boundary both extraction
//! pipelines decode through, and [`VideoSource`], the FFmpeg-backed
//! implementation. Frames are returned as [`image::DynamicImage`] in RGB8
//! format.

use std::path::{Path, PathBuf};

use ffmpeg_next::{
    Rational,
    codec::context::Context as CodecContext,
    format::{Pixel, context::Input},
    frame::Video as VideoFrame,
    media::Type,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
};
use image::{DynamicImage, RgbImage};

use crate::error::FramesiftError;

/// A seekable supply of decoded video frames.
///
/// The extraction pipelines are written against this trait so the selection
/// logic can be driven by any frame supply — the FFmpeg-backed
/// [`VideoSource`] in production, synthetic sources in tests.
///
/// Implementations do not clamp out-of-range frame numbers; callers keep
/// their requests inside `[0, frame_count)`. A request the source cannot
/// satisfy yields `Ok(None)`, never an error.
pub trait FrameSource {
    /// Total number of frames in the video.
    fn frame_count(&self) -> u64;

    /// Frames per second of the video stream.
    fn frame_rate(&self) -> f64;

    /// Duration in seconds, derived from frame count and frame rate.
    fn duration_seconds(&self) -> f64 {
        let rate = self.frame_rate();
        if rate > 0.0 {
            self.frame_count() as f64 / rate
        } else {
            0.0
        }
    }

    /// Seek to `frame_number` and decode the frame there.
    ///
    /// Returns `Ok(None)` when no frame is available at that position — end
    /// of stream, a corrupt frame, or a failed seek. Callers decide whether
    /// that is a skip or a fatal condition.
    fn read_frame(&mut self, frame_number: u64) -> Result<Option<DynamicImage>, FramesiftError>;
}

/// FFmpeg-backed frame source for a single video file.
///
/// Created via [`VideoSource::open`], this struct holds the demuxer context
/// and stream facts cached at open time. Each [`read_frame`] call builds a
/// fresh decoder, seeks to the nearest keyframe at or before the target, and
/// decodes forward — the decoder is dropped when the call returns.
///
/// The demuxer is released when the source is dropped. Ownership ties the
/// release to every exit path, so it runs exactly once even when an
/// extraction pipeline bails out early.
///
/// [`read_frame`]: FrameSource::read_frame
///
/// # Example
///
/// ```no_run
/// use framesift::{FrameSource, VideoSource};
///
/// let mut source = VideoSource::open("input.mp4")?;
/// println!("{} frames at {:.2} fps", source.frame_count(), source.frame_rate());
/// if let Some(frame) = source.read_frame(0)? {
///     frame.save("first_frame.png").unwrap();
/// }
/// # Ok::<(), framesift::FramesiftError>(())
/// ```
pub struct VideoSource {
    /// The opened FFmpeg input (demuxer) context.
    input_context: Input,
    /// Index of the best video stream.
    video_stream_index: usize,
    /// Time base of the video stream.
    time_base: Rational,
    /// Total frame count, cached at open time.
    frame_count: u64,
    /// Frames per second, cached at open time.
    frame_rate: f64,
    /// Decoded frame width in pixels.
    width: u32,
    /// Decoded frame height in pixels.
    height: u32,
    /// Path to the opened video file (kept for error messages).
    #[allow(dead_code)]
    file_path: PathBuf,
}

impl std::fmt::Debug for VideoSource {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // `Input` (the FFmpeg demuxer) does not implement `Debug`, so skip it
        // and report the cached stream facts instead.
        formatter
            .debug_struct("VideoSource")
            .field("video_stream_index", &self.video_stream_index)
            .field("time_base", &self.time_base)
            .field("frame_count", &self.frame_count)
            .field("frame_rate", &self.frame_rate)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("file_path", &self.file_path)
            .finish_non_exhaustive()
    }
}

impl VideoSource {
    /// Open a video file for frame extraction.
    ///
    /// Initializes FFmpeg (idempotent), opens the file, locates the best
    /// video stream, and caches frame count, frame rate, and dimensions.
    ///
    /// # Errors
    ///
    /// - [`FramesiftError::VideoOpen`] if the file cannot be opened or its
    ///   frame rate cannot be determined.
    /// - [`FramesiftError::NoVideoStream`] if the container has no video
    ///   stream.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, FramesiftError> {
        let path = path.as_ref();
        let file_path = path.to_path_buf();

        log::debug!("Opening video file: {}", file_path.display());

        // Initialise ffmpeg (safe to call multiple times).
        ffmpeg_next::init().map_err(|error| FramesiftError::VideoOpen {
            path: file_path.clone(),
            reason: format!("FFmpeg initialisation failed: {error}"),
        })?;

        let input_context =
            ffmpeg_next::format::input(&path).map_err(|error| FramesiftError::VideoOpen {
                path: file_path.clone(),
                reason: error.to_string(),
            })?;

        let duration_microseconds = input_context.duration();

        let (video_stream_index, time_base, frame_rate, stream_frames, width, height) = {
            let stream = input_context
                .streams()
                .best(Type::Video)
                .ok_or(FramesiftError::NoVideoStream)?;

            // Frames per second from the stream's average frame rate, with
            // the raw rate field as a fallback.
            let average_rate = stream.avg_frame_rate();
            let frame_rate = if average_rate.denominator() != 0 && average_rate.numerator() > 0 {
                average_rate.numerator() as f64 / average_rate.denominator() as f64
            } else {
                let rate = stream.rate();
                if rate.denominator() != 0 {
                    rate.numerator() as f64 / rate.denominator() as f64
                } else {
                    0.0
                }
            };

            let codec_parameters = stream.parameters();
            let decoder_context = CodecContext::from_parameters(codec_parameters).map_err(
                |error| FramesiftError::VideoOpen {
                    path: file_path.clone(),
                    reason: format!("Failed to read video codec parameters: {error}"),
                },
            )?;
            let decoder =
                decoder_context
                    .decoder()
                    .video()
                    .map_err(|error| FramesiftError::VideoOpen {
                        path: file_path.clone(),
                        reason: format!("Failed to create video decoder: {error}"),
                    })?;

            (
                stream.index(),
                stream.time_base(),
                frame_rate,
                stream.frames(),
                decoder.width(),
                decoder.height(),
            )
        };

        if frame_rate <= 0.0 {
            return Err(FramesiftError::VideoOpen {
                path: file_path,
                reason: "Could not determine the video frame rate".to_string(),
            });
        }

        // Prefer the container's frame count; derive it from the duration
        // when the container does not carry one.
        let frame_count = if stream_frames > 0 {
            stream_frames as u64
        } else if duration_microseconds > 0 {
            (duration_microseconds as f64 / 1_000_000.0 * frame_rate) as u64
        } else {
            0
        };

        log::info!(
            "Opened video file: {} ({}x{}, {:.2} fps, ~{} frames)",
            file_path.display(),
            width,
            height,
            frame_rate,
            frame_count,
        );

        Ok(Self {
            input_context,
            video_stream_index,
            time_base,
            frame_count,
            frame_rate,
            width,
            height,
            file_path,
        })
    }

    /// Decoded frame width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Decoded frame height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }
}

impl FrameSource for VideoSource {
    fn frame_count(&self) -> u64 {
        self.frame_count
    }

    fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    fn read_frame(&mut self, frame_number: u64) -> Result<Option<DynamicImage>, FramesiftError> {
        let video_stream_index = self.video_stream_index;
        let time_base = self.time_base;
        let frame_rate = self.frame_rate;
        let target_width = self.width;
        let target_height = self.height;

        // Build a fresh decoder from the stream parameters.
        let stream = self
            .input_context
            .stream(video_stream_index)
            .ok_or(FramesiftError::NoVideoStream)?;
        let codec_parameters = stream.parameters();
        let decoder_context = CodecContext::from_parameters(codec_parameters)?;
        let mut decoder = decoder_context.decoder().video()?;

        // Pixel-format converter (source format → RGB24).
        let mut scaler = ScalingContext::get(
            decoder.format(),
            decoder.width(),
            decoder.height(),
            Pixel::RGB24,
            target_width,
            target_height,
            ScalingFlags::BILINEAR,
        )?;

        // Seek to the nearest keyframe at or before the target frame. A
        // failed seek means there is no frame to read at this position.
        let target_timestamp = crate::conversion::frame_number_to_stream_timestamp(
            frame_number,
            frame_rate,
            time_base,
        );
        if let Err(error) = self.input_context.seek(target_timestamp, ..target_timestamp) {
            log::debug!("Seek to frame {frame_number} failed: {error}");
            return Ok(None);
        }

        let mut decoded_frame = VideoFrame::empty();
        let mut rgb_frame = VideoFrame::empty();

        // Decode forward until the target frame (or the nearest decodable
        // frame after it) is reached. Corrupt packets make the frame
        // unavailable rather than failing the whole extraction.
        for (stream, packet) in self.input_context.packets() {
            if stream.index() != video_stream_index {
                continue;
            }

            if let Err(error) = decoder.send_packet(&packet) {
                log::debug!("Dropping corrupt packet near frame {frame_number}: {error}");
                return Ok(None);
            }

            while decoder.receive_frame(&mut decoded_frame).is_ok() {
                let pts = decoded_frame.pts().unwrap_or(0);
                let current_frame_number =
                    crate::conversion::pts_to_frame_number(pts, time_base, frame_rate);

                if current_frame_number >= frame_number {
                    if let Err(error) = scaler.run(&decoded_frame, &mut rgb_frame) {
                        log::debug!("Failed to convert frame {frame_number}: {error}");
                        return Ok(None);
                    }
                    return Ok(convert_frame_to_image(
                        &rgb_frame,
                        target_width,
                        target_height,
                    ));
                }
            }
        }

        // Flush the decoder.
        if decoder.send_eof().is_ok() {
            while decoder.receive_frame(&mut decoded_frame).is_ok() {
                let pts = decoded_frame.pts().unwrap_or(0);
                let current_frame_number =
                    crate::conversion::pts_to_frame_number(pts, time_base, frame_rate);

                if current_frame_number >= frame_number {
                    if let Err(error) = scaler.run(&decoded_frame, &mut rgb_frame) {
                        log::debug!("Failed to convert frame {frame_number}: {error}");
                        return Ok(None);
                    }
                    return Ok(convert_frame_to_image(
                        &rgb_frame,
                        target_width,
                        target_height,
                    ));
                }
            }
        }

        log::debug!("No frame available at {frame_number} (end of stream)");
        Ok(None)
    }
}

/// Convert a scaled RGB24 video frame to an [`image::DynamicImage`].
///
/// Returns `None` when the decoded buffer does not match the expected
/// dimensions, which the caller treats as an unavailable frame.
fn convert_frame_to_image(
    rgb_frame: &VideoFrame,
    width: u32,
    height: u32,
) -> Option<DynamicImage> {
    let buffer = crate::conversion::frame_to_rgb_buffer(rgb_frame, width, height);
    RgbImage::from_raw(width, height, buffer).map(DynamicImage::ImageRgb8)
}
