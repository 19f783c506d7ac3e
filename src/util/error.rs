//! Error types for patmatch.

use crate::geometry::Rect;
use crate::image::PixelFormat;
use thiserror::Error;

/// Result alias for patmatch operations.
pub type PatternMatchResult<T> = std::result::Result<T, PatternMatchError>;

/// Errors that can occur when building patterns or running a search.
///
/// Every variant is raised before scanning starts; a candidate window with
/// zero variance is not an error and only degrades that window's score.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum PatternMatchError {
    /// A required input was not provided.
    #[error("missing parameter: {what}")]
    MissingParameter { what: &'static str },
    /// The pixel format is not one the matcher can correlate.
    #[error("unsupported pixel format: {format:?}")]
    UnsupportedFormat { format: PixelFormat },
    /// The pattern and the searched image use different pixel formats.
    #[error("pixel format mismatch: pattern is {pattern:?}, image is {image:?}")]
    FormatMismatch {
        pattern: PixelFormat,
        image: PixelFormat,
    },
    /// A mask does not cover the same rectangle as its pattern.
    #[error("mask bounds {mask:?} do not match pattern bounds {pattern:?}")]
    DimensionMismatch { pattern: Rect, mask: Rect },
    /// No candidate window fits inside the search rectangle.
    #[error("empty search region for search rectangle {search:?}")]
    EmptySearchRegion { search: Rect },
    /// The pattern has no intensity variation and cannot be normalized.
    #[error("zero variance in {region} pattern region ({channel} channel)")]
    DegenerateVariance {
        region: &'static str,
        channel: &'static str,
    },
    /// A pixel set that must hold at least one pixel is empty.
    #[error("no participating pixels in {region}")]
    EmptyPixelSet { region: &'static str },
    /// Width or height is zero or overflows.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Stride is smaller than the row length.
    #[error("invalid stride {stride} for row length {width}")]
    InvalidStride { width: usize, stride: usize },
    /// The backing buffer is shorter than the described image.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// A region of interest does not fit inside its image.
    #[error("roi ({x}, {y}, {width}x{height}) out of bounds for {img_width}x{img_height} image")]
    RoiOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        img_width: usize,
        img_height: usize,
    },
}
