//! Raster views consumed by the matcher.
//!
//! `ImageView` is a borrowed 2D view into a 1D buffer with an explicit stride.
//! The stride counts elements between the starts of consecutive rows, so a
//! stride larger than the width represents padded rows. ROI slices are zero-copy
//! views into the same backing slice and retain the original stride.
//!
//! `RasterImage` layers a pixel format and a valid-data rectangle on top of a
//! byte view; `OwnedRaster` is its owning counterpart.

use crate::geometry::{Point, Rect};
use crate::util::{PatternMatchError, PatternMatchResult};

#[cfg(feature = "image-io")]
pub mod io;
mod window;

pub(crate) use window::PixelWindow;

/// Pixel layout of a raster buffer.
///
/// Only `Gray` and `Rgba` can be matched; the other layouts exist so that
/// image providers can describe what they hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PixelFormat {
    /// One 8-bit luminance sample per pixel.
    Gray,
    /// Luminance plus alpha, two bytes per pixel.
    GrayAlpha,
    /// Three bytes per pixel.
    Rgb,
    /// Four bytes per pixel; alpha is ignored by matching.
    Rgba,
}

impl PixelFormat {
    /// Number of bytes stored per pixel.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Gray => 1,
            PixelFormat::GrayAlpha => 2,
            PixelFormat::Rgb => 3,
            PixelFormat::Rgba => 4,
        }
    }

    /// Returns `true` for formats accepted by the matcher.
    pub fn is_matchable(self) -> bool {
        matches!(self, PixelFormat::Gray | PixelFormat::Rgba)
    }
}

/// Borrowed 2D image view with an explicit stride.
#[derive(Copy, Clone)]
pub struct ImageView<'a, T> {
    data: &'a [T],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a, T> ImageView<'a, T> {
    /// Creates a contiguous view with `stride == width`.
    pub fn from_slice(data: &'a [T], width: usize, height: usize) -> PatternMatchResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Creates a view with an explicit stride.
    pub fn new(
        data: &'a [T],
        width: usize,
        height: usize,
        stride: usize,
    ) -> PatternMatchResult<Self> {
        let needed = required_len(width, height, stride)?;
        if data.len() < needed {
            return Err(PatternMatchError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Contiguous view over a buffer whose geometry is already known to fit.
    pub(crate) fn packed(data: &'a [T], width: usize, height: usize) -> Self {
        debug_assert!(data.len() >= width * height);
        Self {
            data,
            width,
            height,
            stride: width,
        }
    }

    /// Returns the row length in elements.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the stride in elements between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the backing slice including any row padding.
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// Returns the element at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y.checked_mul(self.stride)?.checked_add(x)?;
        self.data.get(idx)
    }

    /// Returns a contiguous slice for row `y` with length `width`.
    pub fn row(&self, y: usize) -> Option<&'a [T]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?;
        let end = start.checked_add(self.width)?;
        self.data.get(start..end)
    }

    /// Returns a zero-copy ROI view into the same backing buffer.
    pub fn roi(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> PatternMatchResult<ImageView<'a, T>> {
        if width == 0 || height == 0 {
            return Err(PatternMatchError::InvalidDimensions { width, height });
        }

        let out_of_bounds = PatternMatchError::RoiOutOfBounds {
            x,
            y,
            width,
            height,
            img_width: self.width,
            img_height: self.height,
        };
        let end_x = x.checked_add(width).ok_or_else(|| out_of_bounds.clone())?;
        let end_y = y.checked_add(height).ok_or_else(|| out_of_bounds.clone())?;
        if end_x > self.width || end_y > self.height {
            return Err(out_of_bounds);
        }

        let start = y
            .checked_mul(self.stride)
            .and_then(|v| v.checked_add(x))
            .ok_or(PatternMatchError::InvalidDimensions {
                width: self.width,
                height: self.height,
            })?;
        let data = self
            .data
            .get(start..)
            .ok_or(PatternMatchError::BufferTooSmall {
                needed: start.saturating_add(1),
                got: self.data.len(),
            })?;

        ImageView::new(data, width, height, self.stride)
    }
}

fn required_len(width: usize, height: usize, stride: usize) -> PatternMatchResult<usize> {
    if width == 0 || height == 0 {
        return Err(PatternMatchError::InvalidDimensions { width, height });
    }
    if stride < width {
        return Err(PatternMatchError::InvalidStride { width, stride });
    }
    let needed = (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(width))
        .ok_or(PatternMatchError::InvalidDimensions { width, height })?;
    Ok(needed)
}

/// Borrowed raster with a pixel format and a valid-data rectangle.
///
/// Coordinates are absolute pixel coordinates of the full buffer; the valid
/// rectangle restricts which pixels hold meaningful data.
#[derive(Copy, Clone)]
pub struct RasterImage<'a> {
    bytes: ImageView<'a, u8>,
    format: PixelFormat,
    valid: Rect,
}

impl<'a> RasterImage<'a> {
    /// Creates a raster over tightly packed rows.
    pub fn new(
        data: &'a [u8],
        width: usize,
        height: usize,
        format: PixelFormat,
    ) -> PatternMatchResult<Self> {
        let row_len = row_bytes(width, height, format)?;
        Self::with_stride(data, width, height, row_len, format)
    }

    /// Creates a raster with an explicit row stride in bytes.
    pub fn with_stride(
        data: &'a [u8],
        width: usize,
        height: usize,
        stride: usize,
        format: PixelFormat,
    ) -> PatternMatchResult<Self> {
        let row_len = row_bytes(width, height, format)?;
        let bytes = ImageView::new(data, row_len, height, stride)?;
        Ok(Self {
            bytes,
            format,
            valid: Rect::with_size(width, height),
        })
    }

    /// Restricts the valid-data rectangle; it must lie inside the buffer.
    pub fn with_valid_rect(mut self, valid: Rect) -> PatternMatchResult<Self> {
        if !self.bounds().contains_rect(&valid) {
            return Err(PatternMatchError::RoiOutOfBounds {
                x: valid.x,
                y: valid.y,
                width: valid.width,
                height: valid.height,
                img_width: self.width(),
                img_height: self.height(),
            });
        }
        self.valid = valid;
        Ok(self)
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.bytes.width() / self.format.bytes_per_pixel()
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.bytes.height()
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Full buffer rectangle.
    pub fn bounds(&self) -> Rect {
        Rect::with_size(self.width(), self.height())
    }

    /// Rectangle holding meaningful pixel data.
    pub fn valid_rect(&self) -> Rect {
        self.valid
    }

    /// Underlying byte view (row length is `width * bytes_per_pixel`).
    pub fn bytes(&self) -> ImageView<'a, u8> {
        self.bytes
    }

    /// Returns the samples of the pixel at `p`.
    pub fn pixel(&self, p: Point) -> Option<&'a [u8]> {
        let bpp = self.format.bytes_per_pixel();
        let row = self.bytes.row(p.y)?;
        let start = p.x.checked_mul(bpp)?;
        row.get(start..start + bpp)
    }

    /// Zero-copy byte view of `rect`.
    pub(crate) fn region_bytes(&self, rect: Rect) -> PatternMatchResult<ImageView<'a, u8>> {
        let bpp = self.format.bytes_per_pixel();
        self.bytes
            .roi(rect.x * bpp, rect.y, rect.width * bpp, rect.height)
    }

    /// Pattern-sized window whose top-left pixel is `origin`.
    pub(crate) fn window(&self, origin: Point) -> PixelWindow<'a> {
        PixelWindow::new(self.bytes, self.format.bytes_per_pixel(), origin)
    }
}

fn row_bytes(width: usize, height: usize, format: PixelFormat) -> PatternMatchResult<usize> {
    width
        .checked_mul(format.bytes_per_pixel())
        .ok_or(PatternMatchError::InvalidDimensions { width, height })
}

/// Owned raster in contiguous row-major layout.
#[derive(Clone, Debug, PartialEq)]
pub struct OwnedRaster {
    data: Vec<u8>,
    width: usize,
    height: usize,
    format: PixelFormat,
}

impl OwnedRaster {
    /// Wraps a tightly packed buffer of `width * height * bpp` bytes.
    pub fn new(
        data: Vec<u8>,
        width: usize,
        height: usize,
        format: PixelFormat,
    ) -> PatternMatchResult<Self> {
        let row_len = row_bytes(width, height, format)?;
        let needed = required_len(row_len, height, row_len)?;
        if data.len() != needed {
            return Err(PatternMatchError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            format,
        })
    }

    /// Builds a raster by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(
        width: usize,
        height: usize,
        format: PixelFormat,
        mut f: F,
    ) -> PatternMatchResult<Self>
    where
        F: FnMut(usize, usize) -> [u8; 4],
    {
        let bpp = format.bytes_per_pixel();
        let mut data = Vec::with_capacity(width * height * bpp);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y)[..bpp]);
            }
        }
        Self::new(data, width, height, format)
    }

    /// Copies the valid rectangle of `raster` into a new buffer.
    pub fn copy_from(raster: &RasterImage<'_>) -> PatternMatchResult<Self> {
        let valid = raster.valid_rect();
        let region = raster.region_bytes(valid)?;
        let mut data = Vec::with_capacity(region.width() * region.height());
        for y in 0..region.height() {
            if let Some(row) = region.row(y) {
                data.extend_from_slice(row);
            }
        }
        Self::new(data, valid.width, valid.height, raster.format())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Mutable samples of the pixel at `p`.
    pub fn pixel_mut(&mut self, p: Point) -> Option<&mut [u8]> {
        if p.x >= self.width || p.y >= self.height {
            return None;
        }
        let bpp = self.format.bytes_per_pixel();
        let start = (p.y * self.width + p.x) * bpp;
        self.data.get_mut(start..start + bpp)
    }

    /// Borrowed raster over the whole buffer.
    pub fn view(&self) -> RasterImage<'_> {
        RasterImage {
            bytes: ImageView::packed(
                &self.data,
                self.width * self.format.bytes_per_pixel(),
                self.height,
            ),
            format: self.format,
            valid: Rect::with_size(self.width, self.height),
        }
    }
}
