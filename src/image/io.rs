//! Interop with buffers from the `image` crate.
//!
//! Available when the `image-io` feature is enabled. Only in-memory
//! conversions are provided; decoding files is left to the caller.

use crate::image::{OwnedRaster, PixelFormat, RasterImage};
use crate::util::PatternMatchResult;

/// Borrows a grayscale image buffer as a raster.
pub fn raster_from_gray_image(img: &image::GrayImage) -> PatternMatchResult<RasterImage<'_>> {
    RasterImage::new(
        img.as_raw(),
        img.width() as usize,
        img.height() as usize,
        PixelFormat::Gray,
    )
}

/// Borrows an RGBA image buffer as a raster.
pub fn raster_from_rgba_image(img: &image::RgbaImage) -> PatternMatchResult<RasterImage<'_>> {
    RasterImage::new(
        img.as_raw(),
        img.width() as usize,
        img.height() as usize,
        PixelFormat::Rgba,
    )
}

/// Copies a dynamic image into an owned raster, keeping 8-bit layouts as-is.
///
/// Layouts without an 8-bit counterpart are converted to RGBA.
pub fn owned_from_dynamic_image(img: &image::DynamicImage) -> PatternMatchResult<OwnedRaster> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    match img {
        image::DynamicImage::ImageLuma8(buf) => {
            OwnedRaster::new(buf.as_raw().clone(), width, height, PixelFormat::Gray)
        }
        image::DynamicImage::ImageLumaA8(buf) => {
            OwnedRaster::new(buf.as_raw().clone(), width, height, PixelFormat::GrayAlpha)
        }
        image::DynamicImage::ImageRgb8(buf) => {
            OwnedRaster::new(buf.as_raw().clone(), width, height, PixelFormat::Rgb)
        }
        image::DynamicImage::ImageRgba8(buf) => {
            OwnedRaster::new(buf.as_raw().clone(), width, height, PixelFormat::Rgba)
        }
        other => OwnedRaster::new(other.to_rgba8().into_raw(), width, height, PixelFormat::Rgba),
    }
}

#[cfg(test)]
mod tests {
    use super::{owned_from_dynamic_image, raster_from_gray_image};
    use crate::image::PixelFormat;

    #[test]
    fn gray_image_is_borrowed_without_copy() {
        let img = image::GrayImage::from_fn(5, 3, |x, y| image::Luma([(x + y) as u8]));
        let raster = raster_from_gray_image(&img).unwrap();
        assert_eq!(raster.width(), 5);
        assert_eq!(raster.height(), 3);
        assert_eq!(raster.bytes().as_slice().as_ptr(), img.as_raw().as_ptr());
    }

    #[test]
    fn rgb_dynamic_image_keeps_rgb_format() {
        let img = image::DynamicImage::ImageRgb8(image::RgbImage::new(2, 2));
        let owned = owned_from_dynamic_image(&img).unwrap();
        assert_eq!(owned.format(), PixelFormat::Rgb);
        assert!(!owned.format().is_matchable());
    }
}
