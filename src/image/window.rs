//! Candidate-window addressing.

use crate::geometry::Point;
use crate::image::ImageView;

/// Pattern-local view into a raster at a fixed origin.
///
/// Rows are addressed relative to the window origin; the origin and the
/// per-pixel byte width are applied here once, so scoring loops only deal
/// with pattern coordinates.
#[derive(Copy, Clone)]
pub(crate) struct PixelWindow<'a> {
    bytes: ImageView<'a, u8>,
    bytes_per_pixel: usize,
    origin: Point,
}

impl<'a> PixelWindow<'a> {
    pub(crate) fn new(bytes: ImageView<'a, u8>, bytes_per_pixel: usize, origin: Point) -> Self {
        Self {
            bytes,
            bytes_per_pixel,
            origin,
        }
    }

    /// Bytes of pattern row `ty`, starting at pattern column `tx0` and
    /// spanning `count` pixels.
    #[inline]
    pub(crate) fn span(&self, ty: usize, tx0: usize, count: usize) -> Option<&'a [u8]> {
        let row = self.bytes.row(self.origin.y.checked_add(ty)?)?;
        let start = self.origin.x.checked_add(tx0)? * self.bytes_per_pixel;
        row.get(start..start + count * self.bytes_per_pixel)
    }

    pub(crate) fn bytes_per_pixel(&self) -> usize {
        self.bytes_per_pixel
    }
}
