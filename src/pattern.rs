//! Pattern value object: the pixels being searched for, plus an optional
//! shape mask.

use crate::geometry::{Point, Rect};
use crate::image::{ImageView, OwnedRaster, PixelFormat, PixelWindow, RasterImage};
use crate::mask::Mask;
use crate::util::{PatternMatchError, PatternMatchResult};

/// How a pattern holds its pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PatternOwnership {
    /// Deep copy of the source pixels.
    #[default]
    Owned,
    /// Zero-copy view; the source raster must outlive the pattern.
    Referenced,
}

enum PatternPixels<'a> {
    Owned(Vec<u8>),
    Referenced(ImageView<'a, u8>),
}

/// Template grabbed from the valid rectangle of a raster.
///
/// Pixels and mask are stored pattern-relative: `bounds()` always starts at
/// the origin regardless of where the pattern was taken from. A pattern is
/// never mutated after construction.
pub struct Pattern<'a> {
    format: PixelFormat,
    source: Rect,
    pixels: PatternPixels<'a>,
    mask: Option<Mask>,
}

impl<'a> Pattern<'a> {
    /// Builds a pattern from the valid rectangle of `image`.
    ///
    /// A mask, when given, must cover exactly that rectangle and hold at
    /// least one set pixel.
    pub fn new(
        image: &RasterImage<'a>,
        mask: Option<&Mask>,
        ownership: PatternOwnership,
    ) -> PatternMatchResult<Self> {
        let format = image.format();
        if !format.is_matchable() {
            return Err(PatternMatchError::UnsupportedFormat { format });
        }
        let source = image.valid_rect();
        let mask = match mask {
            Some(mask) => {
                if mask.bounds() != source {
                    return Err(PatternMatchError::DimensionMismatch {
                        pattern: source,
                        mask: mask.bounds(),
                    });
                }
                if mask.count() == 0 {
                    return Err(PatternMatchError::EmptyPixelSet { region: "mask" });
                }
                Some(mask.relocated(Point::default()))
            }
            None => None,
        };

        let pixels = match ownership {
            PatternOwnership::Owned => {
                PatternPixels::Owned(OwnedRaster::copy_from(image)?.into_data())
            }
            PatternOwnership::Referenced => {
                PatternPixels::Referenced(image.region_bytes(source)?)
            }
        };

        Ok(Self {
            format,
            source,
            pixels,
            mask,
        })
    }

    /// Deep-copied pattern that does not borrow from `image`.
    pub fn owned(
        image: &RasterImage<'_>,
        mask: Option<&Mask>,
    ) -> PatternMatchResult<Pattern<'static>> {
        Pattern::new(image, mask, PatternOwnership::Referenced).map(Pattern::into_owned)
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Pattern-relative bounds, anchored at the origin.
    pub fn bounds(&self) -> Rect {
        Rect::with_size(self.source.width, self.source.height)
    }

    /// Rectangle the pattern was grabbed from, in source image coordinates.
    pub fn source_rect(&self) -> Rect {
        self.source
    }

    pub fn width(&self) -> usize {
        self.source.width
    }

    pub fn height(&self) -> usize {
        self.source.height
    }

    pub fn ownership(&self) -> PatternOwnership {
        match self.pixels {
            PatternPixels::Owned(_) => PatternOwnership::Owned,
            PatternPixels::Referenced(_) => PatternOwnership::Referenced,
        }
    }

    /// Pixel bytes; rows are `width * bytes_per_pixel` long.
    pub fn pixels(&self) -> ImageView<'_, u8> {
        match &self.pixels {
            PatternPixels::Owned(data) => ImageView::packed(
                data,
                self.source.width * self.format.bytes_per_pixel(),
                self.source.height,
            ),
            PatternPixels::Referenced(view) => *view,
        }
    }

    /// Shape mask, `None` for a plain rectangle.
    pub fn mask(&self) -> Option<&Mask> {
        self.mask.as_ref()
    }

    /// Number of pixels that take part in the statistics.
    pub fn participating_count(&self) -> usize {
        match &self.mask {
            Some(mask) => mask.count(),
            None => self.source.area(),
        }
    }

    /// Converts into a pattern that owns its pixels.
    pub fn into_owned(self) -> Pattern<'static> {
        let pixels = match self.pixels {
            PatternPixels::Owned(data) => data,
            PatternPixels::Referenced(view) => {
                let mut data = Vec::with_capacity(view.width() * view.height());
                for y in 0..view.height() {
                    if let Some(row) = view.row(y) {
                        data.extend_from_slice(row);
                    }
                }
                data
            }
        };
        Pattern {
            format: self.format,
            source: self.source,
            pixels: PatternPixels::Owned(pixels),
            mask: self.mask,
        }
    }

    pub(crate) fn window(&self) -> PixelWindow<'_> {
        PixelWindow::new(
            self.pixels(),
            self.format.bytes_per_pixel(),
            Point::default(),
        )
    }
}
