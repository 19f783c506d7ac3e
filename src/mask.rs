//! Shape masks and the run-length blobs they are materialized from.
//!
//! A `Mask` is a dense boolean grid anchored at an absolute rectangle. A
//! `Blob` is an external shape description made of horizontal runs; it is
//! consumed once, when a masked pattern is built.

use crate::geometry::{Point, Rect};
use crate::util::{PatternMatchError, PatternMatchResult};

/// Dense boolean mask over a rectangle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    bounds: Rect,
    bits: Vec<bool>,
}

impl Mask {
    /// Wraps row-major `bits` covering `bounds`.
    pub fn new(bounds: Rect, bits: Vec<bool>) -> PatternMatchResult<Self> {
        if bounds.is_empty() {
            return Err(PatternMatchError::InvalidDimensions {
                width: bounds.width,
                height: bounds.height,
            });
        }
        if bits.len() != bounds.area() {
            return Err(PatternMatchError::BufferTooSmall {
                needed: bounds.area(),
                got: bits.len(),
            });
        }
        Ok(Self { bounds, bits })
    }

    /// Mask with every pixel of `bounds` set.
    pub fn full(bounds: Rect) -> PatternMatchResult<Self> {
        Self::new(bounds, vec![true; bounds.area()])
    }

    /// Builds a mask from a predicate on mask-local coordinates.
    pub fn from_fn<F>(bounds: Rect, mut f: F) -> PatternMatchResult<Self>
    where
        F: FnMut(usize, usize) -> bool,
    {
        let mut bits = Vec::with_capacity(bounds.area());
        for y in 0..bounds.height {
            for x in 0..bounds.width {
                bits.push(f(x, y));
            }
        }
        Self::new(bounds, bits)
    }

    /// Absolute rectangle covered by the mask.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn width(&self) -> usize {
        self.bounds.width
    }

    pub fn height(&self) -> usize {
        self.bounds.height
    }

    /// Row-major bits, mask-local.
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Bit at mask-local `(x, y)`; `false` outside the mask.
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.bounds.width || y >= self.bounds.height {
            return false;
        }
        self.bits[y * self.bounds.width + x]
    }

    /// Bit at an absolute image location.
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p) && self.get(p.x - self.bounds.x, p.y - self.bounds.y)
    }

    /// Number of set pixels.
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Number of set pixels inside a mask-local rectangle. Parts of the
    /// ranges outside the mask count as unset.
    pub(crate) fn count_in(
        &self,
        rows: std::ops::Range<usize>,
        cols: std::ops::Range<usize>,
    ) -> usize {
        let width = self.bounds.width;
        let x0 = cols.start.min(width);
        let x1 = cols.end.clamp(x0, width);
        self.bits
            .chunks_exact(width)
            .skip(rows.start)
            .take(rows.end.saturating_sub(rows.start))
            .map(|row| row[x0..x1].iter().filter(|&&b| b).count())
            .sum()
    }

    /// Same bits re-anchored at `origin`.
    pub(crate) fn relocated(&self, origin: Point) -> Mask {
        Mask {
            bounds: self.bounds.moved_to(origin),
            bits: self.bits.clone(),
        }
    }
}

/// Horizontal run of blob pixels on row `y`, covering columns `x_start..x_end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Run {
    pub y: usize,
    pub x_start: usize,
    pub x_end: usize,
}

impl Run {
    pub fn new(y: usize, x_start: usize, x_end: usize) -> Self {
        Self { y, x_start, x_end }
    }

    pub fn len(&self) -> usize {
        self.x_end.saturating_sub(self.x_start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Irregular pixel region described by horizontal runs in image coordinates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Blob {
    runs: Vec<Run>,
}

impl Blob {
    /// Creates a blob, dropping empty runs.
    pub fn new(runs: Vec<Run>) -> Self {
        let runs = runs.into_iter().filter(|r| !r.is_empty()).collect();
        Self { runs }
    }

    /// Collects the set pixels of `mask` into runs.
    pub fn from_mask(mask: &Mask) -> Self {
        let origin = mask.bounds().origin();
        let mut runs = Vec::new();
        for y in 0..mask.height() {
            let mut x = 0;
            while x < mask.width() {
                if !mask.get(x, y) {
                    x += 1;
                    continue;
                }
                let start = x;
                while x < mask.width() && mask.get(x, y) {
                    x += 1;
                }
                runs.push(Run::new(origin.y + y, origin.x + start, origin.x + x));
            }
        }
        Self { runs }
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Total number of pixels, counting overlapping runs once per run.
    pub fn area(&self) -> usize {
        self.runs.iter().map(Run::len).sum()
    }

    /// Smallest rectangle containing every run, `None` for an empty blob.
    pub fn bounding_rect(&self) -> Option<Rect> {
        let first = self.runs.first()?;
        let (mut x0, mut y0) = (first.x_start, first.y);
        let (mut x1, mut y1) = (first.x_end, first.y + 1);
        for run in &self.runs[1..] {
            x0 = x0.min(run.x_start);
            y0 = y0.min(run.y);
            x1 = x1.max(run.x_end);
            y1 = y1.max(run.y + 1);
        }
        Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
    }

    /// Materializes the part of the blob inside `bounds` as a dense mask.
    pub fn to_mask(&self, bounds: Rect) -> PatternMatchResult<Mask> {
        let mut bits = vec![false; bounds.area()];
        for run in &self.runs {
            if run.y < bounds.y || run.y > bounds.bottom() {
                continue;
            }
            let x0 = run.x_start.max(bounds.x);
            let x1 = run.x_end.min(bounds.x + bounds.width);
            if x0 >= x1 {
                continue;
            }
            let row = (run.y - bounds.y) * bounds.width;
            for bit in &mut bits[row + x0 - bounds.x..row + x1 - bounds.x] {
                *bit = true;
            }
        }
        Mask::new(bounds, bits)
    }

    /// Dense mask over the blob's own bounding rectangle.
    pub fn to_bounding_mask(&self) -> PatternMatchResult<Mask> {
        let bounds = self
            .bounding_rect()
            .ok_or(PatternMatchError::EmptyPixelSet { region: "blob" })?;
        self.to_mask(bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::{Blob, Mask, Run};
    use crate::geometry::{Point, Rect};

    #[test]
    fn blob_bounding_rect_spans_all_runs() {
        let blob = Blob::new(vec![Run::new(5, 3, 6), Run::new(7, 1, 4), Run::new(6, 2, 2)]);
        assert_eq!(blob.runs().len(), 2);
        assert_eq!(blob.bounding_rect(), Some(Rect::new(1, 5, 5, 3)));
        assert_eq!(blob.area(), 6);
    }

    #[test]
    fn blob_to_mask_clips_to_bounds() {
        let blob = Blob::new(vec![Run::new(1, 0, 5), Run::new(2, 2, 3)]);
        let mask = blob.to_mask(Rect::new(1, 1, 3, 2)).unwrap();
        assert_eq!(mask.bits(), &[true, true, true, false, true, false]);
        assert!(mask.contains(Point::new(2, 2)));
        assert!(!mask.contains(Point::new(1, 2)));
        assert_eq!(mask.count(), 4);
    }

    #[test]
    fn mask_round_trips_through_runs() {
        let mask = Mask::from_fn(Rect::new(4, 2, 5, 4), |x, y| (x + y) % 3 != 0).unwrap();
        let blob = Blob::from_mask(&mask);
        let back = blob.to_mask(mask.bounds()).unwrap();
        assert_eq!(back, mask);
    }

    #[test]
    fn count_in_restricts_to_sub_rectangle() {
        let mask = Mask::from_fn(Rect::with_size(4, 4), |x, _| x % 2 == 0).unwrap();
        assert_eq!(mask.count_in(0..2, 0..2), 2);
        assert_eq!(mask.count_in(0..4, 0..4), 8);
    }

    #[test]
    fn count_in_ignores_ranges_past_the_mask() {
        let mask = Mask::from_fn(Rect::with_size(4, 3), |x, _| x % 2 == 0).unwrap();
        assert_eq!(mask.count_in(1..10, 2..9), 2);
        assert_eq!(mask.count_in(5..9, 0..4), 0);
        assert_eq!(mask.count_in(0..3, 6..8), 0);
        #[allow(clippy::reversed_empty_ranges)]
        let reversed = mask.count_in(2..1, 3..1);
        assert_eq!(reversed, 0);
    }

    #[test]
    fn empty_blob_has_no_bounding_mask() {
        assert!(Blob::default().to_bounding_mask().is_err());
    }
}
