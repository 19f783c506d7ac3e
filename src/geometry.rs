//! Integer pixel geometry: points and axis-aligned rectangles.

/// Integer pixel location, `x` is the column and `y` the row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in pixel coordinates.
///
/// `right()` and `bottom()` are inclusive. A rectangle with a zero width or
/// height is empty and covers no pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle anchored at the origin.
    pub const fn with_size(width: usize, height: usize) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Single-pixel rectangle at `p`.
    pub const fn at(p: Point) -> Self {
        Self::new(p.x, p.y, 1, 1)
    }

    pub fn left(&self) -> usize {
        self.x
    }

    pub fn top(&self) -> usize {
        self.y
    }

    /// Inclusive right column. Meaningless for empty rectangles.
    pub fn right(&self) -> usize {
        self.end_x().saturating_sub(1)
    }

    /// Inclusive bottom row. Meaningless for empty rectangles.
    pub fn bottom(&self) -> usize {
        self.end_y().saturating_sub(1)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(&self, p: Point) -> bool {
        !self.is_empty()
            && p.x >= self.x
            && p.y >= self.y
            && p.x - self.x < self.width
            && p.y - self.y < self.height
    }

    /// Exclusive column end, saturating at `usize::MAX`.
    fn end_x(&self) -> usize {
        self.x.saturating_add(self.width)
    }

    /// Exclusive row end, saturating at `usize::MAX`.
    fn end_y(&self) -> usize {
        self.y.saturating_add(self.height)
    }

    /// Returns `true` when `other` lies entirely inside `self`.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        !other.is_empty()
            && other.x >= self.x
            && other.y >= self.y
            && other.end_x() <= self.end_x()
            && other.end_y() <= self.end_y()
    }

    /// Overlap of two rectangles, `None` when they do not intersect.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.end_x().min(other.end_x());
        let y1 = self.end_y().min(other.end_y());
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
    }

    /// Same size, moved to `origin`.
    pub fn moved_to(&self, origin: Point) -> Rect {
        Rect::new(origin.x, origin.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::{Point, Rect};

    #[test]
    fn edges_are_inclusive() {
        let r = Rect::new(2, 3, 4, 5);
        assert_eq!(r.left(), 2);
        assert_eq!(r.top(), 3);
        assert_eq!(r.right(), 5);
        assert_eq!(r.bottom(), 7);
        assert!(r.contains(Point::new(5, 7)));
        assert!(!r.contains(Point::new(6, 7)));
    }

    #[test]
    fn intersection_clips_and_rejects_disjoint() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 8, 10, 10);
        assert_eq!(a.intersection(&b), Some(Rect::new(5, 8, 5, 2)));
        assert_eq!(a.intersection(&Rect::new(10, 0, 3, 3)), None);
        assert_eq!(a.intersection(&Rect::new(1, 1, 0, 4)), None);
    }

    #[test]
    fn rects_near_usize_max_do_not_overflow() {
        let a = Rect::new(0, 0, 20, 20);
        let far = Rect::new(usize::MAX - 2, 0, 10, 10);
        assert_eq!(a.intersection(&far), None);
        assert!(!a.contains_rect(&far));
        assert_eq!(
            far.intersection(&Rect::new(usize::MAX - 5, 2, 4, 3)),
            Some(Rect::new(usize::MAX - 2, 2, 1, 3))
        );
    }

    #[test]
    fn single_point_rect_covers_one_pixel() {
        let r = Rect::at(Point::new(4, 9));
        assert_eq!(r.area(), 1);
        assert_eq!((r.right(), r.bottom()), (4, 9));
    }
}
