//! Running best-match tracking with a deterministic tie-break.

use crate::geometry::Point;
use crate::record::MatchRecord;
use std::cmp::Ordering;

/// Best candidate seen so far for one pixel group.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Best {
    location: Option<Point>,
    score: f32,
}

/// Ranks `a` against `b`: `Less` when `a` should win.
///
/// Higher score wins; equal scores prefer the lower row, then the lower
/// column, which is the first candidate in row-major scan order.
fn rank(a: (Point, f32), b: (Point, f32)) -> Ordering {
    let by_score = if a.1 > b.1 {
        Ordering::Less
    } else if b.1 > a.1 {
        Ordering::Greater
    } else {
        Ordering::Equal
    };
    by_score
        .then_with(|| a.0.y.cmp(&b.0.y))
        .then_with(|| a.0.x.cmp(&b.0.x))
}

impl Best {
    pub(crate) const EMPTY: Best = Best {
        location: None,
        score: f32::NEG_INFINITY,
    };

    /// Offers a candidate visited in row-major order. Only a strictly
    /// higher score replaces the current best.
    #[inline]
    pub(crate) fn offer(&mut self, location: Point, score: f32) {
        if self.location.is_none() || score > self.score {
            self.location = Some(location);
            self.score = score;
        }
    }

    /// Combines bests from disjoint parts of the candidate grid.
    pub(crate) fn merge(self, other: Best) -> Best {
        match (self.location, other.location) {
            (None, _) => other,
            (_, None) => self,
            (Some(a), Some(b)) => {
                if rank((a, self.score), (b, other.score)) == Ordering::Greater {
                    other
                } else {
                    self
                }
            }
        }
    }

    pub(crate) fn into_record(self, fallback: Point) -> MatchRecord {
        MatchRecord::new(self.location.unwrap_or(fallback), self.score)
    }
}
