//! Match results.

use crate::geometry::Point;
use std::ops::{Index, IndexMut};

/// Best match of one pixel set: window origin and score.
///
/// For correlation strategies the score lies in `[-1, 1]`; a window whose
/// variance vanished scores `f32::NEG_INFINITY`. Scores from different
/// strategies or pixel formats are not comparable.
///
/// With the `serde` feature a non-finite score is written as `null` and
/// read back as `f32::NEG_INFINITY`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchRecord {
    location: Point,
    #[cfg_attr(feature = "serde", serde(with = "score_serde"))]
    score: f32,
}

#[cfg(feature = "serde")]
mod score_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub(super) fn serialize<S>(score: &f32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        score.is_finite().then_some(*score).serialize(serializer)
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<f32, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<f32>::deserialize(deserializer)?.unwrap_or(f32::NEG_INFINITY))
    }
}

impl Default for MatchRecord {
    fn default() -> Self {
        Self {
            location: Point::default(),
            score: f32::NEG_INFINITY,
        }
    }
}

impl MatchRecord {
    pub fn new(location: Point, score: f32) -> Self {
        Self { location, score }
    }

    /// Top-left corner of the matched window in image coordinates.
    pub fn location(&self) -> Point {
        self.location
    }

    pub fn set_location(&mut self, location: Point) {
        self.location = location;
    }

    pub fn score(&self) -> f32 {
        self.score
    }

    pub fn set_score(&mut self, score: f32) {
        self.score = score;
    }
}

/// Quadrant of a pattern's bounding rectangle.
///
/// Rows above the middle row (`row < height / 2`) are upper, columns left of
/// the middle column (`col < width / 2`) are left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Quadrant {
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

impl Quadrant {
    /// All quadrants in storage order.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::UpperLeft,
        Quadrant::UpperRight,
        Quadrant::LowerLeft,
        Quadrant::LowerRight,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Quadrant::UpperLeft => "upper-left",
            Quadrant::UpperRight => "upper-right",
            Quadrant::LowerLeft => "lower-left",
            Quadrant::LowerRight => "lower-right",
        }
    }
}

/// Whole-pattern match plus one independent best match per quadrant.
///
/// Each entry tracks its own best location; comparing them to detect
/// occlusion is left to the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuadrantMatchRecord {
    whole: MatchRecord,
    quadrants: [MatchRecord; 4],
}

impl QuadrantMatchRecord {
    pub fn new(whole: MatchRecord, quadrants: [MatchRecord; 4]) -> Self {
        Self { whole, quadrants }
    }

    /// Best match of the full pattern.
    pub fn whole(&self) -> MatchRecord {
        self.whole
    }

    pub fn set_whole(&mut self, record: MatchRecord) {
        self.whole = record;
    }

    pub fn quadrant(&self, q: Quadrant) -> MatchRecord {
        self.quadrants[q.index()]
    }

    pub fn set_quadrant(&mut self, q: Quadrant, record: MatchRecord) {
        self.quadrants[q.index()] = record;
    }

    pub fn location(&self, q: Quadrant) -> Point {
        self.quadrants[q.index()].location()
    }

    pub fn score(&self, q: Quadrant) -> f32 {
        self.quadrants[q.index()].score()
    }

    pub fn quadrants(&self) -> &[MatchRecord; 4] {
        &self.quadrants
    }
}

impl Index<Quadrant> for QuadrantMatchRecord {
    type Output = MatchRecord;

    fn index(&self, q: Quadrant) -> &MatchRecord {
        &self.quadrants[q.index()]
    }
}

impl IndexMut<Quadrant> for QuadrantMatchRecord {
    fn index_mut(&mut self, q: Quadrant) -> &mut MatchRecord {
        &mut self.quadrants[q.index()]
    }
}
