//! Scoring strategies.
//!
//! Both strategies share the normalized-correlation machinery of
//! [`CorrelationPlan`]; they differ in how the pattern is split into pixel
//! groups and in the record they report. Pixel format and mask presence are
//! resolved inside the plan's gather step, not through the strategy type.

mod gather;
mod layout;
mod plan;

pub use crate::util::stats::ChannelStats;
pub use layout::{PixelGroup, SampleLayout, SampleRegion};
pub use plan::CorrelationPlan;

pub(crate) use gather::MaskBits;

use crate::pattern::Pattern;
use crate::record::{MatchRecord, QuadrantMatchRecord};

/// Strategy trait binding a pixel-set split to a result record.
pub trait MatchingStrategy {
    /// Result reported for a search.
    type Record: Clone + std::fmt::Debug;

    /// Splits the pattern into the pixel groups scored at each candidate.
    fn sample_layout(pattern: &Pattern<'_>) -> SampleLayout;

    /// Builds the record from the best match of every group, in group order.
    fn record(bests: &[MatchRecord]) -> Self::Record;
}

/// Pearson correlation over the whole pattern (or its mask).
///
/// RGBA scores average the red, green and blue correlations.
#[derive(Clone, Copy, Debug, Default)]
pub struct NormalizedCorrelation;

impl MatchingStrategy for NormalizedCorrelation {
    type Record = MatchRecord;

    fn sample_layout(pattern: &Pattern<'_>) -> SampleLayout {
        SampleLayout::whole(pattern.width(), pattern.height(), pattern.mask())
    }

    fn record(bests: &[MatchRecord]) -> MatchRecord {
        bests.first().copied().unwrap_or_default()
    }
}

/// Correlation over the whole pattern and each of its four quadrants.
///
/// Every group keeps its own best location, so a partially occluded
/// pattern still reports strong quadrant matches.
#[derive(Clone, Copy, Debug, Default)]
pub struct PartialQuadrantCorrelation;

impl MatchingStrategy for PartialQuadrantCorrelation {
    type Record = QuadrantMatchRecord;

    fn sample_layout(pattern: &Pattern<'_>) -> SampleLayout {
        SampleLayout::quadrants(pattern.width(), pattern.height(), pattern.mask())
    }

    fn record(bests: &[MatchRecord]) -> QuadrantMatchRecord {
        let get = |i: usize| bests.get(i).copied().unwrap_or_default();
        QuadrantMatchRecord::new(get(0), [get(1), get(2), get(3), get(4)])
    }
}
