//! Channel and pixel-set layouts shared by the correlation strategies.

use crate::image::PixelFormat;
use crate::mask::Mask;
use crate::record::Quadrant;
use crate::util::{PatternMatchError, PatternMatchResult};
use std::ops::Range;

/// Channels that take part in correlation for a pixel format.
///
/// Correlated channels are always the leading samples of a pixel, so a
/// layout is fully described by the format and a channel count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ChannelLayout {
    pub(crate) format: PixelFormat,
    pub(crate) names: &'static [&'static str],
}

impl ChannelLayout {
    pub(crate) fn for_format(format: PixelFormat) -> PatternMatchResult<Self> {
        match format {
            PixelFormat::Gray => Ok(Self {
                format,
                names: &["gray"],
            }),
            PixelFormat::Rgba => Ok(Self {
                format,
                names: &["red", "green", "blue"],
            }),
            PixelFormat::GrayAlpha | PixelFormat::Rgb => {
                Err(PatternMatchError::UnsupportedFormat { format })
            }
        }
    }

    pub(crate) fn channels(&self) -> usize {
        self.names.len()
    }
}

/// Rectangular part of the pattern gathered as one contiguous index range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SampleRegion {
    /// Pattern rows covered.
    pub rows: Range<usize>,
    /// Pattern columns covered.
    pub cols: Range<usize>,
    /// Positions of the region's participating pixels in gather order.
    pub range: Range<usize>,
}

/// Named pixel set whose statistics are computed independently.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGroup {
    pub name: &'static str,
    pub range: Range<usize>,
}

impl PixelGroup {
    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// Gather order of the participating pixels and the groups scored over them.
///
/// Regions are gathered back to back so that every group is a contiguous
/// index range of the sample buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SampleLayout {
    regions: Vec<SampleRegion>,
    groups: Vec<PixelGroup>,
    count: usize,
}

impl SampleLayout {
    /// One group over the whole pattern rectangle (or its mask).
    pub fn whole(width: usize, height: usize, mask: Option<&Mask>) -> Self {
        let count = region_count(0..height, 0..width, mask);
        Self {
            regions: vec![SampleRegion {
                rows: 0..height,
                cols: 0..width,
                range: 0..count,
            }],
            groups: vec![PixelGroup {
                name: "whole",
                range: 0..count,
            }],
            count,
        }
    }

    /// Whole pattern plus the four quadrants split at `height / 2` and
    /// `width / 2`, in `Quadrant::ALL` order.
    pub fn quadrants(width: usize, height: usize, mask: Option<&Mask>) -> Self {
        let mid_row = height / 2;
        let mid_col = width / 2;
        let mut regions = Vec::with_capacity(4);
        let mut groups = Vec::with_capacity(5);
        let mut next = 0;
        for q in Quadrant::ALL {
            let rows = match q {
                Quadrant::UpperLeft | Quadrant::UpperRight => 0..mid_row,
                Quadrant::LowerLeft | Quadrant::LowerRight => mid_row..height,
            };
            let cols = match q {
                Quadrant::UpperLeft | Quadrant::LowerLeft => 0..mid_col,
                Quadrant::UpperRight | Quadrant::LowerRight => mid_col..width,
            };
            let count = region_count(rows.clone(), cols.clone(), mask);
            let range = next..next + count;
            next += count;
            groups.push(PixelGroup {
                name: q.name(),
                range: range.clone(),
            });
            regions.push(SampleRegion { rows, cols, range });
        }
        groups.insert(
            0,
            PixelGroup {
                name: "whole",
                range: 0..next,
            },
        );
        Self {
            regions,
            groups,
            count: next,
        }
    }

    pub fn regions(&self) -> &[SampleRegion] {
        &self.regions
    }

    pub fn groups(&self) -> &[PixelGroup] {
        &self.groups
    }

    /// Total number of participating pixels.
    pub fn count(&self) -> usize {
        self.count
    }
}

fn region_count(rows: Range<usize>, cols: Range<usize>, mask: Option<&Mask>) -> usize {
    match mask {
        Some(mask) => mask.count_in(rows, cols),
        None => rows.len() * cols.len(),
    }
}
