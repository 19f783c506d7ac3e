//! Patmatch is an exhaustive 2D pattern matcher based on normalized
//! correlation.
//!
//! A [`Pattern`] is grabbed from the valid rectangle of a [`RasterImage`],
//! optionally restricted to an irregular [`Mask`] (for example materialized
//! from a run-length [`Blob`]). A [`PatternMatcher`] precomputes the
//! pattern's statistics once and then scans every candidate origin of a
//! search rectangle, returning the location with the highest Pearson
//! correlation. [`QuadrantMatcher`] additionally scores the four quadrants
//! of the pattern independently to support occlusion reasoning downstream.
//!
//! Gray and RGBA rasters are supported; RGBA scores average the red, green
//! and blue correlations. Optional features: `rayon` (row-parallel scan),
//! `tracing` (spans and events), `serde` (config and records), `image-io`
//! (interop with the `image` crate).

pub mod cache;
pub mod geometry;
pub mod image;
pub mod lowlevel;
pub mod mask;
pub mod pattern;
pub mod record;
pub mod search;
pub mod strategy;
mod trace;
pub mod util;

pub use crate::cache::PixelWindowCache;
pub use crate::geometry::{Point, Rect};
pub use crate::image::{ImageView, OwnedRaster, PixelFormat, RasterImage};
pub use crate::mask::{Blob, Mask, Run};
pub use crate::pattern::{Pattern, PatternOwnership};
pub use crate::record::{MatchRecord, Quadrant, QuadrantMatchRecord};
pub use crate::search::{Matcher, MatcherConfig, PatternMatcher, QuadrantMatcher};
pub use crate::strategy::{MatchingStrategy, NormalizedCorrelation, PartialQuadrantCorrelation};
pub use crate::util::{PatternMatchError, PatternMatchResult};

#[cfg(feature = "image-io")]
pub use crate::image::io;
