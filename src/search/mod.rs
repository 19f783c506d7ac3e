//! Pattern matcher: validation, search-region clipping and the exhaustive
//! scan driven by a scoring strategy.

mod best;
pub(crate) mod scan;

use crate::cache::PixelWindowCache;
use crate::geometry::{Point, Rect};
use crate::image::RasterImage;
use crate::mask::Mask;
use crate::pattern::{Pattern, PatternOwnership};
use crate::record::MatchRecord;
use crate::search::scan::{effective_search_rect, scan_sequential};
use crate::strategy::{
    CorrelationPlan, MatchingStrategy, NormalizedCorrelation, PartialQuadrantCorrelation,
};
use crate::trace::{trace_event, trace_span};
use crate::util::{PatternMatchError, PatternMatchResult};
use std::marker::PhantomData;

/// Matcher configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MatcherConfig {
    /// Whether `set_pattern` copies the pattern pixels or borrows them.
    pub ownership: PatternOwnership,
    /// Variance at or below which a pixel set counts as flat. Applies to
    /// the pattern (error) and to candidate windows (worst score).
    pub min_window_variance: f64,
    /// Partition the scan across rayon workers (requires the `rayon`
    /// feature; ignored otherwise).
    pub parallel: bool,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            ownership: PatternOwnership::Owned,
            min_window_variance: 1e-8,
            parallel: false,
        }
    }
}

/// Exhaustive pattern matcher parameterized by a scoring strategy.
///
/// One matcher holds one pattern and its precomputed statistics. Searches
/// reuse the matcher's scratch buffers, so a matcher serves one search at a
/// time; use one matcher per thread for concurrent searches.
pub struct Matcher<'a, S: MatchingStrategy> {
    config: MatcherConfig,
    pattern: Option<Pattern<'a>>,
    plan: Option<CorrelationPlan>,
    cache: PixelWindowCache,
    _strategy: PhantomData<S>,
}

/// Whole-pattern normalized correlation matcher.
pub type PatternMatcher<'a> = Matcher<'a, NormalizedCorrelation>;

/// Whole-plus-quadrants matcher for occlusion-aware matching.
pub type QuadrantMatcher<'a> = Matcher<'a, PartialQuadrantCorrelation>;

impl<'a, S: MatchingStrategy> Default for Matcher<'a, S> {
    fn default() -> Self {
        Self::new(MatcherConfig::default())
    }
}

impl<'a, S: MatchingStrategy> Matcher<'a, S> {
    /// Creates a matcher without a pattern.
    pub fn new(config: MatcherConfig) -> Self {
        Self {
            config,
            pattern: None,
            plan: None,
            cache: PixelWindowCache::new(),
            _strategy: PhantomData,
        }
    }

    /// Replaces the configuration. An installed pattern keeps the
    /// statistics it was built with until it is set again.
    pub fn with_config(mut self, config: MatcherConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Grabs the valid rectangle of `image` as the new pattern, optionally
    /// restricted to `mask`.
    ///
    /// The matcher borrows `image` for `'a` even when the configured
    /// ownership copies the pixels; use [`Matcher::set_owned_pattern`] to
    /// release the source raster.
    pub fn set_pattern(
        &mut self,
        image: &RasterImage<'a>,
        mask: Option<&Mask>,
    ) -> PatternMatchResult<()> {
        self.clear_pattern();
        let pattern = Pattern::new(image, mask, self.config.ownership)?;
        self.set(pattern)
    }

    /// Copies the valid rectangle of `image` into a new pattern regardless
    /// of the configured ownership, so `image` may be dropped afterwards.
    pub fn set_owned_pattern(
        &mut self,
        image: &RasterImage<'_>,
        mask: Option<&Mask>,
    ) -> PatternMatchResult<()> {
        self.clear_pattern();
        let pattern = Pattern::owned(image, mask)?;
        self.set(pattern)
    }

    /// Installs a prebuilt pattern and precomputes its statistics.
    ///
    /// On failure the matcher is left without a pattern.
    pub fn set(&mut self, pattern: Pattern<'a>) -> PatternMatchResult<()> {
        self.clear_pattern();
        let _span = trace_span!(
            "set_pattern",
            width = pattern.width(),
            height = pattern.height()
        )
        .entered();

        let samples = S::sample_layout(&pattern);
        let plan = CorrelationPlan::build(
            &pattern,
            samples,
            &mut self.cache,
            self.config.min_window_variance,
        )?;
        trace_event!(
            "pattern_ready",
            width = pattern.width(),
            height = pattern.height(),
            pixels = pattern.participating_count(),
            groups = plan.group_count()
        );
        self.pattern = Some(pattern);
        self.plan = Some(plan);
        Ok(())
    }

    /// Drops the current pattern; cache buffers are kept.
    pub fn clear_pattern(&mut self) {
        self.pattern = None;
        self.plan = None;
    }

    pub fn pattern(&self) -> Option<&Pattern<'a>> {
        self.pattern.as_ref()
    }

    pub fn plan(&self) -> Option<&CorrelationPlan> {
        self.plan.as_ref()
    }

    pub fn cache(&self) -> &PixelWindowCache {
        &self.cache
    }

    /// Finds the best match of the pattern among the candidate origins in
    /// `search`.
    ///
    /// `search` is clipped to the origins where the pattern fits inside the
    /// image's valid rectangle. Ties keep the first origin in row-major
    /// order.
    pub fn find(&mut self, search: Rect, image: &RasterImage<'_>) -> PatternMatchResult<S::Record> {
        let (Some(pattern), Some(plan)) = (self.pattern.as_ref(), self.plan.as_ref()) else {
            return Err(PatternMatchError::MissingParameter { what: "pattern" });
        };
        if image.format() != pattern.format() {
            return Err(PatternMatchError::FormatMismatch {
                pattern: pattern.format(),
                image: image.format(),
            });
        }
        let area = effective_search_rect(image.valid_rect(), plan.width(), plan.height(), search)?;

        let _span = trace_span!(
            "pattern_match",
            x = area.x,
            y = area.y,
            width = area.width,
            height = area.height
        )
        .entered();

        let (shifted, mask_bits, window) = self.cache.parts();
        let shifted = plan.shifted(shifted);
        let mask = plan.mask_bits(mask_bits);
        let scratch = &mut window[..plan.window_len()];

        #[cfg(feature = "rayon")]
        let bests = if self.config.parallel {
            scan::scan_parallel(image, plan, mask, shifted, area)
        } else {
            scan_sequential(image, plan, mask, shifted, scratch, area)
        };
        #[cfg(not(feature = "rayon"))]
        let bests = scan_sequential(image, plan, mask, shifted, scratch, area);

        let records: Vec<MatchRecord> = bests
            .into_iter()
            .map(|best| best.into_record(area.origin()))
            .collect();
        if let Some(best) = records.first() {
            trace_event!(
                "best_match",
                x = best.location().x,
                y = best.location().y,
                score = best.score()
            );
        }
        Ok(S::record(&records))
    }

    /// Searches every origin of the image's valid rectangle.
    pub fn find_all(&mut self, image: &RasterImage<'_>) -> PatternMatchResult<S::Record> {
        self.find(image.valid_rect(), image)
    }

    /// Scores the single candidate window at `location`.
    pub fn score_at(
        &mut self,
        image: &RasterImage<'_>,
        location: Point,
    ) -> PatternMatchResult<S::Record> {
        self.find(Rect::at(location), image)
    }
}
