//! Exhaustive scan over candidate origins.

use crate::geometry::{Point, Rect};
use crate::image::RasterImage;
use crate::search::best::Best;
use crate::strategy::CorrelationPlan;
use crate::strategy::MaskBits;
use crate::util::{PatternMatchError, PatternMatchResult};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Clips `search` to the origins at which a `width x height` window fits
/// inside `valid`.
///
/// Search rectangles reaching past the usable origins are clipped silently;
/// an empty result is an error.
pub(crate) fn effective_search_rect(
    valid: Rect,
    width: usize,
    height: usize,
    search: Rect,
) -> PatternMatchResult<Rect> {
    if valid.width < width || valid.height < height {
        return Err(PatternMatchError::EmptySearchRegion { search });
    }
    let usable = Rect::new(
        valid.x,
        valid.y,
        valid.width - width + 1,
        valid.height - height + 1,
    );
    usable
        .intersection(&search)
        .ok_or(PatternMatchError::EmptySearchRegion { search })
}

/// Row-major scan of `area`, one `Best` per pixel group.
pub(crate) fn scan_sequential(
    image: &RasterImage<'_>,
    plan: &CorrelationPlan,
    mask: Option<MaskBits<'_>>,
    shifted: &[f32],
    scratch: &mut [f32],
    area: Rect,
) -> Vec<Best> {
    let mut bests = vec![Best::EMPTY; plan.group_count()];
    let mut scores = vec![f32::NEG_INFINITY; plan.group_count()];
    for y in area.top()..=area.bottom() {
        scan_row(
            image,
            plan,
            mask,
            shifted,
            scratch,
            &mut scores,
            area,
            y,
            &mut bests,
        );
    }
    bests
}

/// Row-parallel scan; each worker owns its window scratch buffer.
///
/// Partial results are merged with the same ordering as the sequential
/// scan, so both return identical matches.
#[cfg(feature = "rayon")]
pub(crate) fn scan_parallel(
    image: &RasterImage<'_>,
    plan: &CorrelationPlan,
    mask: Option<MaskBits<'_>>,
    shifted: &[f32],
    area: Rect,
) -> Vec<Best> {
    let groups = plan.group_count();
    let image = *image;
    (area.top()..=area.bottom())
        .into_par_iter()
        .map_init(
            || {
                (
                    vec![0.0f32; plan.window_len()],
                    vec![f32::NEG_INFINITY; groups],
                )
            },
            |(scratch, scores), y| {
                let mut row_bests = vec![Best::EMPTY; groups];
                scan_row(
                    &image,
                    plan,
                    mask,
                    shifted,
                    scratch,
                    scores,
                    area,
                    y,
                    &mut row_bests,
                );
                row_bests
            },
        )
        .reduce(
            || vec![Best::EMPTY; groups],
            |a, b| a.into_iter().zip(b).map(|(a, b)| a.merge(b)).collect(),
        )
}

#[allow(clippy::too_many_arguments)]
#[inline]
fn scan_row(
    image: &RasterImage<'_>,
    plan: &CorrelationPlan,
    mask: Option<MaskBits<'_>>,
    shifted: &[f32],
    scratch: &mut [f32],
    scores: &mut [f32],
    area: Rect,
    y: usize,
    bests: &mut [Best],
) {
    for x in area.left()..=area.right() {
        let location = Point::new(x, y);
        plan.score(&image.window(location), mask, shifted, scratch, scores);
        for (best, &score) in bests.iter_mut().zip(scores.iter()) {
            best.offer(location, score);
        }
    }
}
