//! Per-pattern correlation plan.
//!
//! A plan is built once when a pattern is installed. It records, for every
//! pixel group and correlated channel, the pattern mean and scale factor
//! `1 / sigma`, and writes the mean-shifted pattern samples `p - mean` into
//! the matcher's cache. Scoring a candidate window then gathers the window
//! samples, computes the same statistics over them and combines
//! `cov * s_p * s_w` per channel, averaged across channels.

use crate::cache::PixelWindowCache;
use crate::image::PixelWindow;
use crate::pattern::Pattern;
use crate::strategy::gather::{gather, MaskBits};
use crate::strategy::layout::{ChannelLayout, SampleLayout};
use crate::util::stats::{covariance, ChannelStats, Moments};
use crate::util::{PatternMatchError, PatternMatchResult};

/// Precomputed pattern statistics for normalized correlation.
#[derive(Clone, Debug)]
pub struct CorrelationPlan {
    layout: ChannelLayout,
    samples: SampleLayout,
    stats: Vec<ChannelStats>,
    shifted_offsets: Vec<usize>,
    shifted_len: usize,
    width: usize,
    height: usize,
    masked: bool,
    min_variance: f64,
}

impl CorrelationPlan {
    /// Builds the plan and fills the pattern side of `cache`.
    ///
    /// Fails with `DegenerateVariance` when any group has zero variance in
    /// any correlated channel, and with `EmptyPixelSet` when a group has no
    /// pixels at all.
    pub fn build(
        pattern: &Pattern<'_>,
        samples: SampleLayout,
        cache: &mut PixelWindowCache,
        min_variance: f64,
    ) -> PatternMatchResult<Self> {
        let layout = ChannelLayout::for_format(pattern.format())?;
        for group in samples.groups() {
            if group.is_empty() {
                return Err(PatternMatchError::EmptyPixelSet { region: group.name });
            }
        }

        let channels = layout.channels();
        let count = samples.count();
        let width = pattern.width();
        let height = pattern.height();
        let mut shifted_offsets = Vec::with_capacity(samples.groups().len());
        let mut shifted_len = 0;
        for group in samples.groups() {
            shifted_offsets.push(shifted_len);
            shifted_len += channels * group.len();
        }
        let mask_len = if pattern.mask().is_some() {
            width * height
        } else {
            0
        };
        cache.reserve(shifted_len, mask_len, channels * count);

        let (shifted, mask_bits, window) = cache.parts();
        if let Some(mask) = pattern.mask() {
            for (dst, &bit) in mask_bits.iter_mut().zip(mask.bits()) {
                *dst = u8::from(bit);
            }
        }
        let mask = pattern.mask().map(|_| MaskBits {
            bits: &mask_bits[..mask_len],
            width,
        });
        gather(
            &pattern.window(),
            layout,
            samples.regions(),
            mask,
            count,
            window,
        )
        .ok_or(PatternMatchError::InvalidDimensions { width, height })?;

        let mut stats = Vec::with_capacity(samples.groups().len() * channels);
        for (group, &offset) in samples.groups().iter().zip(&shifted_offsets) {
            let len = group.len();
            for (k, &channel) in layout.names.iter().enumerate() {
                let values = &window[k * count + group.range.start..k * count + group.range.end];
                let channel_stats = Moments::of(values).stats(min_variance).ok_or(
                    PatternMatchError::DegenerateVariance {
                        region: group.name,
                        channel,
                    },
                )?;
                let mean = channel_stats.mean as f32;
                let dst = &mut shifted[offset + k * len..offset + (k + 1) * len];
                for (d, &v) in dst.iter_mut().zip(values) {
                    *d = v - mean;
                }
                stats.push(channel_stats);
            }
        }

        Ok(Self {
            layout,
            samples,
            stats,
            shifted_offsets,
            shifted_len,
            width,
            height,
            masked: mask_len > 0,
            min_variance,
        })
    }

    /// Pattern width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Pattern height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of scores produced per candidate window.
    pub fn group_count(&self) -> usize {
        self.samples.groups().len()
    }

    /// Participating pixel count of every group, whole pattern first.
    pub fn group_counts(&self) -> Vec<usize> {
        self.samples.groups().iter().map(|g| g.len()).collect()
    }

    /// Pattern statistics of one group, one entry per correlated channel.
    pub fn pattern_stats(&self, group: usize) -> Option<&[ChannelStats]> {
        let channels = self.layout.channels();
        self.stats.get(group * channels..(group + 1) * channels)
    }

    pub fn samples(&self) -> &SampleLayout {
        &self.samples
    }

    /// Elements of the candidate window buffer a scorer needs.
    pub(crate) fn window_len(&self) -> usize {
        self.layout.channels() * self.samples.count()
    }

    pub(crate) fn mask_bits<'a>(&self, cache_mask: &'a [u8]) -> Option<MaskBits<'a>> {
        self.masked.then(|| MaskBits {
            bits: &cache_mask[..self.width * self.height],
            width: self.width,
        })
    }

    pub(crate) fn shifted<'a>(&self, cache_shifted: &'a [f32]) -> &'a [f32] {
        &cache_shifted[..self.shifted_len]
    }

    /// Scores one candidate window, writing one score per group into `out`.
    ///
    /// Degenerate windows (zero variance in any channel) and windows that
    /// leave the raster score `f32::NEG_INFINITY`.
    pub(crate) fn score(
        &self,
        window: &PixelWindow<'_>,
        mask: Option<MaskBits<'_>>,
        shifted: &[f32],
        scratch: &mut [f32],
        out: &mut [f32],
    ) {
        let count = self.samples.count();
        if gather(
            window,
            self.layout,
            self.samples.regions(),
            mask,
            count,
            scratch,
        )
        .is_none()
        {
            out.fill(f32::NEG_INFINITY);
            return;
        }

        let channels = self.layout.channels();
        for (g, group) in self.samples.groups().iter().enumerate() {
            let len = group.len();
            let offset = self.shifted_offsets[g];
            let mut total = 0.0f64;
            let mut degenerate = false;
            for k in 0..channels {
                let values = &scratch[k * count + group.range.start..k * count + group.range.end];
                let Some(window_stats) = Moments::of(values).stats(self.min_variance) else {
                    degenerate = true;
                    break;
                };
                let pattern_shifted = &shifted[offset + k * len..offset + (k + 1) * len];
                let cov = covariance(pattern_shifted, values, window_stats.mean);
                total += cov * self.stats[g * channels + k].scale * window_stats.scale;
            }
            let score = (total / channels as f64) as f32;
            out[g] = if degenerate || !score.is_finite() {
                f32::NEG_INFINITY
            } else {
                score
            };
        }
    }
}
