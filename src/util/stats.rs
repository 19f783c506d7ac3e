//! Moment accumulation for correlation statistics.
//!
//! Sums run in `f64` while sample buffers stay `f32`; for 8-bit input the
//! sums are exact up to very large pixel counts.

/// First and second raw moments of a sample set.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Moments {
    sum: f64,
    sum_sq: f64,
    count: usize,
}

impl Moments {
    /// Accumulates the moments of `values`.
    pub(crate) fn of(values: &[f32]) -> Self {
        let mut sum = 0.0f64;
        let mut sum_sq = 0.0f64;
        for &value in values {
            let v = value as f64;
            sum += v;
            sum_sq += v * v;
        }
        Self {
            sum,
            sum_sq,
            count: values.len(),
        }
    }

    pub(crate) fn mean(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.sum / self.count as f64
    }

    /// Population variance `E[x^2] - E[x]^2`, clamped at zero.
    pub(crate) fn variance(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        let mean = self.mean();
        (self.sum_sq / self.count as f64 - mean * mean).max(0.0)
    }

    /// Returns mean and scale factor, or `None` when the variance does not
    /// exceed `min_variance`.
    pub(crate) fn stats(&self, min_variance: f64) -> Option<ChannelStats> {
        if self.count == 0 {
            return None;
        }
        let variance = self.variance();
        if variance <= min_variance {
            return None;
        }
        Some(ChannelStats {
            mean: self.mean(),
            scale: 1.0 / variance.sqrt(),
        })
    }
}

/// Mean and scale factor (`1 / sigma`) of one channel over one pixel set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChannelStats {
    /// Sample mean.
    pub mean: f64,
    /// Inverse population standard deviation.
    pub scale: f64,
}

/// Computes `(1/N) * sum(shifted[i] * (window[i] - window_mean))`.
pub(crate) fn covariance(shifted: &[f32], window: &[f32], window_mean: f64) -> f64 {
    debug_assert_eq!(shifted.len(), window.len());
    if window.is_empty() {
        return 0.0;
    }
    let mut acc = 0.0f64;
    for (&p, &w) in shifted.iter().zip(window.iter()) {
        acc += p as f64 * (w as f64 - window_mean);
    }
    acc / window.len() as f64
}
