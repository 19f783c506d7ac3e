//! Reusable scratch buffers for pattern statistics and candidate windows.

use crate::trace::trace_event;

/// Scratch buffers sized to the largest pattern seen so far.
///
/// Holds the mean-shifted pattern samples, the byte mask and one candidate
/// window buffer. Buffers grow when a larger pattern is installed and are
/// never shrunk, so repeated `set_pattern` calls reuse the allocation.
#[derive(Clone, Debug, Default)]
pub struct PixelWindowCache {
    shifted: Vec<f32>,
    mask: Vec<u8>,
    window: Vec<f32>,
    grow_events: usize,
}

impl PixelWindowCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensures capacity for the given element counts. Returns `true` when
    /// any buffer had to grow.
    pub(crate) fn reserve(&mut self, shifted_len: usize, mask_len: usize, window_len: usize) -> bool {
        let mut grew = false;
        if self.shifted.len() < shifted_len {
            self.shifted.resize(shifted_len, 0.0);
            grew = true;
        }
        if self.mask.len() < mask_len {
            self.mask.resize(mask_len, 0);
            grew = true;
        }
        if self.window.len() < window_len {
            self.window.resize(window_len, 0.0);
            grew = true;
        }
        if grew {
            self.grow_events += 1;
            trace_event!(
                "cache_grown",
                shifted = self.shifted.len(),
                mask = self.mask.len(),
                window = self.window.len()
            );
        }
        grew
    }

    /// Split borrow: shared pattern buffers and the mutable window buffer.
    pub(crate) fn parts(&mut self) -> (&mut [f32], &mut [u8], &mut [f32]) {
        (&mut self.shifted, &mut self.mask, &mut self.window)
    }

    /// Element capacity of the candidate window buffer.
    pub fn window_capacity(&self) -> usize {
        self.window.len()
    }

    /// Element capacity of the mean-shifted pattern buffer.
    pub fn shifted_capacity(&self) -> usize {
        self.shifted.len()
    }

    /// Number of times any buffer was reallocated.
    pub fn grow_events(&self) -> usize {
        self.grow_events
    }
}
