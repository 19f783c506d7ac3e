//! Sample gathering: copies the participating pixels of a window into a
//! planar `f32` buffer.
//!
//! The buffer holds one block of `count` samples per correlated channel;
//! pixel `i` of channel `k` lands at `k * count + i`. Gather order follows
//! the regions of a `SampleLayout`.

use crate::image::{PixelFormat, PixelWindow};
use crate::strategy::layout::{ChannelLayout, SampleRegion};

/// Byte mask of the pattern, row-major with the pattern's width.
#[derive(Clone, Copy)]
pub(crate) struct MaskBits<'a> {
    pub(crate) bits: &'a [u8],
    pub(crate) width: usize,
}

/// Gathers `window` into `out`. Returns `None` if the window leaves the
/// underlying raster.
pub(crate) fn gather(
    window: &PixelWindow<'_>,
    layout: ChannelLayout,
    regions: &[SampleRegion],
    mask: Option<MaskBits<'_>>,
    count: usize,
    out: &mut [f32],
) -> Option<()> {
    debug_assert_eq!(window.bytes_per_pixel(), layout.format.bytes_per_pixel());
    debug_assert!(out.len() >= count * layout.channels());
    match (layout.format, mask) {
        (PixelFormat::Gray, None) => gather_dense::<1, 1>(window, regions, count, out),
        (PixelFormat::Gray, Some(mask)) => gather_masked::<1, 1>(window, regions, mask, count, out),
        (PixelFormat::Rgba, None) => gather_dense::<4, 3>(window, regions, count, out),
        (PixelFormat::Rgba, Some(mask)) => gather_masked::<4, 3>(window, regions, mask, count, out),
        (PixelFormat::GrayAlpha | PixelFormat::Rgb, _) => None,
    }
}

fn gather_dense<const BPP: usize, const CH: usize>(
    window: &PixelWindow<'_>,
    regions: &[SampleRegion],
    count: usize,
    out: &mut [f32],
) -> Option<()> {
    for region in regions {
        let mut idx = region.range.start;
        let ncols = region.cols.len();
        for ty in region.rows.clone() {
            let span = window.span(ty, region.cols.start, ncols)?;
            for px in span.chunks_exact(BPP) {
                for k in 0..CH {
                    out[k * count + idx] = px[k] as f32;
                }
                idx += 1;
            }
        }
        debug_assert_eq!(idx, region.range.end);
    }
    Some(())
}

fn gather_masked<const BPP: usize, const CH: usize>(
    window: &PixelWindow<'_>,
    regions: &[SampleRegion],
    mask: MaskBits<'_>,
    count: usize,
    out: &mut [f32],
) -> Option<()> {
    for region in regions {
        let mut idx = region.range.start;
        let ncols = region.cols.len();
        for ty in region.rows.clone() {
            let span = window.span(ty, region.cols.start, ncols)?;
            let base = ty * mask.width;
            let bits = mask.bits.get(base + region.cols.start..base + region.cols.end)?;
            for (px, &bit) in span.chunks_exact(BPP).zip(bits) {
                if bit == 0 {
                    continue;
                }
                for k in 0..CH {
                    out[k * count + idx] = px[k] as f32;
                }
                idx += 1;
            }
        }
        debug_assert_eq!(idx, region.range.end);
    }
    Some(())
}

#[cfg(test)]
mod tests {
    use super::{gather, MaskBits};
    use crate::geometry::{Point, Rect};
    use crate::image::{ImageView, PixelFormat, PixelWindow};
    use crate::mask::Mask;
    use crate::strategy::layout::{ChannelLayout, SampleLayout};

    #[test]
    fn rgba_samples_are_planar_and_skip_alpha() {
        let data: Vec<u8> = (0u8..16).collect();
        let view = ImageView::from_slice(&data, 8, 2).unwrap();
        let window = PixelWindow::new(view, 4, Point::new(0, 0));
        let layout = ChannelLayout::for_format(PixelFormat::Rgba).unwrap();
        let samples = SampleLayout::whole(2, 2, None);
        let mut out = vec![0.0f32; 12];
        gather(&window, layout, samples.regions(), None, 4, &mut out).unwrap();
        assert_eq!(
            out,
            vec![0.0, 4.0, 8.0, 12.0, 1.0, 5.0, 9.0, 13.0, 2.0, 6.0, 10.0, 14.0]
        );
    }

    #[test]
    fn masked_gray_gather_keeps_set_pixels_only() {
        let data: Vec<u8> = (10u8..26).collect();
        let view = ImageView::from_slice(&data, 4, 4).unwrap();
        let window = PixelWindow::new(view, 1, Point::new(1, 1));
        let layout = ChannelLayout::for_format(PixelFormat::Gray).unwrap();
        let bits = [1u8, 0, 0, 1];
        let shape = Mask::from_fn(Rect::with_size(2, 2), |x, y| x == y).unwrap();
        let samples = SampleLayout::whole(2, 2, Some(&shape));
        let mut out = vec![0.0f32; 2];
        let mask = MaskBits { bits: &bits, width: 2 };
        gather(&window, layout, samples.regions(), Some(mask), 2, &mut out).unwrap();
        assert_eq!(out, vec![15.0, 20.0]);
    }

    #[test]
    fn window_outside_raster_is_rejected() {
        let data = [0u8; 9];
        let view = ImageView::from_slice(&data, 3, 3).unwrap();
        let window = PixelWindow::new(view, 1, Point::new(2, 2));
        let layout = ChannelLayout::for_format(PixelFormat::Gray).unwrap();
        let samples = SampleLayout::whole(2, 2, None);
        let mut out = vec![0.0f32; 4];
        assert!(gather(&window, layout, samples.regions(), None, 4, &mut out).is_none());
    }
}
