#![cfg(feature = "rayon")]

use patmatch::{
    Mask, MatcherConfig, OwnedRaster, PatternMatcher, PixelFormat, Point, QuadrantMatcher, Rect,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_raster(width: usize, height: usize, format: PixelFormat, seed: u64) -> OwnedRaster {
    let mut rng = StdRng::seed_from_u64(seed);
    OwnedRaster::from_fn(width, height, format, |_, _| {
        [rng.random(), rng.random(), rng.random(), 255]
    })
    .unwrap()
}

fn paste(dst: &mut OwnedRaster, src: &OwnedRaster, at: Point) {
    for y in 0..src.height() {
        for x in 0..src.width() {
            let value = src.view().pixel(Point::new(x, y)).unwrap().to_vec();
            dst.pixel_mut(Point::new(at.x + x, at.y + y))
                .unwrap()
                .copy_from_slice(&value);
        }
    }
}

fn parallel() -> MatcherConfig {
    MatcherConfig {
        parallel: true,
        ..MatcherConfig::default()
    }
}

#[test]
fn parallel_scan_matches_sequential() {
    let pattern = random_raster(9, 7, PixelFormat::Rgba, 1);
    let image = random_raster(64, 48, PixelFormat::Rgba, 2);

    let mut sequential = PatternMatcher::default();
    sequential.set_pattern(&pattern.view(), None).unwrap();
    let mut parallel = PatternMatcher::new(parallel());
    parallel.set_pattern(&pattern.view(), None).unwrap();

    let search = Rect::new(5, 3, 50, 40);
    assert_eq!(
        sequential.find(search, &image.view()).unwrap(),
        parallel.find(search, &image.view()).unwrap()
    );
}

#[test]
fn parallel_scan_keeps_row_major_tie_break() {
    let pattern = random_raster(6, 6, PixelFormat::Gray, 3);
    let mut image = random_raster(60, 60, PixelFormat::Gray, 4);
    paste(&mut image, &pattern, Point::new(40, 45));
    paste(&mut image, &pattern, Point::new(30, 12));
    paste(&mut image, &pattern, Point::new(2, 12));

    let mut parallel = PatternMatcher::new(parallel());
    parallel.set_pattern(&pattern.view(), None).unwrap();
    let record = parallel.find_all(&image.view()).unwrap();
    assert_eq!(record.location(), Point::new(2, 12));
}

#[test]
fn parallel_quadrant_scan_matches_sequential() {
    let image = random_raster(50, 40, PixelFormat::Gray, 5);
    let source_rect = Rect::new(12, 10, 10, 8);
    let mask = Mask::from_fn(source_rect, |x, y| (x * 3 + y) % 4 != 0).unwrap();
    let source = image.view().with_valid_rect(source_rect).unwrap();

    let mut sequential = QuadrantMatcher::default();
    sequential.set_pattern(&source, Some(&mask)).unwrap();
    let mut parallel = QuadrantMatcher::new(parallel());
    parallel.set_pattern(&source, Some(&mask)).unwrap();

    assert_eq!(
        sequential.find_all(&image.view()).unwrap(),
        parallel.find_all(&image.view()).unwrap()
    );
}
