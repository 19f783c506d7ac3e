use patmatch::{
    Blob, ImageView, Mask, OwnedRaster, PatternMatchError, PixelFormat, Point, RasterImage, Rect,
    Run,
};

#[test]
fn image_view_rejects_invalid_dimensions() {
    let data = [0u8; 4];

    let err = ImageView::from_slice(&data, 0, 1).err().unwrap();
    assert_eq!(
        err,
        PatternMatchError::InvalidDimensions {
            width: 0,
            height: 1,
        }
    );

    let err = ImageView::new(&data, 4, 1, 3).err().unwrap();
    assert_eq!(
        err,
        PatternMatchError::InvalidStride {
            width: 4,
            stride: 3,
        }
    );

    let err = ImageView::new(&data[..3], 2, 2, 2).err().unwrap();
    assert_eq!(err, PatternMatchError::BufferTooSmall { needed: 4, got: 3 });
}

#[test]
fn image_view_roi_matches_expected_values() {
    let data: Vec<u8> = (0u8..16).collect();
    let view = ImageView::from_slice(&data, 4, 4).unwrap();

    let roi = view.roi(1, 1, 2, 2).unwrap();
    assert_eq!(roi.stride(), 4);
    assert_eq!(roi.row(0).unwrap(), &[5u8, 6u8]);
    assert_eq!(roi.row(1).unwrap(), &[9u8, 10u8]);
    assert_eq!(roi.get(0, 0).copied(), Some(5u8));
    assert!(roi.get(2, 0).is_none());

    let err = view.roi(3, 3, 2, 2).err().unwrap();
    assert_eq!(
        err,
        PatternMatchError::RoiOutOfBounds {
            x: 3,
            y: 3,
            width: 2,
            height: 2,
            img_width: 4,
            img_height: 4,
        }
    );
}

#[test]
fn padded_rgba_raster_reads_pixels_through_stride() {
    let width = 3;
    let height = 2;
    let stride = 16;
    let mut data = vec![0u8; stride * height];
    for y in 0..height {
        for x in 0..width {
            let base = y * stride + x * 4;
            data[base..base + 4].copy_from_slice(&[x as u8, y as u8, 9, 255]);
        }
    }
    let raster = RasterImage::with_stride(&data, width, height, stride, PixelFormat::Rgba).unwrap();
    assert_eq!(raster.width(), 3);
    assert_eq!(raster.bounds(), Rect::with_size(3, 2));
    assert_eq!(raster.pixel(Point::new(2, 1)).unwrap(), &[2u8, 1, 9, 255]);
}

#[test]
fn rect_intersection_and_edges() {
    let a = Rect::new(4, 4, 6, 3);
    assert_eq!((a.left(), a.top(), a.right(), a.bottom()), (4, 4, 9, 6));
    assert_eq!(
        a.intersection(&Rect::new(8, 0, 10, 5)),
        Some(Rect::new(8, 4, 2, 1))
    );
    assert_eq!(a.intersection(&Rect::new(0, 0, 4, 4)), None);
}

#[test]
fn blob_materializes_mask_for_bounding_rect() {
    let blob = Blob::new(vec![
        Run::new(10, 5, 8),
        Run::new(11, 4, 9),
        Run::new(12, 6, 7),
    ]);
    let bounds = blob.bounding_rect().unwrap();
    assert_eq!(bounds, Rect::new(4, 10, 5, 3));
    let mask = blob.to_bounding_mask().unwrap();
    assert_eq!(mask.count(), blob.area());
    assert!(mask.contains(Point::new(6, 12)));
    assert!(!mask.contains(Point::new(4, 10)));
    assert_eq!(Blob::from_mask(&mask).runs(), blob.runs());
}

#[test]
fn mask_rejects_wrong_bit_count() {
    let err = Mask::new(Rect::with_size(3, 3), vec![true; 8]).err().unwrap();
    assert_eq!(err, PatternMatchError::BufferTooSmall { needed: 9, got: 8 });
}

#[test]
fn owned_raster_pixel_mut_writes_through() {
    let mut raster = OwnedRaster::new(vec![0u8; 8], 2, 1, PixelFormat::Rgba).unwrap();
    raster.pixel_mut(Point::new(1, 0)).unwrap()[2] = 77;
    assert_eq!(raster.view().pixel(Point::new(1, 0)).unwrap(), &[0u8, 0, 77, 0]);
    assert!(raster.pixel_mut(Point::new(2, 0)).is_none());
}
