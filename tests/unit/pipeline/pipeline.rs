use super::*;

const WHITE: [u8; 3] = [255, 255, 255];
const RED: [u8; 3] = [255, 0, 0];

#[test]
fn default_options_match_documented_values() {
    let opts = HighlightOptions::default();
    assert_eq!(opts.alpha, 0.4);
    assert_eq!(opts.merge_gap_px, 10);
}

#[test]
fn options_from_json_fills_defaults_and_validates() {
    let opts = HighlightOptions::from_json(r#"{"alpha":0.75}"#).unwrap();
    assert_eq!(opts.alpha, 0.75);
    assert_eq!(opts.merge_gap_px, MERGE_GAP_PX);

    let err = HighlightOptions::from_json(r#"{"alpha":2.0}"#).unwrap_err();
    assert!(matches!(err, HighlightError::Validation(_)));
    assert!(HighlightOptions::from_json(r#"{"alpha":"x"}"#).is_err());
}

#[test]
fn degenerate_regions_are_rejected_at_entry() {
    let img = PixelBuffer::filled(4, 4, WHITE).unwrap();
    let err = highlight_buffer(
        &img,
        &[Region::new(0, 0, 0, 2, RED)],
        &HighlightOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, HighlightError::Shape(_)));
}

#[test]
fn stats_report_merge_and_batch_shape() {
    let img = PixelBuffer::filled(64, 8, WHITE).unwrap();
    let regions = [
        Region::new(0, 0, 4, 2, RED),
        Region::new(10, 0, 4, 2, RED),
        Region::new(40, 4, 3, 3, [0, 0, 255]),
    ];
    let (_, stats) = highlight_buffer_with_stats(
        &img,
        &regions,
        &HighlightOptions::default(),
        &mut CpuBackend::default(),
    )
    .unwrap();
    assert_eq!(
        stats,
        HighlightStats {
            regions_in: 3,
            regions_optimized: 2,
            max_h: 3,
            max_w: 14,
        }
    );
}

#[test]
fn raw_source_returns_raw() {
    let img = PixelBuffer::filled(2, 2, WHITE).unwrap();
    let out = highlight(
        ImageSource::Raw(img),
        &[Region::new(0, 0, 1, 1, RED)],
        &HighlightOptions::with_alpha(1.0),
    )
    .unwrap();
    let HighlightedImage::Raw(buf) = out else {
        panic!("expected raw output");
    };
    assert_eq!(buf.pixel(0, 0), Some(RED));
    assert_eq!(buf.pixel(1, 1), Some(WHITE));
}

#[test]
fn dynamic_source_returns_dynamic() {
    let handle = DynamicImage::ImageRgb8(image::RgbImage::from_pixel(3, 2, image::Rgb(WHITE)));
    let out = highlight(
        ImageSource::Dynamic(handle),
        &[Region::new(1, 1, 1, 1, RED)],
        &HighlightOptions::with_alpha(1.0),
    )
    .unwrap();
    let HighlightedImage::Dynamic(img) = out else {
        panic!("expected dynamic output");
    };
    let rgb = img.to_rgb8();
    assert_eq!(rgb.dimensions(), (3, 2));
    assert_eq!(rgb.get_pixel(1, 1).0, RED);
    assert_eq!(rgb.get_pixel(0, 0).0, WHITE);
}

#[test]
fn encoded_source_returns_same_format() {
    let img = PixelBuffer::filled(4, 4, WHITE).unwrap();
    let png = crate::assets::codec::encode(&img, ImageFormat::Png).unwrap();
    let out = highlight(
        ImageSource::Encoded(png),
        &[Region::new(0, 0, 2, 2, RED)],
        &HighlightOptions::default(),
    )
    .unwrap();
    let HighlightedImage::Encoded { bytes, format } = out else {
        panic!("expected encoded output");
    };
    assert_eq!(format, ImageFormat::Png);
    let (decoded, _) = crate::assets::codec::decode(&bytes).unwrap();
    assert_eq!(decoded.pixel(1, 1), Some([255, 153, 153]));
    assert_eq!(decoded.pixel(3, 3), Some(WHITE));
}

#[test]
fn bad_encoded_source_surfaces_decode_error() {
    let err = highlight(
        ImageSource::Encoded(vec![1, 2, 3, 4]),
        &[],
        &HighlightOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, HighlightError::Decode(_)));
}
