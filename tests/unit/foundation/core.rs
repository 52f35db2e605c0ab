use super::*;

#[test]
fn region_edges_and_containment() {
    let r = Region::new(10, 4, 5, 2, [1, 2, 3]);
    assert_eq!(r.right(), 15);
    assert_eq!(r.bottom(), 6);
    assert_eq!(r.area(), 10);
    assert!(r.contains(10, 4));
    assert!(r.contains(14, 5));
    assert!(!r.contains(15, 4));
    assert!(!r.contains(10, 6));
}

#[test]
fn region_validate_rejects_degenerate() {
    assert!(Region::new(0, 0, 1, 1, [0, 0, 0]).validate().is_ok());
    let err = Region::new(0, 0, 0, 4, [0, 0, 0]).validate().unwrap_err();
    assert!(matches!(err, HighlightError::Shape(_)));
    assert!(Region::new(0, 0, 4, 0, [0, 0, 0]).validate().is_err());
}

#[test]
fn regions_from_json_parses_records() {
    let regions = regions_from_json(
        r#"[{"x":1,"y":2,"w":3,"h":4,"color":[255,0,0]},{"x":0,"y":0,"w":1,"h":1,"color":[0,0,255]}]"#,
    )
    .unwrap();
    assert_eq!(regions.len(), 2);
    assert_eq!(regions[0], Region::new(1, 2, 3, 4, [255, 0, 0]));
}

#[test]
fn regions_from_json_malformed_record_is_shape_error() {
    let err = regions_from_json(r#"[{"x":1,"y":2,"w":3,"color":[255,0,0]}]"#).unwrap_err();
    assert!(matches!(err, HighlightError::Shape(_)));

    let err = regions_from_json(r#"[{"x":-1,"y":2,"w":3,"h":1,"color":[255,0,0]}]"#).unwrap_err();
    assert!(matches!(err, HighlightError::Shape(_)));

    let err = regions_from_json(r#"[{"x":1,"y":2,"w":3,"h":1,"color":[255,0]}]"#).unwrap_err();
    assert!(matches!(err, HighlightError::Shape(_)));
}

#[test]
fn pixel_buffer_rejects_wrong_length() {
    let err = PixelBuffer::new(2, 2, vec![0; 11]).unwrap_err();
    assert!(matches!(err, HighlightError::Shape(_)));
    assert!(PixelBuffer::new(2, 2, vec![0; 12]).is_ok());
}

#[test]
fn pixel_buffer_filled_and_pixel_lookup() {
    let buf = PixelBuffer::filled(3, 2, [9, 8, 7]).unwrap();
    assert_eq!(buf.dimensions(), (3, 2));
    assert_eq!(buf.as_raw().len(), 18);
    assert_eq!(buf.pixel(2, 1), Some([9, 8, 7]));
    assert_eq!(buf.pixel(3, 0), None);
    assert_eq!(buf.pixel(0, 2), None);
}

#[test]
fn pixel_buffer_is_row_major() {
    let data = vec![
        0, 0, 0, 1, 1, 1, //
        2, 2, 2, 3, 3, 3,
    ];
    let buf = PixelBuffer::new(2, 2, data).unwrap();
    assert_eq!(buf.pixel(1, 0), Some([1, 1, 1]));
    assert_eq!(buf.pixel(0, 1), Some([2, 2, 2]));
    assert_eq!(buf.row_stride(), 6);
}
