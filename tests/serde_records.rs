#![cfg(feature = "serde")]

use patmatch::{
    MatchRecord, MatcherConfig, OwnedRaster, PatternMatcher, PatternOwnership, PixelFormat, Point,
    Quadrant, QuadrantMatchRecord,
};

#[test]
fn config_fills_missing_fields_with_defaults() {
    let config: MatcherConfig = serde_json::from_str(r#"{ "parallel": true }"#).unwrap();
    assert!(config.parallel);
    assert_eq!(config.ownership, PatternOwnership::Owned);
    assert_eq!(config.min_window_variance, MatcherConfig::default().min_window_variance);

    let config: MatcherConfig =
        serde_json::from_str(r#"{ "ownership": "Referenced", "min_window_variance": 0.5 }"#)
            .unwrap();
    assert_eq!(config.ownership, PatternOwnership::Referenced);
    assert_eq!(config.min_window_variance, 0.5);
    assert!(!config.parallel);
}

#[test]
fn quadrant_record_serializes_locations_and_scores() {
    let mut record = QuadrantMatchRecord::default();
    record.set_whole(MatchRecord::new(Point::new(3, 4), 0.75));
    record[Quadrant::LowerRight] = MatchRecord::new(Point::new(9, 1), 0.5);

    let json = serde_json::to_value(record).unwrap();
    assert_eq!(json["whole"]["location"]["x"], 3);
    assert_eq!(json["whole"]["score"], 0.75);
    assert_eq!(json["quadrants"][3]["location"]["y"], 1);
    assert!(json["quadrants"][0]["score"].is_null());

    let back: QuadrantMatchRecord = serde_json::from_value(json).unwrap();
    assert_eq!(back, record);
}

#[test]
fn degenerate_score_survives_a_json_round_trip() {
    let record = MatchRecord::new(Point::new(2, 3), f32::NEG_INFINITY);
    let json = serde_json::to_string(&record).unwrap();
    assert_eq!(json, r#"{"location":{"x":2,"y":3},"score":null}"#);

    let back: MatchRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, record);
    assert_eq!(back.score(), f32::NEG_INFINITY);
}

#[test]
fn flat_search_result_can_be_persisted() {
    let pattern = OwnedRaster::from_fn(4, 4, PixelFormat::Gray, |x, y| {
        [(x * 30 + y * 7) as u8, 0, 0, 0]
    })
    .unwrap();
    let flat = OwnedRaster::new(vec![50u8; 100], 10, 10, PixelFormat::Gray).unwrap();
    let mut matcher = PatternMatcher::default();
    matcher.set_pattern(&pattern.view(), None).unwrap();
    let record = matcher.find_all(&flat.view()).unwrap();
    assert_eq!(record.score(), f32::NEG_INFINITY);

    let back: MatchRecord =
        serde_json::from_str(&serde_json::to_string(&record).unwrap()).unwrap();
    assert_eq!(back, record);
}
