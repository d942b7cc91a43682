use booking_timeline::TimelineError;
use booking_timeline::core::{ScaleRegistry, TimeScale};

#[test]
fn scale_table_matches_cell_durations() {
    assert_eq!(TimeScale::HalfHour.cell_duration_minutes(), 30);
    assert_eq!(TimeScale::Hour.cell_duration_minutes(), 60);
    assert_eq!(TimeScale::Day.cell_duration_minutes(), 1440);
    assert_eq!(TimeScale::Week.cell_duration_minutes(), 10_080);

    assert!((TimeScale::HalfHour.cells_per_day() - 48.0).abs() <= 1e-12);
    assert!((TimeScale::Hour.cells_per_day() - 24.0).abs() <= 1e-12);
    assert!((TimeScale::Day.cells_per_day() - 1.0).abs() <= 1e-12);
    assert!((TimeScale::Week.cells_per_day() - 1.0 / 7.0).abs() <= 1e-12);
}

#[test]
fn only_week_is_coarse() {
    let coarse: Vec<TimeScale> = TimeScale::ALL
        .into_iter()
        .filter(|scale| scale.spec().coarse)
        .collect();
    assert_eq!(coarse, vec![TimeScale::Week]);
    assert!(TimeScale::Hour.is_sub_day());
    assert!(TimeScale::HalfHour.is_sub_day());
    assert!(!TimeScale::Day.is_sub_day());
}

#[test]
fn scale_names_parse_case_insensitively() {
    assert_eq!("halfHour".parse::<TimeScale>().expect("parse"), TimeScale::HalfHour);
    assert_eq!("half-hour".parse::<TimeScale>().expect("parse"), TimeScale::HalfHour);
    assert_eq!("HALF_HOUR".parse::<TimeScale>().expect("parse"), TimeScale::HalfHour);
    assert_eq!(" Week ".parse::<TimeScale>().expect("parse"), TimeScale::Week);

    for scale in TimeScale::ALL {
        assert_eq!(scale.to_string().parse::<TimeScale>().expect("display parses"), scale);
    }
}

#[test]
fn unknown_scale_is_rejected() {
    let err = "month".parse::<TimeScale>().expect_err("month is not a scale");
    assert!(matches!(err, TimelineError::InvalidScale(name) if name == "month"));
}

#[test]
fn legacy_values_resolve() {
    assert_eq!(TimeScale::from_legacy_value(7.5).expect("legacy"), TimeScale::HalfHour);
    assert_eq!(TimeScale::from_legacy_value(15.0).expect("legacy"), TimeScale::Hour);
    assert_eq!(TimeScale::from_legacy_value(360.0).expect("legacy"), TimeScale::Day);
    assert_eq!(TimeScale::from_legacy_value(2520.0).expect("legacy"), TimeScale::Week);
    assert!(TimeScale::from_legacy_value(60.0).is_err());
}

#[test]
fn scale_serializes_as_camel_case_name() {
    let json = serde_json::to_string(&TimeScale::HalfHour).expect("serialize");
    assert_eq!(json, "\"halfHour\"");
    let parsed: TimeScale = serde_json::from_str("\"week\"").expect("deserialize");
    assert_eq!(parsed, TimeScale::Week);
}

#[test]
fn registry_bumps_epoch_on_every_change() {
    let mut registry = ScaleRegistry::default();
    assert_eq!(registry.scale(), TimeScale::Hour);
    assert_eq!(registry.epoch(), 0);

    let change = registry.set_scale(TimeScale::Day);
    assert_eq!(change.previous, TimeScale::Hour);
    assert_eq!(change.current, TimeScale::Day);
    assert_eq!(change.epoch, 1);
    assert!(!change.is_noop());

    let same = registry.set_scale(TimeScale::Day);
    assert!(same.is_noop());
    assert_eq!(registry.epoch(), 2);
}

#[test]
fn registry_rejects_unknown_name_without_side_effects() {
    let mut registry = ScaleRegistry::new(TimeScale::Week);
    assert!(registry.set_scale_by_name("fortnight").is_err());
    assert_eq!(registry.scale(), TimeScale::Week);
    assert_eq!(registry.epoch(), 0);

    let change = registry.set_scale_by_name("halfHour").expect("known scale");
    assert_eq!(change.current, TimeScale::HalfHour);
    assert_eq!(registry.scale(), TimeScale::HalfHour);
}

#[test]
fn every_scale_resolves_its_own_table_row() {
    for scale in TimeScale::ALL {
        let spec = scale.spec();
        assert_eq!(
            TimeScale::from_legacy_value(spec.legacy_value).expect("legacy value"),
            scale
        );
        assert!((spec.legacy_value * 4.0 - f64::from(spec.cell_duration_minutes)).abs() <= 1e-12);
    }
}
