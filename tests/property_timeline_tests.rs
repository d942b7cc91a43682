use booking_timeline::core::{
    Appointment, CoordinateMapper, EntityGeometry, TimeScale, VirtualWindow, WindowPolicy,
    has_overlap,
};
use booking_timeline::interaction::{DragResizeController, GestureBounds};
use chrono::{NaiveDate, Utc};
use proptest::prelude::*;

const REFERENCE_MIDNIGHT: i64 = 1_709_510_400;
const DAY: i64 = 86_400;

fn reference_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 4).expect("valid date")
}

fn mapper(cell_width: f64) -> CoordinateMapper<Utc> {
    CoordinateMapper::new(Utc, cell_width).expect("valid mapper")
}

fn any_scale() -> impl Strategy<Value = TimeScale> {
    prop::sample::select(TimeScale::ALL.to_vec())
}

proptest! {
    #[test]
    fn width_never_drops_below_border_inset(
        scale in any_scale(),
        start in -400 * DAY..400 * DAY,
        duration in 1i64..60 * DAY,
        cell_width in 10.0f64..200.0
    ) {
        let start = REFERENCE_MIDNIGHT + start;
        let width = mapper(cell_width).width(start, start + duration, scale);
        prop_assert!(width >= -2.0);
    }

    #[test]
    fn left_is_monotonic_in_time(
        scale in any_scale(),
        t1 in -400 * DAY..400 * DAY,
        gap in 0i64..30 * DAY
    ) {
        let mapper = mapper(60.0);
        let a = mapper.left(REFERENCE_MIDNIGHT + t1, scale, reference_day()).expect("left");
        let b = mapper.left(REFERENCE_MIDNIGHT + t1 + gap, scale, reference_day()).expect("left");
        prop_assert!(a <= b, "{scale}: left({t1})={a} > left({})={b}", t1 + gap);
    }

    #[test]
    fn hour_scale_position_round_trips_hour_boundaries(hours in -24i64 * 400..24 * 400) {
        let mapper = mapper(60.0);
        let t = REFERENCE_MIDNIGHT + hours * 3600;
        let left = mapper.left(t, TimeScale::Hour, reference_day()).expect("left");
        let back = mapper
            .timestamp_from_position(left, TimeScale::Hour, REFERENCE_MIDNIGHT, t)
            .expect("inverse");
        prop_assert_eq!(back, t);
    }

    #[test]
    fn day_scale_position_round_trips_whole_days(days in -400i64..400, seconds in 0i64..DAY) {
        let mapper = mapper(60.0);
        let t = REFERENCE_MIDNIGHT + days * DAY + seconds;
        let left = (days as f64) * mapper.pixels_per_day(TimeScale::Day);
        let back = mapper
            .timestamp_from_position(left, TimeScale::Day, REFERENCE_MIDNIGHT, t)
            .expect("inverse");
        prop_assert_eq!(back, t);
    }

    #[test]
    fn week_scale_position_round_trips_any_clock_time(
        weeks in -60i64..60,
        seconds in 0i64..DAY,
        cell_width in 10.0f64..200.0
    ) {
        let mapper = mapper(cell_width);
        let t = REFERENCE_MIDNIGHT + weeks * 7 * DAY + seconds;
        let left = mapper.left(t, TimeScale::Week, reference_day()).expect("left");
        let back = mapper
            .timestamp_from_position(left, TimeScale::Week, REFERENCE_MIDNIGHT, t)
            .expect("inverse");
        prop_assert_eq!(back, t);
    }

    #[test]
    fn day_and_week_rendered_left_round_trips(
        scale in prop::sample::select(vec![TimeScale::Day, TimeScale::Week]),
        days in -400i64..400,
        seconds in 0i64..DAY
    ) {
        let mapper = mapper(60.0);
        let t = REFERENCE_MIDNIGHT + days * DAY + seconds;
        let left = mapper.left(t, scale, reference_day()).expect("left");
        let back = mapper
            .timestamp_from_position(left, scale, REFERENCE_MIDNIGHT, t)
            .expect("inverse");
        prop_assert_eq!(back, t);
    }

    #[test]
    fn half_hour_scale_position_round_trips_slot_boundaries(slots in -48i64 * 400..48 * 400) {
        let mapper = mapper(60.0);
        let t = REFERENCE_MIDNIGHT + slots * 1800;
        let left = mapper.left(t, TimeScale::HalfHour, reference_day()).expect("left");
        let back = mapper
            .timestamp_from_position(left, TimeScale::HalfHour, REFERENCE_MIDNIGHT, t)
            .expect("inverse");
        prop_assert_eq!(back, t);
    }

    #[test]
    fn nothing_overlaps_an_empty_set(start in -1_000_000i64..1_000_000, len in 1i64..100_000) {
        prop_assert!(!has_overlap("A", start, start + len, &[]));
    }

    #[test]
    fn overlap_is_symmetric(
        s1 in -10_000i64..10_000,
        l1 in 1i64..5_000,
        s2 in -10_000i64..10_000,
        l2 in 1i64..5_000
    ) {
        let first = Appointment::new("A", s1, s1 + l1).expect("valid");
        let second = Appointment::new("A", s2, s2 + l2).expect("valid");
        prop_assert_eq!(
            has_overlap("A", s2, s2 + l2, std::slice::from_ref(&first)),
            has_overlap("A", s1, s1 + l1, std::slice::from_ref(&second))
        );
    }

    #[test]
    fn initial_fill_is_idempotent(scale in any_scale(), viewport in 0.0f64..20_000.0) {
        let metrics = mapper(60.0).metrics(scale);
        let mut window = VirtualWindow::new(WindowPolicy::default()).expect("window");
        window.set_viewport_width(viewport).expect("viewport");

        let first = window.ensure_initial_fill(false, metrics);
        prop_assert!(first.loaded_days >= first.required_days);
        let second = window.ensure_initial_fill(false, metrics);
        prop_assert_eq!(second.loaded_days, first.loaded_days);
        prop_assert!(!second.changed());
    }

    #[test]
    fn drag_result_is_on_grid_and_non_negative(
        origin_left in 0.0f64..1_000.0,
        width in 0.0f64..300.0,
        dx in -2_000.0f64..2_000.0,
        container in 0.0f64..3_000.0
    ) {
        let mut controller = DragResizeController::default();
        controller.begin_drag(500.0, EntityGeometry { left: origin_left, width, epoch: 0 });
        let bounds = GestureBounds::new(container, 60.0).expect("bounds");
        let left = controller.pointer_move(500.0 + dx, bounds).expect("dragging");
        prop_assert!(left >= 0.0);
        prop_assert!(((left / 60.0).round() * 60.0 - left).abs() <= 1e-9);
    }

    #[test]
    fn resize_result_is_at_least_one_cell(
        origin_width in 0.0f64..600.0,
        left in 0.0f64..1_000.0,
        dx in -2_000.0f64..2_000.0,
        container in 0.0f64..3_000.0
    ) {
        let mut controller = DragResizeController::default();
        controller.begin_resize(500.0, EntityGeometry { left, width: origin_width, epoch: 0 });
        let bounds = GestureBounds::new(container, 60.0).expect("bounds");
        let width = controller.pointer_move(500.0 + dx, bounds).expect("resizing");
        prop_assert!(width >= 60.0);
    }
}
