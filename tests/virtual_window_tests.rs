use booking_timeline::core::{
    CoordinateMapper, ScaleMetrics, TimeScale, VirtualWindow, WindowPolicy, generate_dates,
    group_weeks, week_label, week_number,
};
use chrono::{Datelike, NaiveDate, Utc, Weekday};

fn metrics(scale: TimeScale) -> ScaleMetrics {
    CoordinateMapper::new(Utc, 60.0)
        .expect("valid mapper")
        .metrics(scale)
}

fn window() -> VirtualWindow {
    VirtualWindow::new(WindowPolicy::default()).expect("valid policy")
}

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 4).expect("valid date")
}

#[test]
fn required_days_cover_viewport_plus_lookahead() {
    let window = window();
    assert_eq!(window.required_days(Some(2880.0), metrics(TimeScale::Hour)), 12);
    assert_eq!(window.required_days(Some(600.0), metrics(TimeScale::Day)), 20);
    assert_eq!(window.required_days(Some(610.0), metrics(TimeScale::Day)), 21);
    assert_eq!(window.required_days(Some(620.0), metrics(TimeScale::Week)), 78);
}

#[test]
fn unknown_viewport_uses_fallback_days() {
    let window = window();
    assert_eq!(window.required_days(None, metrics(TimeScale::Hour)), 30);
}

#[test]
fn initial_fill_raises_counter_once() {
    let mut window = window();
    window.set_viewport_width(600.0).expect("viewport");

    let first = window.ensure_initial_fill(false, metrics(TimeScale::Day));
    assert_eq!(first.previous_days, 0);
    assert_eq!(first.loaded_days, 20);
    assert!(first.changed());

    let second = window.ensure_initial_fill(false, metrics(TimeScale::Day));
    assert_eq!(second.loaded_days, 20);
    assert!(!second.changed());
    assert!(window.is_initial_fill_complete());
}

#[test]
fn initial_fill_grows_when_viewport_widens() {
    let mut window = window();
    window.set_viewport_width(600.0).expect("viewport");
    window.ensure_initial_fill(false, metrics(TimeScale::Day));
    window.ensure_initial_fill(false, metrics(TimeScale::Day));

    window.set_viewport_width(1200.0).expect("viewport");
    let grown = window.ensure_initial_fill(false, metrics(TimeScale::Day));
    assert_eq!(grown.loaded_days, 30);
}

#[test]
fn forced_fill_resets_counter_to_required() {
    let mut window = window();
    window.set_viewport_width(600.0).expect("viewport");
    window.ensure_initial_fill(false, metrics(TimeScale::Day));
    window.finish_load();
    assert!(window.load_more());
    window.finish_load();
    assert_eq!(window.loaded_days(), 27);

    let forced = window.ensure_initial_fill(true, metrics(TimeScale::Day));
    assert_eq!(forced.loaded_days, 20);
    assert_eq!(window.loaded_days(), 20);
}

#[test]
fn load_more_is_single_flight() {
    let mut window = window();
    window.ensure_initial_fill(false, metrics(TimeScale::Hour));
    assert!(window.is_load_in_flight());
    assert!(!window.load_more());
    assert_eq!(window.loaded_days(), 30);

    window.finish_load();
    assert!(window.load_more());
    assert!(!window.load_more());
    assert_eq!(window.loaded_days(), 37);

    window.finish_load();
    assert!(window.load_more());
    assert_eq!(window.loaded_days(), 44);
}

#[test]
fn recently_loaded_marks_last_increment_until_finished() {
    let mut window = window();
    window.ensure_initial_fill(false, metrics(TimeScale::Day));
    window.finish_load();
    assert!(window.load_more());

    assert!(!window.is_recently_loaded(29));
    assert!(window.is_recently_loaded(30));
    assert!(window.is_recently_loaded(36));
    assert!(!window.is_recently_loaded(37));

    window.finish_load();
    assert!(!window.is_recently_loaded(30));
}

#[test]
fn visible_range_carries_one_day_buffer() {
    let mut window = window();
    let range = window.update_visible_range(300.0, 600.0, metrics(TimeScale::Day));
    assert!((range.start() - 240.0).abs() <= 1e-9);
    assert!((range.end() - 960.0).abs() <= 1e-9);

    let clamped = window.update_visible_range(10.0, 600.0, metrics(TimeScale::Day));
    assert!((clamped.start() - 0.0).abs() <= 1e-9);
    assert!((clamped.end() - 670.0).abs() <= 1e-9);
}

#[test]
fn scroll_past_seventy_percent_loads_more() {
    let mut window = window();
    window.ensure_initial_fill(false, metrics(TimeScale::Day));
    window.finish_load();

    let early = window.on_scroll(0.0, 600.0, 1800.0, metrics(TimeScale::Day));
    assert!(!early.threshold_reached);
    assert!(!early.load_started);
    assert_eq!(window.loaded_days(), 30);

    let late = window.on_scroll(700.0, 600.0, 1800.0, metrics(TimeScale::Day));
    assert!(late.threshold_reached);
    assert!(late.load_started);
    assert_eq!(window.loaded_days(), 37);

    let again = window.on_scroll(720.0, 600.0, 1800.0, metrics(TimeScale::Day));
    assert!(again.threshold_reached);
    assert!(!again.load_started);
    assert_eq!(window.loaded_days(), 37);
}

#[test]
fn scale_change_resets_range_and_reloads() {
    let mut window = window();
    window.set_viewport_width(2880.0).expect("viewport");
    window.ensure_initial_fill(false, metrics(TimeScale::Day));
    window.update_visible_range(500.0, 2880.0, metrics(TimeScale::Day));
    assert_eq!(window.loaded_days(), 58);

    let fill = window.on_scale_changed(metrics(TimeScale::Hour));
    assert_eq!(fill.previous_days, 58);
    assert_eq!(fill.loaded_days, 12);
    assert_eq!(window.visible_range(), WindowPolicy::default().default_visible_range);
}

#[test]
fn reset_to_today_scrolls_to_origin() {
    let mut window = window();
    window.update_visible_range(4000.0, 600.0, metrics(TimeScale::Day));
    let offset = window.reset_to_today(600.0, metrics(TimeScale::Day));
    assert!((offset - 0.0).abs() <= 1e-9);
    assert!((window.visible_range().start() - 0.0).abs() <= 1e-9);
    assert!((window.visible_range().end() - 660.0).abs() <= 1e-9);
}

#[test]
fn visible_dates_keep_one_day_margin() {
    let mut window = window();
    let day = metrics(TimeScale::Day);
    window.update_visible_range(600.0, 600.0, day);

    let dates = generate_dates(monday(), 30);
    let visible = window.filter_visible_dates(&dates, day);
    assert_eq!(visible.len(), 15);
    assert_eq!(visible.first().copied(), Some(dates[8]));
    assert_eq!(visible.last().copied(), Some(dates[22]));
}

#[test]
fn generated_dates_are_consecutive() {
    let dates = generate_dates(monday(), 3);
    assert_eq!(
        dates,
        vec![
            monday(),
            NaiveDate::from_ymd_opt(2024, 3, 5).expect("date"),
            NaiveDate::from_ymd_opt(2024, 3, 6).expect("date"),
        ]
    );
    assert!(generate_dates(monday(), 0).is_empty());
}

#[test]
fn weeks_run_monday_to_sunday() {
    let dates = generate_dates(monday(), 10);
    let weeks = group_weeks(&dates, metrics(TimeScale::Day));
    assert_eq!(weeks.len(), 2);

    assert_eq!((weeks[0].start_index, weeks[0].end_index), (0, 6));
    assert!((weeks[0].width_px - 418.0).abs() <= 1e-9);
    assert_eq!(dates[weeks[0].end_index].weekday(), Weekday::Sun);

    assert_eq!((weeks[1].start_index, weeks[1].end_index), (7, 9));
    assert!((weeks[1].width_px - 178.0).abs() <= 1e-9);
}

#[test]
fn first_partial_week_ends_on_sunday() {
    let wednesday = NaiveDate::from_ymd_opt(2024, 3, 6).expect("date");
    let dates = generate_dates(wednesday, 7);
    let weeks = group_weeks(&dates, metrics(TimeScale::Day));
    assert_eq!(weeks.len(), 2);
    assert_eq!((weeks[0].start_index, weeks[0].end_index), (0, 4));
    assert_eq!((weeks[1].start_index, weeks[1].end_index), (5, 6));
    assert_eq!(weeks[1].start_date.weekday(), Weekday::Mon);
}

#[test]
fn week_labels_use_header_week_number() {
    assert_eq!(week_number(monday()), 10);
    assert_eq!(week_label(monday()), "Week 10");
    let new_year = NaiveDate::from_ymd_opt(2024, 1, 1).expect("date");
    assert_eq!(week_number(new_year), 1);
}

#[test]
fn visible_weeks_keep_one_week_margin() {
    let mut window = window();
    let day = metrics(TimeScale::Day);
    window.update_visible_range(1200.0, 300.0, day);

    let dates = generate_dates(monday(), 42);
    let weeks = group_weeks(&dates, day);
    let visible = window.filter_visible_weeks(&weeks, day);
    let starts: Vec<usize> = visible.iter().map(|week| week.start_index).collect();
    assert_eq!(starts, vec![14, 21, 28]);
}

#[test]
fn invalid_policy_is_rejected() {
    let policy = WindowPolicy {
        load_increment_days: 0,
        ..WindowPolicy::default()
    };
    assert!(VirtualWindow::new(policy).is_err());

    let policy = WindowPolicy {
        load_trigger_ratio: 1.5,
        ..WindowPolicy::default()
    };
    assert!(VirtualWindow::new(policy).is_err());
}
