use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::coordinate_mapper::ScaleMetrics;
use crate::core::types::VisibleRange;
use crate::error::{TimelineError, TimelineResult};

/// Tuning for date virtualization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowPolicy {
    /// Padding days at day scale and finer.
    pub lookahead_days_fine: u32,
    /// Padding days at week scale.
    pub lookahead_days_coarse: u32,
    pub load_increment_days: u32,
    /// Fraction of the scrollable width at which more days are loaded.
    pub load_trigger_ratio: f64,
    /// Days required while the viewport width is still unknown.
    pub fallback_required_days: u32,
    pub default_visible_range: VisibleRange,
}

impl Default for WindowPolicy {
    fn default() -> Self {
        Self {
            lookahead_days_fine: 10,
            lookahead_days_coarse: 5,
            load_increment_days: 7,
            load_trigger_ratio: 0.7,
            fallback_required_days: 30,
            default_visible_range: VisibleRange::default(),
        }
    }
}

impl WindowPolicy {
    pub fn validate(self) -> TimelineResult<Self> {
        if self.load_increment_days == 0 {
            return Err(TimelineError::InvalidData(
                "load increment must be at least one day".to_owned(),
            ));
        }
        if !self.load_trigger_ratio.is_finite()
            || self.load_trigger_ratio <= 0.0
            || self.load_trigger_ratio > 1.0
        {
            return Err(TimelineError::InvalidData(
                "load trigger ratio must be in (0, 1]".to_owned(),
            ));
        }
        Ok(self)
    }

    #[must_use]
    pub fn lookahead_days(self, metrics: ScaleMetrics) -> u32 {
        if metrics.scale.spec().coarse {
            self.lookahead_days_coarse
        } else {
            self.lookahead_days_fine
        }
    }
}

/// Result of an initial fill attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillOutcome {
    pub required_days: u32,
    pub previous_days: u32,
    pub loaded_days: u32,
}

impl FillOutcome {
    #[must_use]
    pub fn changed(self) -> bool {
        self.previous_days != self.loaded_days
    }
}

/// Result of a scroll event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollOutcome {
    pub visible_range: VisibleRange,
    pub threshold_reached: bool,
    pub load_started: bool,
}

/// Tracks how many days are materialized and which pixel span is visible.
///
/// Loads are single-flight: while one is outstanding (until `finish_load`),
/// `load_more` is a no-op rather than queued.
#[derive(Debug, Clone, PartialEq)]
pub struct VirtualWindow {
    policy: WindowPolicy,
    loaded_days: u32,
    load_in_flight: bool,
    initial_fill_complete: bool,
    recently_loaded_from: Option<u32>,
    visible_range: VisibleRange,
    viewport_width_px: Option<f64>,
}

impl VirtualWindow {
    pub fn new(policy: WindowPolicy) -> TimelineResult<Self> {
        let policy = policy.validate()?;
        Ok(Self {
            policy,
            loaded_days: 0,
            load_in_flight: false,
            initial_fill_complete: false,
            recently_loaded_from: None,
            visible_range: policy.default_visible_range,
            viewport_width_px: None,
        })
    }

    #[must_use]
    pub fn policy(&self) -> WindowPolicy {
        self.policy
    }

    #[must_use]
    pub fn loaded_days(&self) -> u32 {
        self.loaded_days
    }

    #[must_use]
    pub fn visible_range(&self) -> VisibleRange {
        self.visible_range
    }

    #[must_use]
    pub fn is_load_in_flight(&self) -> bool {
        self.load_in_flight
    }

    #[must_use]
    pub fn is_initial_fill_complete(&self) -> bool {
        self.initial_fill_complete
    }

    #[must_use]
    pub fn viewport_width_px(&self) -> Option<f64> {
        self.viewport_width_px
    }

    pub fn set_viewport_width(&mut self, width_px: f64) -> TimelineResult<()> {
        if !width_px.is_finite() || width_px < 0.0 {
            return Err(TimelineError::InvalidData(format!(
                "viewport width must be finite and >= 0, got {width_px}"
            )));
        }
        self.viewport_width_px = Some(width_px);
        Ok(())
    }

    /// Days needed to cover `viewport_width_px` plus the scale's lookahead.
    #[must_use]
    pub fn required_days(&self, viewport_width_px: Option<f64>, metrics: ScaleMetrics) -> u32 {
        match viewport_width_px {
            Some(width) => {
                let cover = (width / metrics.pixels_per_day).ceil().max(0.0) as u32;
                cover.saturating_add(self.policy.lookahead_days(metrics))
            }
            None => self.policy.fallback_required_days,
        }
    }

    /// Raises the loaded-day counter to cover the current viewport.
    ///
    /// `force_reload` resets the counter to exactly the required amount; it is
    /// used after a scale change and supersedes any outstanding load.
    pub fn ensure_initial_fill(&mut self, force_reload: bool, metrics: ScaleMetrics) -> FillOutcome {
        let required_days = self.required_days(self.viewport_width_px, metrics);
        let previous_days = self.loaded_days;

        if self.loaded_days >= required_days && !force_reload {
            self.initial_fill_complete = true;
            return FillOutcome {
                required_days,
                previous_days,
                loaded_days: previous_days,
            };
        }

        self.loaded_days = if force_reload {
            required_days
        } else {
            self.loaded_days.max(required_days)
        };
        self.load_in_flight = true;
        self.recently_loaded_from = Some(previous_days.min(self.loaded_days));
        debug!(
            force_reload,
            required_days,
            previous_days,
            loaded_days = self.loaded_days,
            scale = %metrics.scale,
            "initial fill"
        );

        FillOutcome {
            required_days,
            previous_days,
            loaded_days: self.loaded_days,
        }
    }

    /// Appends one load increment. Returns `false` while a load is in flight.
    pub fn load_more(&mut self) -> bool {
        if self.load_in_flight {
            trace!(loaded_days = self.loaded_days, "load already in flight");
            return false;
        }
        let previous = self.loaded_days;
        self.loaded_days = self
            .loaded_days
            .saturating_add(self.policy.load_increment_days);
        self.load_in_flight = true;
        self.recently_loaded_from = Some(previous);
        debug!(
            previous_days = previous,
            loaded_days = self.loaded_days,
            "load more days"
        );
        true
    }

    /// Marks the outstanding load as materialized by the host.
    pub fn finish_load(&mut self) {
        self.load_in_flight = false;
        self.recently_loaded_from = None;
    }

    /// `true` when day `index` was added by the most recent, unfinished load.
    #[must_use]
    pub fn is_recently_loaded(&self, index: usize) -> bool {
        self.recently_loaded_from.is_some_and(|from| {
            index >= from as usize && index < self.loaded_days as usize
        })
    }

    /// Visible span plus one day of buffer on each side.
    pub fn update_visible_range(
        &mut self,
        scroll_left: f64,
        client_width: f64,
        metrics: ScaleMetrics,
    ) -> VisibleRange {
        let scroll_left = sanitize_px(scroll_left);
        let client_width = sanitize_px(client_width);
        let buffer = metrics.pixels_per_day;
        self.visible_range = VisibleRange::new(
            (scroll_left - buffer).max(0.0),
            scroll_left + client_width + buffer,
        )
        .unwrap_or(self.policy.default_visible_range);
        self.visible_range
    }

    /// Handles a scroll event: refreshes the visible range and loads more
    /// days once the right edge reaches the trigger ratio of `scroll_width`.
    pub fn on_scroll(
        &mut self,
        scroll_left: f64,
        client_width: f64,
        scroll_width: f64,
        metrics: ScaleMetrics,
    ) -> ScrollOutcome {
        let visible_range = self.update_visible_range(scroll_left, client_width, metrics);
        let right_edge = sanitize_px(scroll_left) + sanitize_px(client_width);
        let threshold_reached =
            right_edge >= sanitize_px(scroll_width) * self.policy.load_trigger_ratio;
        let load_started = threshold_reached && self.load_more();
        trace!(
            scroll_left,
            client_width,
            scroll_width,
            threshold_reached,
            load_started,
            "scroll"
        );
        ScrollOutcome {
            visible_range,
            threshold_reached,
            load_started,
        }
    }

    /// Resets state after a scale change and reloads from scratch.
    pub fn on_scale_changed(&mut self, metrics: ScaleMetrics) -> FillOutcome {
        self.visible_range = self.policy.default_visible_range;
        self.initial_fill_complete = false;
        self.ensure_initial_fill(true, metrics)
    }

    /// Scrolls back to today (offset `0`) and returns the new scroll offset.
    pub fn reset_to_today(&mut self, client_width: f64, metrics: ScaleMetrics) -> f64 {
        self.update_visible_range(0.0, client_width, metrics);
        0.0
    }

    /// Keeps dates whose column lies within the visible range widened by one day.
    #[must_use]
    pub fn filter_visible_dates(&self, dates: &[NaiveDate], metrics: ScaleMetrics) -> Vec<NaiveDate> {
        let range = self.visible_range.expanded(metrics.pixels_per_day);
        dates
            .iter()
            .enumerate()
            .filter(|(index, _)| range.contains(*index as f64 * metrics.pixels_per_day))
            .map(|(_, date)| *date)
            .collect()
    }

    /// Keeps weeks whose first column lies within the visible range widened by one week.
    #[must_use]
    pub fn filter_visible_weeks(&self, weeks: &[WeekSpan], metrics: ScaleMetrics) -> Vec<WeekSpan> {
        let range = self.visible_range.expanded(metrics.pixels_per_day * 7.0);
        weeks
            .iter()
            .filter(|week| range.contains(week.start_index as f64 * metrics.pixels_per_day))
            .cloned()
            .collect()
    }
}

fn sanitize_px(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

/// Header span covering consecutive loaded days of one calendar week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekSpan {
    pub label: String,
    pub week_number: u32,
    pub start_index: usize,
    pub end_index: usize,
    pub start_date: NaiveDate,
    pub width_px: f64,
}

/// `count` consecutive local dates starting at `today`.
#[must_use]
pub fn generate_dates(today: NaiveDate, count: u32) -> Vec<NaiveDate> {
    today.iter_days().take(count as usize).collect()
}

/// Week number as shown in timeline headers: weeks counted from January 1st
/// with Sunday-based alignment of the first partial week.
#[must_use]
pub fn week_number(date: NaiveDate) -> u32 {
    let jan_first_weekday = NaiveDate::from_yo_opt(date.year(), 1)
        .map_or(0, |jan_first| jan_first.weekday().num_days_from_sunday());
    (date.ordinal0() + jan_first_weekday + 1).div_ceil(7)
}

#[must_use]
pub fn week_label(date: NaiveDate) -> String {
    format!("Week {}", week_number(date))
}

/// Splits `dates` into week spans starting on Monday (or at the first date).
#[must_use]
pub fn group_weeks(dates: &[NaiveDate], metrics: ScaleMetrics) -> Vec<WeekSpan> {
    let Some(last_index) = dates.len().checked_sub(1) else {
        return Vec::new();
    };

    dates
        .iter()
        .enumerate()
        .filter(|(index, date)| *index == 0 || date.weekday() == Weekday::Mon)
        .map(|(start_index, date)| {
            let days_to_sunday = 6 - date.weekday().num_days_from_monday() as usize;
            let end_index = (start_index + days_to_sunday).min(last_index);
            let day_count = (end_index - start_index + 1) as f64;
            WeekSpan {
                label: week_label(*date),
                week_number: week_number(*date),
                start_index,
                end_index,
                start_date: *date,
                width_px: day_count * metrics.pixels_per_day - metrics.border_inset_px,
            }
        })
        .collect()
}
