use chrono::{NaiveDate, TimeZone};

use crate::core::{
    FillOutcome, ScrollOutcome, VisibleRange, WeekSpan, generate_dates, group_weeks,
};
use crate::error::TimelineResult;

use super::{AppointmentStore, TimelineEngine};

impl<S: AppointmentStore, Tz: TimeZone + Copy> TimelineEngine<S, Tz> {
    /// Records the container width and tops up the date window to cover it.
    pub fn set_viewport_width(&mut self, width_px: f64) -> TimelineResult<FillOutcome> {
        self.window.set_viewport_width(width_px)?;
        Ok(self.ensure_initial_fill(false))
    }

    pub fn ensure_initial_fill(&mut self, force_reload: bool) -> FillOutcome {
        let fill = self.window.ensure_initial_fill(force_reload, self.metrics());
        self.emit_fill_outcome(fill);
        fill
    }

    pub fn on_scroll(
        &mut self,
        scroll_left: f64,
        client_width: f64,
        scroll_width: f64,
    ) -> ScrollOutcome {
        let previous_days = self.window.loaded_days();
        let outcome = self
            .window
            .on_scroll(scroll_left, client_width, scroll_width, self.metrics());
        self.emit_visible_range_changed();
        if outcome.load_started {
            self.emit_fill_outcome(FillOutcome {
                required_days: self.window.loaded_days(),
                previous_days,
                loaded_days: self.window.loaded_days(),
            });
        }
        outcome
    }

    /// Acknowledges that the host materialized the last requested days.
    pub fn finish_load(&mut self) {
        self.window.finish_load();
    }

    /// Returns the scroll offset the host should apply (always `0.0`).
    pub fn go_to_today(&mut self, client_width: f64) -> f64 {
        let offset = self.window.reset_to_today(client_width, self.metrics());
        self.emit_visible_range_changed();
        offset
    }

    #[must_use]
    pub fn loaded_days(&self) -> u32 {
        self.window.loaded_days()
    }

    #[must_use]
    pub fn visible_range(&self) -> VisibleRange {
        self.window.visible_range()
    }

    #[must_use]
    pub fn is_load_in_flight(&self) -> bool {
        self.window.is_load_in_flight()
    }

    #[must_use]
    pub fn is_recently_loaded(&self, day_index: usize) -> bool {
        self.window.is_recently_loaded(day_index)
    }

    /// All materialized days, starting today.
    #[must_use]
    pub fn loaded_dates(&self) -> Vec<NaiveDate> {
        generate_dates(self.today, self.window.loaded_days())
    }

    #[must_use]
    pub fn visible_dates(&self) -> Vec<NaiveDate> {
        self.window
            .filter_visible_dates(&self.loaded_dates(), self.metrics())
    }

    #[must_use]
    pub fn visible_weeks(&self) -> Vec<WeekSpan> {
        let metrics = self.metrics();
        let weeks = group_weeks(&self.loaded_dates(), metrics);
        self.window.filter_visible_weeks(&weeks, metrics)
    }
}
