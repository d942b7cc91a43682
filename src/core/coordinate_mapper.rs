use chrono::{Local, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use crate::core::primitives::{
    day_offset, from_local, local_date, minutes_since_midnight, shift_days, to_local,
};
use crate::core::scale::{MINUTES_PER_DAY, SECONDS_PER_DAY, TimeScale};
use crate::core::types::{Appointment, EntityGeometry, validate_interval};
use crate::error::{TimelineError, TimelineResult};

/// Pixels removed from every entity width for the grid border.
pub const DEFAULT_BORDER_INSET_PX: f64 = 2.0;

/// Floor applied to day-scale widths and resize durations, in days.
pub const MIN_DAY_FRACTION: f64 = 0.25;

const WHOLE_DAY_EPSILON: f64 = 1e-9;

/// Tolerance, in days, for treating a position as the exact rendered left of
/// the original clock time.
const CLOCK_ALIGNED_EPSILON: f64 = 1e-6;

/// Scale-dependent pixel metrics shared with date virtualization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleMetrics {
    pub scale: TimeScale,
    pub cell_width_px: f64,
    pub pixels_per_day: f64,
    pub border_inset_px: f64,
}

/// Single source of truth for time <-> pixel translation.
///
/// Pixel `0` is local midnight of a reference day. All calendar arithmetic
/// uses the wall clock of `Tz`; daylight-saving transitions are not
/// compensated.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateMapper<Tz: TimeZone = Local> {
    tz: Tz,
    cell_width_px: f64,
    border_inset_px: f64,
}

impl<Tz: TimeZone + Copy> CoordinateMapper<Tz> {
    pub fn new(tz: Tz, cell_width_px: f64) -> TimelineResult<Self> {
        if !cell_width_px.is_finite() || cell_width_px <= 0.0 {
            return Err(TimelineError::InvalidCellWidth(cell_width_px));
        }
        Ok(Self {
            tz,
            cell_width_px,
            border_inset_px: DEFAULT_BORDER_INSET_PX,
        })
    }

    pub fn with_border_inset(mut self, border_inset_px: f64) -> TimelineResult<Self> {
        if !border_inset_px.is_finite() || border_inset_px < 0.0 {
            return Err(TimelineError::InvalidData(
                "border inset must be finite and >= 0".to_owned(),
            ));
        }
        self.border_inset_px = border_inset_px;
        Ok(self)
    }

    #[must_use]
    pub fn tz(&self) -> Tz {
        self.tz
    }

    #[must_use]
    pub fn cell_width_px(&self) -> f64 {
        self.cell_width_px
    }

    #[must_use]
    pub fn border_inset_px(&self) -> f64 {
        self.border_inset_px
    }

    #[must_use]
    pub fn metrics(&self, scale: TimeScale) -> ScaleMetrics {
        ScaleMetrics {
            scale,
            cell_width_px: self.cell_width_px,
            pixels_per_day: self.pixels_per_day(scale),
            border_inset_px: self.border_inset_px,
        }
    }

    /// Pixels occupied by one calendar day.
    #[must_use]
    pub fn pixels_per_day(&self, scale: TimeScale) -> f64 {
        self.cell_width_px * scale.cells_per_day()
    }

    #[must_use]
    pub fn pixels_per_minute(&self, scale: TimeScale) -> f64 {
        self.cell_width_px / f64::from(scale.cell_duration_minutes())
    }

    /// Horizontal position of `timestamp` relative to local midnight of
    /// `reference_day`.
    ///
    /// Week scale places the day offset at week granularity (`day_offset / 7`
    /// cells) and then adds the within-day offset like every other scale.
    pub fn left(
        &self,
        timestamp: i64,
        scale: TimeScale,
        reference_day: NaiveDate,
    ) -> TimelineResult<f64> {
        let local = to_local(&self.tz, timestamp)?;
        let days = day_offset(local.date(), reference_day) as f64;
        let day_part = match scale {
            TimeScale::Week => (days / 7.0) * self.cell_width_px,
            _ => days * self.pixels_per_day(scale),
        };
        Ok(day_part + f64::from(minutes_since_midnight(local)) * self.pixels_per_minute(scale))
    }

    /// Rendered width of `[start, end)` minus the border inset.
    ///
    /// Duration is measured in elapsed time and expressed in scale units:
    /// fractional cells for sub-day scales, day fraction floored at a quarter
    /// cell for day scale, whole weeks (rounded up) for week scale. The raw
    /// width is clamped at zero before the inset, so the result is never below
    /// `-border_inset_px`.
    #[must_use]
    pub fn width(&self, start: i64, end: i64, scale: TimeScale) -> f64 {
        let minutes = (end - start) as f64 / 60.0;
        let cell_minutes = f64::from(scale.cell_duration_minutes());
        let units = match scale {
            TimeScale::HalfHour | TimeScale::Hour => minutes / cell_minutes,
            TimeScale::Day => (minutes / cell_minutes).max(MIN_DAY_FRACTION),
            TimeScale::Week => (minutes / cell_minutes).ceil(),
        };
        (units * self.cell_width_px).max(0.0) - self.border_inset_px
    }

    pub fn geometry(
        &self,
        appointment: &Appointment,
        scale: TimeScale,
        reference_day: NaiveDate,
        epoch: u64,
    ) -> TimelineResult<EntityGeometry> {
        Ok(EntityGeometry {
            left: self.left(appointment.start_time, scale, reference_day)?,
            width: self.width(appointment.start_time, appointment.end_time, scale),
            epoch,
        })
    }

    /// Inverse of [`left`](Self::left) for a snapped drag position.
    ///
    /// Sub-day scales split `position_x` into a day offset and a slot of the
    /// day, and return the slot boundary (minutes below the slot and seconds
    /// zeroed). Day and week scales round to the nearest whole day and keep the
    /// time of day of `original_timestamp`, so moving an appointment across
    /// days never changes its clock time. A position that is exactly the
    /// rendered left of that clock time on some day resolves to that day.
    pub fn timestamp_from_position(
        &self,
        position_x: f64,
        scale: TimeScale,
        day_start_timestamp: i64,
        original_timestamp: i64,
    ) -> TimelineResult<i64> {
        if !position_x.is_finite() {
            return Err(TimelineError::InvalidData(
                "position must be finite".to_owned(),
            ));
        }
        let day_start = local_date(&self.tz, day_start_timestamp)?;

        let local = if scale.is_sub_day() {
            let slots_per_day = scale.cells_per_day().round() as i64;
            let slots = (position_x / self.cell_width_px).floor() as i64;
            let date = shift_days(day_start, slots.div_euclid(slots_per_day))?;
            let minutes = slots.rem_euclid(slots_per_day) * i64::from(scale.cell_duration_minutes());
            date.and_hms_opt((minutes / 60) as u32, (minutes % 60) as u32, 0)
                .ok_or_else(|| {
                    TimelineError::InvalidData(format!("slot minute {minutes} out of day"))
                })?
        } else {
            let original = to_local(&self.tz, original_timestamp)?;
            let units = position_x / self.pixels_per_day(scale);
            let clock_aligned = units
                - f64::from(minutes_since_midnight(original)) / f64::from(MINUTES_PER_DAY);
            let days = if (clock_aligned - clock_aligned.round()).abs() < CLOCK_ALIGNED_EPSILON {
                clock_aligned.round()
            } else {
                units.round()
            };
            shift_days(day_start, days as i64)?.and_time(original.time())
        };

        Ok(from_local(&self.tz, local))
    }

    /// Inverse of [`width`](Self::width) for a snapped resize.
    ///
    /// Sub-day scales add the fractional cell duration to `start_time`. Day and
    /// week scales convert the width into days (at least a quarter day) and
    /// advance the start date by the whole days. An exact whole-day duration
    /// keeps the clock time of `original_end_time`; a fractional remainder is
    /// added as proportional hours instead.
    pub fn end_time_from_width(
        &self,
        start_time: i64,
        width_px: f64,
        scale: TimeScale,
        original_end_time: i64,
    ) -> TimelineResult<i64> {
        if !width_px.is_finite() {
            return Err(TimelineError::InvalidData("width must be finite".to_owned()));
        }

        let end_time = if scale.is_sub_day() {
            let cells = width_px / self.cell_width_px;
            let seconds = cells * f64::from(scale.cell_duration_minutes()) * 60.0;
            offset_timestamp(start_time, seconds)?
        } else {
            let days = (width_px / self.pixels_per_day(scale)).max(MIN_DAY_FRACTION);
            let nearest = days.round();
            let start_local = to_local(&self.tz, start_time)?;

            if (days - nearest).abs() < WHOLE_DAY_EPSILON {
                let end_of_day = to_local(&self.tz, original_end_time)?.time();
                let date = shift_days(start_local.date(), nearest as i64)?;
                from_local(&self.tz, date.and_time(end_of_day))
            } else {
                let whole_days = days.floor();
                let advanced = shift_days(start_local.date(), whole_days as i64)?
                    .and_time(start_local.time());
                let extra = (days - whole_days) * SECONDS_PER_DAY as f64;
                offset_timestamp(from_local(&self.tz, advanced), extra)?
            }
        };

        validate_interval(start_time, end_time)?;
        Ok(end_time)
    }
}

fn offset_timestamp(timestamp: i64, seconds: f64) -> TimelineResult<i64> {
    let seconds = seconds.round();
    if seconds.abs() >= i64::MAX as f64 {
        return Err(TimelineError::InvalidData(format!(
            "offset of {seconds} seconds is out of range"
        )));
    }
    timestamp.checked_add(seconds as i64).ok_or_else(|| {
        TimelineError::InvalidData(format!(
            "offset of {seconds} seconds from {timestamp} overflows"
        ))
    })
}
