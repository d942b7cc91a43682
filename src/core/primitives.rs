use chrono::{
    Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Timelike,
};

use crate::error::{TimelineError, TimelineResult};

/// Converts epoch seconds into wall-clock time of `tz`.
pub fn to_local<Tz: TimeZone>(tz: &Tz, timestamp: i64) -> TimelineResult<NaiveDateTime> {
    tz.timestamp_opt(timestamp, 0)
        .single()
        .map(|dt| dt.naive_local())
        .ok_or(TimelineError::InvalidTimestamp(timestamp))
}

/// Converts wall-clock time of `tz` back into epoch seconds.
///
/// Ambiguous wall-clock times resolve to the earliest instant. Times inside a
/// DST gap are shifted by the offset in effect at the matching UTC instant;
/// daylight-saving transitions are not otherwise compensated.
#[must_use]
pub fn from_local<Tz: TimeZone>(tz: &Tz, local: NaiveDateTime) -> i64 {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt.timestamp(),
        LocalResult::Ambiguous(earliest, _) => earliest.timestamp(),
        LocalResult::None => {
            let offset = tz.offset_from_utc_datetime(&local).fix().local_minus_utc();
            local.and_utc().timestamp() - i64::from(offset)
        }
    }
}

/// Epoch seconds of local midnight starting `date`.
#[must_use]
pub fn midnight_timestamp<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> i64 {
    from_local(tz, date.and_time(NaiveTime::MIN))
}

/// Local calendar date containing `timestamp`.
pub fn local_date<Tz: TimeZone>(tz: &Tz, timestamp: i64) -> TimelineResult<NaiveDate> {
    to_local(tz, timestamp).map(|local| local.date())
}

/// Whole minutes elapsed since local midnight; seconds are ignored.
#[must_use]
pub fn minutes_since_midnight(local: NaiveDateTime) -> u32 {
    local.hour() * 60 + local.minute()
}

/// Signed number of calendar days from `reference` to `date`.
#[must_use]
pub fn day_offset(date: NaiveDate, reference: NaiveDate) -> i64 {
    (date - reference).num_days()
}

/// Shifts `date` by a signed number of days.
pub fn shift_days(date: NaiveDate, days: i64) -> TimelineResult<NaiveDate> {
    Duration::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .ok_or_else(|| TimelineError::InvalidData(format!("cannot shift {date} by {days} days")))
}
