use std::collections::HashMap;

use chrono::{NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::asset_groups::AssetGroup;
use crate::core::primitives::midnight_timestamp;
use crate::core::types::Appointment;

pub const HOURS_PER_DAY: usize = 24;
const SECONDS_PER_HOUR: i64 = 3600;

/// Free-asset count for each hour of a day, indexed by hour (0..24).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyAvailability([usize; HOURS_PER_DAY]);

impl HourlyAvailability {
    #[must_use]
    pub fn free_at(&self, hour: usize) -> Option<usize> {
        self.0.get(hour).copied()
    }

    #[must_use]
    pub fn as_array(&self) -> &[usize; HOURS_PER_DAY] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0.iter().copied().enumerate()
    }
}

type Intervals = SmallVec<[(i64, i64); 4]>;

/// Per-asset booked intervals built from one appointment snapshot.
///
/// Intervals are half-open `[start, end)`. The index borrows nothing, so it
/// can outlive the snapshot it was built from; rebuild it whenever the
/// appointment set changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AvailabilityIndex {
    by_asset: HashMap<String, Intervals>,
}

impl AvailabilityIndex {
    #[must_use]
    pub fn new(appointments: &[Appointment]) -> Self {
        let mut by_asset: HashMap<String, Intervals> = HashMap::new();
        for appointment in appointments {
            by_asset
                .entry(appointment.asset_id.clone())
                .or_default()
                .push((appointment.start_time, appointment.end_time));
        }
        for intervals in by_asset.values_mut() {
            intervals.sort_unstable();
        }
        Self { by_asset }
    }

    fn intervals(&self, asset_id: &str) -> &[(i64, i64)] {
        self.by_asset
            .get(asset_id)
            .map(|intervals| intervals.as_slice())
            .unwrap_or_default()
    }

    /// `true` if `asset_id` has a booking with `existing.start < end` and
    /// `existing.end > start`. Touching endpoints do not overlap.
    #[must_use]
    pub fn has_overlap(&self, asset_id: &str, start: i64, end: i64) -> bool {
        self.intervals(asset_id)
            .iter()
            .take_while(|(existing_start, _)| *existing_start < end)
            .any(|(_, existing_end)| *existing_end > start)
    }

    #[must_use]
    pub fn is_free_at(&self, asset_id: &str, instant: i64) -> bool {
        !self
            .intervals(asset_id)
            .iter()
            .take_while(|(existing_start, _)| *existing_start <= instant)
            .any(|(_, existing_end)| instant < *existing_end)
    }

    /// First asset of `group`, in list order, free over `[start, end)`.
    #[must_use]
    pub fn find_available_asset<'g>(
        &self,
        group: &'g AssetGroup,
        start: i64,
        end: i64,
    ) -> Option<&'g str> {
        group
            .asset_ids
            .iter()
            .map(String::as_str)
            .find(|asset_id| !self.has_overlap(asset_id, start, end))
    }

    /// `true` if any asset of `group` has no booking covering `instant`.
    #[must_use]
    pub fn is_available_at(&self, group: &AssetGroup, instant: i64) -> bool {
        group
            .asset_ids
            .iter()
            .any(|asset_id| self.is_free_at(asset_id, instant))
    }

    #[must_use]
    pub fn free_count_at(&self, group: &AssetGroup, instant: i64) -> usize {
        group
            .asset_ids
            .iter()
            .filter(|asset_id| self.is_free_at(asset_id, instant))
            .count()
    }

    /// Free-asset count at each whole hour of `day`, sampled at local
    /// midnight plus `h * 3600` seconds.
    #[must_use]
    pub fn availability_by_hour<Tz: TimeZone>(
        &self,
        group: &AssetGroup,
        day: NaiveDate,
        tz: &Tz,
    ) -> HourlyAvailability {
        let midnight = midnight_timestamp(tz, day);
        let mut counts = [0; HOURS_PER_DAY];
        for (hour, count) in counts.iter_mut().enumerate() {
            let instant = midnight + hour as i64 * SECONDS_PER_HOUR;
            *count = self.free_count_at(group, instant);
        }
        HourlyAvailability(counts)
    }
}

/// Slice-based overlap check for callers without an index.
#[must_use]
pub fn has_overlap(asset_id: &str, start: i64, end: i64, appointments: &[Appointment]) -> bool {
    appointments
        .iter()
        .any(|appointment| appointment.asset_id == asset_id && appointment.overlaps(start, end))
}
