use chrono::{NaiveDate, TimeZone};
use tracing::debug;

use crate::core::{AssetGroup, HourlyAvailability};

use super::{AppointmentStore, TimelineEngine};

impl<S: AppointmentStore, Tz: TimeZone + Copy> TimelineEngine<S, Tz> {
    /// Groups derived from the current snapshot, with host collapse state
    /// applied.
    #[must_use]
    pub fn asset_groups(&self) -> Vec<AssetGroup> {
        self.book
            .groups()
            .iter()
            .map(|group| AssetGroup {
                expanded: !self.collapsed_groups.contains(&group.id),
                ..group.clone()
            })
            .collect()
    }

    /// Flips a group's expanded flag and returns the new value, or `None` for
    /// an unknown group. Survives re-classification.
    pub fn toggle_group_expansion(&mut self, group_id: &str) -> Option<bool> {
        self.find_group(group_id)?;
        let expanded = self.collapsed_groups.remove(group_id);
        if !expanded {
            self.collapsed_groups.insert(group_id.to_owned());
        }
        debug!(group_id, expanded, "group expansion toggled");
        Some(expanded)
    }

    /// Half-open overlap check against the current snapshot.
    #[must_use]
    pub fn has_overlap(&self, asset_id: &str, start: i64, end: i64) -> bool {
        self.book.index().has_overlap(asset_id, start, end)
    }

    /// First free asset of the group for `[start, end)`, used as the default
    /// pick for a new booking.
    #[must_use]
    pub fn suggest_asset(&self, group_id: &str, start: i64, end: i64) -> Option<String> {
        let group = self.find_group(group_id)?;
        self.book
            .index()
            .find_available_asset(group, start, end)
            .map(str::to_owned)
    }

    /// `false` for unknown groups.
    #[must_use]
    pub fn is_group_available_at(&self, group_id: &str, instant: i64) -> bool {
        self.find_group(group_id)
            .is_some_and(|group| self.book.index().is_available_at(group, instant))
    }

    #[must_use]
    pub fn group_availability_by_hour(
        &self,
        group_id: &str,
        day: NaiveDate,
    ) -> Option<HourlyAvailability> {
        let tz = self.mapper.tz();
        self.find_group(group_id)
            .map(|group| self.book.index().availability_by_hour(group, day, &tz))
    }

    fn find_group(&self, group_id: &str) -> Option<&AssetGroup> {
        self.book.groups().iter().find(|group| group.id == group_id)
    }
}
