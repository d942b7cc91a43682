use chrono::TimeZone;

use crate::core::{Appointment, EntityGeometry, layout_visible, project_appointments};
use crate::error::TimelineResult;

use super::{AppointmentStore, TimelineEngine};

impl<S: AppointmentStore, Tz: TimeZone + Copy> TimelineEngine<S, Tz> {
    /// Geometry of `appointment` under the active scale, stamped with the
    /// current layout epoch.
    pub fn geometry_for(&self, appointment: &Appointment) -> TimelineResult<EntityGeometry> {
        self.mapper.geometry(
            appointment,
            self.scales.scale(),
            self.today,
            self.scales.epoch(),
        )
    }
}

impl<S: AppointmentStore, Tz: TimeZone + Copy + Sync> TimelineEngine<S, Tz> {
    /// Geometry for the whole snapshot, in snapshot order.
    pub fn layout_all(&self) -> TimelineResult<Vec<EntityGeometry>> {
        project_appointments(
            self.book.appointments(),
            &self.mapper,
            self.scales.scale(),
            self.today,
            self.scales.epoch(),
        )
    }

    /// Appointments intersecting the visible range, ordered by left edge.
    pub fn visible_layout(&self) -> TimelineResult<Vec<(&Appointment, EntityGeometry)>> {
        layout_visible(
            self.book.appointments(),
            &self.mapper,
            self.scales.scale(),
            self.today,
            self.scales.epoch(),
            self.window.visible_range(),
        )
    }
}
