use chrono::TimeZone;

use crate::core::{Appointment, AppointmentPatch};
use crate::error::TimelineResult;
use crate::extensions::TimelineEvent;

use super::{AppointmentStore, TimelineEngine, WriteOutcome};

impl<S: AppointmentStore, Tz: TimeZone + Copy> TimelineEngine<S, Tz> {
    /// Last known-good appointment set.
    #[must_use]
    pub fn appointments(&self) -> &[Appointment] {
        self.book.appointments()
    }

    /// Re-fetches everything from the store. On failure the previous set stays
    /// in place and `false` is returned.
    pub fn refresh_appointments(&mut self) -> bool {
        let refreshed = self.book.refresh(&mut self.store, &self.config.asset_classification);
        self.emit_reload_result(refreshed);
        refreshed
    }

    /// Returns `true` when the store accepted the new appointment, even if the
    /// follow-up re-fetch failed.
    pub fn create_appointment(&mut self, appointment: &Appointment) -> bool {
        let outcome =
            self.book
                .create(&mut self.store, appointment, &self.config.asset_classification);
        self.emit_write_result(outcome);
        outcome.written
    }

    /// Deletes a persisted appointment. Drafts fail with `MissingIdentity`.
    pub fn delete_appointment(&mut self, appointment: &Appointment) -> TimelineResult<bool> {
        let outcome =
            self.book
                .delete(&mut self.store, appointment, &self.config.asset_classification)?;
        self.emit_write_result(outcome);
        Ok(outcome.written)
    }

    pub(super) fn save_appointment_patch(
        &mut self,
        appointment: &Appointment,
        patch: AppointmentPatch,
    ) -> TimelineResult<bool> {
        let outcome = self.book.save_patch(
            &mut self.store,
            appointment,
            patch,
            &self.config.asset_classification,
        )?;
        self.emit_write_result(outcome);
        Ok(outcome.written)
    }

    fn emit_write_result(&mut self, outcome: WriteOutcome) {
        if outcome.written {
            self.emit_plugin_event(TimelineEvent::AppointmentSaved);
            self.emit_reload_result(outcome.refreshed);
        } else {
            self.emit_plugin_event(TimelineEvent::StoreFailed);
        }
    }

    fn emit_reload_result(&mut self, reloaded: bool) {
        let event = if reloaded {
            TimelineEvent::AppointmentsReloaded {
                count: self.book.appointments().len(),
            }
        } else {
            TimelineEvent::StoreFailed
        };
        self.emit_plugin_event(event);
    }
}
