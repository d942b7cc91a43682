use tracing::{debug, warn};

use crate::core::{
    Appointment, AppointmentPatch, AssetClassification, AssetGroup, AvailabilityIndex,
    classify_appointments,
};
use crate::error::{TimelineError, TimelineResult};

use super::AppointmentStore;

/// Result of a store write and the re-fetch that follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOutcome {
    /// The store accepted the write.
    pub written: bool,
    /// The follow-up `list_all` succeeded; `false` keeps the pre-write snapshot.
    pub refreshed: bool,
}

impl WriteOutcome {
    const REJECTED: Self = Self {
        written: false,
        refreshed: false,
    };

    fn written(refreshed: bool) -> Self {
        Self {
            written: true,
            refreshed,
        }
    }
}

/// Last known-good appointment snapshot plus the state derived from it.
///
/// The store stays the single source of truth: every successful write is
/// followed by a full `list_all`, and a failed read keeps the previous
/// snapshot instead of clearing it.
#[derive(Debug, Clone, Default)]
pub struct AppointmentBook {
    appointments: Vec<Appointment>,
    groups: Vec<AssetGroup>,
    index: AvailabilityIndex,
}

impl AppointmentBook {
    #[must_use]
    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    #[must_use]
    pub fn groups(&self) -> &[AssetGroup] {
        &self.groups
    }

    #[must_use]
    pub fn index(&self) -> &AvailabilityIndex {
        &self.index
    }

    /// Replaces the snapshot and recomputes groups and the availability index.
    /// Records violating `start < end` are dropped.
    pub fn replace(&mut self, appointments: Vec<Appointment>, classification: &AssetClassification) {
        let received = appointments.len();
        let appointments: Vec<Appointment> = appointments
            .into_iter()
            .filter(|appointment| appointment.start_time < appointment.end_time)
            .collect();
        if appointments.len() != received {
            warn!(
                dropped = received - appointments.len(),
                "dropping appointments with start >= end"
            );
        }
        self.groups = classify_appointments(&appointments, classification);
        self.index = AvailabilityIndex::new(&appointments);
        self.appointments = appointments;
        debug!(
            count = self.appointments.len(),
            groups = self.groups.len(),
            "appointment snapshot replaced"
        );
    }

    /// Re-fetches from `store`. Returns `false` and keeps the previous snapshot
    /// when the store fails.
    pub fn refresh<S: AppointmentStore>(
        &mut self,
        store: &mut S,
        classification: &AssetClassification,
    ) -> bool {
        match store.list_all() {
            Ok(appointments) => {
                self.replace(appointments, classification);
                true
            }
            Err(err) => {
                warn!(
                    error = %err,
                    kept = self.appointments.len(),
                    "appointment reload failed; keeping last known-good set"
                );
                false
            }
        }
    }

    /// Sends `patch` for `appointment` and re-fetches on success.
    ///
    /// `MissingIdentity` is returned before the store is touched; store
    /// failures surface as an unwritten outcome.
    pub fn save_patch<S: AppointmentStore>(
        &mut self,
        store: &mut S,
        appointment: &Appointment,
        patch: AppointmentPatch,
        classification: &AssetClassification,
    ) -> TimelineResult<WriteOutcome> {
        let id = appointment.id.as_ref().ok_or(TimelineError::MissingIdentity)?;
        if patch.is_empty() {
            return Ok(WriteOutcome::REJECTED);
        }
        match store.update(id, patch) {
            Ok(_) => {
                debug!(id = %id, ?patch, "appointment updated");
                Ok(WriteOutcome::written(self.refresh(store, classification)))
            }
            Err(err) => {
                warn!(error = %err, id = %id, "appointment update failed");
                Ok(WriteOutcome::REJECTED)
            }
        }
    }

    pub fn create<S: AppointmentStore>(
        &mut self,
        store: &mut S,
        appointment: &Appointment,
        classification: &AssetClassification,
    ) -> WriteOutcome {
        match store.create(appointment) {
            Ok(created) => {
                debug!(id = ?created.id, asset = %created.asset_id, "appointment created");
                WriteOutcome::written(self.refresh(store, classification))
            }
            Err(err) => {
                warn!(error = %err, asset = %appointment.asset_id, "appointment create failed");
                WriteOutcome::REJECTED
            }
        }
    }

    pub fn delete<S: AppointmentStore>(
        &mut self,
        store: &mut S,
        appointment: &Appointment,
        classification: &AssetClassification,
    ) -> TimelineResult<WriteOutcome> {
        let id = appointment.id.as_ref().ok_or(TimelineError::MissingIdentity)?;
        match store.delete(id) {
            Ok(()) => {
                debug!(id = %id, "appointment deleted");
                Ok(WriteOutcome::written(self.refresh(store, classification)))
            }
            Err(err) => {
                warn!(error = %err, id = %id, "appointment delete failed");
                Ok(WriteOutcome::REJECTED)
            }
        }
    }
}
