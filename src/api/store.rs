use indexmap::IndexMap;

use crate::core::{Appointment, AppointmentId, AppointmentPatch};
use crate::error::{TimelineError, TimelineResult};

/// Contract implemented by the persistence collaborator.
///
/// Implementations report rejected reads/writes as
/// [`TimelineError::StoreFailure`]. The engine never patches its own view after
/// a write; it re-fetches with `list_all`.
pub trait AppointmentStore {
    fn list_all(&mut self) -> TimelineResult<Vec<Appointment>>;
    fn create(&mut self, appointment: &Appointment) -> TimelineResult<Appointment>;
    fn update(&mut self, id: &AppointmentId, patch: AppointmentPatch)
    -> TimelineResult<Appointment>;
    fn delete(&mut self, id: &AppointmentId) -> TimelineResult<()>;
}

/// In-process store used by tests, benches and headless hosts.
///
/// `offline` makes every call fail with `StoreFailure`, which is how hosts can
/// exercise the last-known-good fallback.
#[derive(Debug, Default)]
pub struct InMemoryAppointmentStore {
    appointments: IndexMap<AppointmentId, Appointment>,
    next_id: u64,
    pub offline: bool,
    pub write_count: usize,
}

impl InMemoryAppointmentStore {
    /// Seeds the store; drafts without an id are assigned one.
    #[must_use]
    pub fn with_appointments(appointments: impl IntoIterator<Item = Appointment>) -> Self {
        let mut store = Self::default();
        for appointment in appointments {
            store.insert(appointment);
        }
        store
    }

    fn insert(&mut self, mut appointment: Appointment) -> Appointment {
        let id = match appointment.id.clone() {
            Some(id) => id,
            None => {
                self.next_id += 1;
                AppointmentId::new(format!("appt-{}", self.next_id))
            }
        };
        appointment.id = Some(id.clone());
        self.appointments.insert(id, appointment.clone());
        appointment
    }

    #[must_use]
    pub fn get(&self, id: &AppointmentId) -> Option<&Appointment> {
        self.appointments.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }

    fn ensure_online(&self) -> TimelineResult<()> {
        if self.offline {
            return Err(TimelineError::StoreFailure("store is offline".to_owned()));
        }
        Ok(())
    }
}

impl AppointmentStore for InMemoryAppointmentStore {
    fn list_all(&mut self) -> TimelineResult<Vec<Appointment>> {
        self.ensure_online()?;
        Ok(self.appointments.values().cloned().collect())
    }

    fn create(&mut self, appointment: &Appointment) -> TimelineResult<Appointment> {
        self.ensure_online()?;
        self.write_count += 1;
        let mut draft = appointment.clone();
        draft.id = None;
        Ok(self.insert(draft))
    }

    fn update(
        &mut self,
        id: &AppointmentId,
        patch: AppointmentPatch,
    ) -> TimelineResult<Appointment> {
        self.ensure_online()?;
        let existing = self
            .appointments
            .get(id)
            .ok_or_else(|| TimelineError::StoreFailure(format!("unknown appointment `{id}`")))?;
        let updated = existing
            .patched(&patch)
            .map_err(|err| TimelineError::StoreFailure(err.to_string()))?;
        self.write_count += 1;
        self.appointments.insert(id.clone(), updated.clone());
        Ok(updated)
    }

    fn delete(&mut self, id: &AppointmentId) -> TimelineResult<()> {
        self.ensure_online()?;
        self.appointments
            .shift_remove(id)
            .ok_or_else(|| TimelineError::StoreFailure(format!("unknown appointment `{id}`")))?;
        self.write_count += 1;
        Ok(())
    }
}
