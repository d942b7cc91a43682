use std::collections::HashSet;

use chrono::{Local, NaiveDate, TimeZone};

use crate::core::{
    Appointment, CoordinateMapper, ScaleMetrics, ScaleRegistry, TimeScale, VirtualWindow,
};
use crate::extensions::TimelinePlugin;
use crate::interaction::{DragResizeController, InteractionMode};

use super::{AppointmentBook, AppointmentStore, TimelineEngineConfig};

/// Gesture in progress together with the appointment snapshot it started from.
#[derive(Debug, Clone)]
pub(super) struct ActiveGesture {
    pub(super) appointment: Appointment,
    pub(super) controller: DragResizeController,
}

/// Main orchestration facade consumed by host applications.
///
/// `TimelineEngine` owns the active scale, the date window, the appointment
/// snapshot and the running gesture, and forwards persistence to `S`. All
/// calendar math runs in `Tz`.
pub struct TimelineEngine<S: AppointmentStore, Tz: TimeZone + Copy = Local> {
    pub(super) store: S,
    pub(super) config: TimelineEngineConfig,
    pub(super) mapper: CoordinateMapper<Tz>,
    pub(super) scales: ScaleRegistry,
    pub(super) window: VirtualWindow,
    pub(super) book: AppointmentBook,
    pub(super) gesture: Option<ActiveGesture>,
    pub(super) collapsed_groups: HashSet<String>,
    pub(super) plugins: Vec<Box<dyn TimelinePlugin>>,
    pub(super) today: NaiveDate,
}

impl<S: AppointmentStore, Tz: TimeZone + Copy> TimelineEngine<S, Tz> {
    #[must_use]
    pub fn config(&self) -> &TimelineEngineConfig {
        &self.config
    }

    #[must_use]
    pub fn mapper(&self) -> &CoordinateMapper<Tz> {
        &self.mapper
    }

    /// Metrics of the active scale.
    #[must_use]
    pub fn metrics(&self) -> ScaleMetrics {
        self.mapper.metrics(self.scales.scale())
    }

    #[must_use]
    pub fn scale(&self) -> TimeScale {
        self.scales.scale()
    }

    /// Day at pixel offset zero.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.gesture
            .as_ref()
            .map_or(InteractionMode::Idle, |gesture| gesture.controller.mode())
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }
}
