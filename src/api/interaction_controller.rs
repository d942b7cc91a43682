use chrono::TimeZone;
use tracing::{debug, trace};

use crate::core::primitives::midnight_timestamp;
use crate::core::{Appointment, AppointmentPatch};
use crate::error::TimelineResult;
use crate::extensions::TimelineEvent;
use crate::interaction::{DragResizeController, GestureBounds, GestureOutcome, InteractionMode};

use super::engine::ActiveGesture;
use super::{AppointmentStore, TimelineEngine};

impl<S: AppointmentStore, Tz: TimeZone + Copy> TimelineEngine<S, Tz> {
    /// Pointer-down on an appointment body. Replaces any running gesture.
    pub fn pointer_down_drag(
        &mut self,
        appointment: &Appointment,
        pointer_x: f64,
    ) -> TimelineResult<()> {
        self.begin_gesture(appointment, pointer_x, InteractionMode::Dragging)
    }

    /// Pointer-down on an appointment's resize handle.
    pub fn pointer_down_resize(
        &mut self,
        appointment: &Appointment,
        pointer_x: f64,
    ) -> TimelineResult<()> {
        self.begin_gesture(appointment, pointer_x, InteractionMode::Resizing)
    }

    fn begin_gesture(
        &mut self,
        appointment: &Appointment,
        pointer_x: f64,
        mode: InteractionMode,
    ) -> TimelineResult<()> {
        let geometry = self.geometry_for(appointment)?;
        let mut controller = DragResizeController::default();
        match mode {
            InteractionMode::Resizing => controller.begin_resize(pointer_x, geometry),
            _ => controller.begin_drag(pointer_x, geometry),
        }
        if self.gesture.is_some() {
            trace!("replacing stale gesture");
        }
        self.gesture = Some(ActiveGesture {
            appointment: appointment.clone(),
            controller,
        });
        debug!(?mode, asset = %appointment.asset_id, pointer_x, "gesture started");
        self.emit_plugin_event(TimelineEvent::GestureStarted { mode });
        Ok(())
    }

    /// Feeds pointer motion to the running gesture and returns the snapped
    /// left (drag) or width (resize). `None` when no gesture is running.
    pub fn pointer_move(
        &mut self,
        current_x: f64,
        container_width: f64,
    ) -> TimelineResult<Option<f64>> {
        let bounds = GestureBounds::new(container_width, self.mapper.cell_width_px())?;
        Ok(self
            .gesture
            .as_mut()
            .and_then(|gesture| gesture.controller.pointer_move(current_x, bounds)))
    }

    /// Ends the gesture and persists the result when the timestamps changed.
    ///
    /// Returns `Ok(true)` only when the store accepted the change. A draft
    /// without id fails with `MissingIdentity` before the store is called.
    pub fn pointer_up(&mut self) -> TimelineResult<bool> {
        let Some(mut gesture) = self.gesture.take() else {
            return Ok(false);
        };
        let outcome = gesture.controller.pointer_up();
        let patch = self.patch_for_outcome(&gesture.appointment, outcome)?;

        let persisted = match patch {
            Some(patch) => self.save_appointment_patch(&gesture.appointment, patch)?,
            None => {
                trace!(?outcome, "gesture left timestamps unchanged");
                false
            }
        };
        debug!(?outcome, persisted, "gesture ended");
        self.emit_plugin_event(TimelineEvent::GestureEnded { persisted });
        Ok(persisted)
    }

    /// Drops the running gesture without persisting. Returns `true` if one was
    /// running.
    pub fn cancel_gesture(&mut self) -> bool {
        let cancelled = self.gesture.take().is_some();
        if cancelled {
            self.emit_plugin_event(TimelineEvent::GestureEnded { persisted: false });
        }
        cancelled
    }

    fn patch_for_outcome(
        &self,
        appointment: &Appointment,
        outcome: GestureOutcome,
    ) -> TimelineResult<Option<AppointmentPatch>> {
        let scale = self.scales.scale();
        match outcome {
            GestureOutcome::None => Ok(None),
            GestureOutcome::Moved { left, .. } => {
                let day_start = midnight_timestamp(&self.mapper.tz(), self.today);
                let start = self.mapper.timestamp_from_position(
                    left,
                    scale,
                    day_start,
                    appointment.start_time,
                )?;
                Ok((start != appointment.start_time).then(|| {
                    AppointmentPatch::interval(start, start + appointment.duration_secs())
                }))
            }
            GestureOutcome::Resized { width, .. } => {
                let end = self.mapper.end_time_from_width(
                    appointment.start_time,
                    width,
                    scale,
                    appointment.end_time,
                )?;
                Ok((end != appointment.end_time).then(|| AppointmentPatch::end(end)))
            }
        }
    }
}
