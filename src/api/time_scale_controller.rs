use chrono::TimeZone;
use tracing::debug;

use crate::core::{ScaleChange, TimeScale};
use crate::error::TimelineResult;
use crate::extensions::TimelineEvent;

use super::{AppointmentStore, TimelineEngine};

impl<S: AppointmentStore, Tz: TimeZone + Copy> TimelineEngine<S, Tz> {
    /// Epoch stamped on geometry; bumped by every scale change.
    #[must_use]
    pub fn layout_epoch(&self) -> u64 {
        self.scales.epoch()
    }

    /// Switches the active scale and re-lays out from scratch.
    ///
    /// Any running gesture is dropped, the date window is force-refilled for
    /// the new scale and the visible range falls back to its default.
    pub fn set_scale(&mut self, scale: TimeScale) -> ScaleChange {
        let change = self.scales.set_scale(scale);
        if self.gesture.take().is_some() {
            debug!("gesture cancelled by scale change");
        }
        let fill = self.window.on_scale_changed(self.metrics());
        debug!(
            previous = %change.previous,
            current = %change.current,
            epoch = change.epoch,
            loaded_days = fill.loaded_days,
            "scale changed"
        );

        self.emit_plugin_event(TimelineEvent::ScaleChanged {
            previous: change.previous,
            current: change.current,
        });
        self.emit_fill_outcome(fill);
        self.emit_visible_range_changed();
        change
    }

    /// Same as [`set_scale`](Self::set_scale) for a scale name such as `"halfHour"`.
    pub fn set_scale_by_name(&mut self, name: &str) -> TimelineResult<ScaleChange> {
        let scale = name.parse::<TimeScale>()?;
        Ok(self.set_scale(scale))
    }
}
