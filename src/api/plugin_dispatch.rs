use chrono::TimeZone;

use crate::core::FillOutcome;
use crate::extensions::{PluginContext, TimelineEvent};

use super::{AppointmentStore, TimelineEngine};

impl<S: AppointmentStore, Tz: TimeZone + Copy> TimelineEngine<S, Tz> {
    #[must_use]
    pub fn plugin_context(&self) -> PluginContext {
        PluginContext {
            scale: self.scales.scale(),
            layout_epoch: self.scales.epoch(),
            visible_range: self.window.visible_range(),
            loaded_days: self.window.loaded_days(),
            appointments_len: self.book.appointments().len(),
            interaction_mode: self.interaction_mode(),
        }
    }

    pub(super) fn emit_plugin_event(&mut self, event: TimelineEvent) {
        if self.plugins.is_empty() {
            return;
        }
        let context = self.plugin_context();
        for plugin in &mut self.plugins {
            plugin.on_event(event, context);
        }
    }

    pub(super) fn emit_fill_outcome(&mut self, outcome: FillOutcome) {
        if outcome.changed() {
            self.emit_plugin_event(TimelineEvent::DaysLoaded {
                previous: outcome.previous_days,
                loaded: outcome.loaded_days,
            });
        }
    }

    pub(super) fn emit_visible_range_changed(&mut self) {
        let range = self.window.visible_range();
        self.emit_plugin_event(TimelineEvent::VisibleRangeChanged {
            start: range.start(),
            end: range.end(),
        });
    }
}
