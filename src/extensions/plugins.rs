use serde::{Deserialize, Serialize};

use crate::core::{TimeScale, VisibleRange};
use crate::interaction::InteractionMode;

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PluginContext {
    pub scale: TimeScale,
    pub layout_epoch: u64,
    pub visible_range: VisibleRange,
    pub loaded_days: u32,
    pub appointments_len: usize,
    pub interaction_mode: InteractionMode,
}

/// Events emitted by the timeline engine, in the order they happen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TimelineEvent {
    AppointmentsReloaded { count: usize },
    ScaleChanged { previous: TimeScale, current: TimeScale },
    VisibleRangeChanged { start: f64, end: f64 },
    DaysLoaded { previous: u32, loaded: u32 },
    GestureStarted { mode: InteractionMode },
    GestureEnded { persisted: bool },
    AppointmentSaved,
    StoreFailed,
}

/// Observer hook for bounded host logic (analytics, UI notifications).
pub trait TimelinePlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: TimelineEvent, context: PluginContext);
}
