use std::collections::HashSet;

use chrono::{NaiveDate, TimeZone};
use tracing::debug;

use crate::core::{CoordinateMapper, ScaleRegistry, VirtualWindow};
use crate::error::TimelineResult;

use super::{AppointmentBook, AppointmentStore, TimelineEngine, TimelineEngineConfig};

impl<S: AppointmentStore, Tz: TimeZone + Copy> TimelineEngine<S, Tz> {
    /// Creates an engine anchored at `today` and performs the first load.
    ///
    /// A failing store is not fatal here: the engine starts with an empty
    /// appointment set and the host may retry with `refresh_appointments`.
    pub fn new(
        store: S,
        config: TimelineEngineConfig,
        tz: Tz,
        today: NaiveDate,
    ) -> TimelineResult<Self> {
        config.validate()?;
        let mapper =
            CoordinateMapper::new(tz, config.cell_width_px)?.with_border_inset(config.border_inset_px)?;
        let window = VirtualWindow::new(config.window_policy)?;
        let scales = ScaleRegistry::new(config.initial_scale);

        let mut engine = Self {
            store,
            config,
            mapper,
            scales,
            window,
            book: AppointmentBook::default(),
            gesture: None,
            collapsed_groups: HashSet::new(),
            plugins: Vec::new(),
            today,
        };

        let metrics = engine.metrics();
        let fill = engine.window.ensure_initial_fill(false, metrics);
        let loaded = engine.refresh_appointments();
        debug!(
            scale = %engine.scales.scale(),
            %today,
            loaded_days = fill.loaded_days,
            appointments_loaded = loaded,
            "timeline engine initialized"
        );
        Ok(engine)
    }
}
