use serde::{Deserialize, Serialize};

use crate::core::{AssetClassification, DEFAULT_BORDER_INSET_PX, TimeScale, WindowPolicy};
use crate::error::{TimelineError, TimelineResult};

/// Public engine bootstrap configuration.
///
/// Serializable so hosts can persist timeline setup; every field except the
/// cell width has a serde default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEngineConfig {
    #[serde(default = "default_cell_width_px")]
    pub cell_width_px: f64,
    #[serde(default = "default_initial_scale")]
    pub initial_scale: TimeScale,
    #[serde(default = "default_border_inset_px")]
    pub border_inset_px: f64,
    #[serde(default)]
    pub window_policy: WindowPolicy,
    #[serde(default)]
    pub asset_classification: AssetClassification,
}

impl Default for TimelineEngineConfig {
    fn default() -> Self {
        Self::new(default_cell_width_px())
    }
}

impl TimelineEngineConfig {
    #[must_use]
    pub fn new(cell_width_px: f64) -> Self {
        Self {
            cell_width_px,
            initial_scale: default_initial_scale(),
            border_inset_px: default_border_inset_px(),
            window_policy: WindowPolicy::default(),
            asset_classification: AssetClassification::default(),
        }
    }

    #[must_use]
    pub fn with_initial_scale(mut self, scale: TimeScale) -> Self {
        self.initial_scale = scale;
        self
    }

    /// Sets the gap subtracted from every rendered width.
    #[must_use]
    pub fn with_border_inset_px(mut self, border_inset_px: f64) -> Self {
        self.border_inset_px = border_inset_px;
        self
    }

    #[must_use]
    pub fn with_window_policy(mut self, policy: WindowPolicy) -> Self {
        self.window_policy = policy;
        self
    }

    #[must_use]
    pub fn with_asset_classification(mut self, classification: AssetClassification) -> Self {
        self.asset_classification = classification;
        self
    }

    pub fn validate(&self) -> TimelineResult<()> {
        if !self.cell_width_px.is_finite() || self.cell_width_px <= 0.0 {
            return Err(TimelineError::InvalidCellWidth(self.cell_width_px));
        }
        if !self.border_inset_px.is_finite() || self.border_inset_px < 0.0 {
            return Err(TimelineError::InvalidData(format!(
                "border inset must be finite and >= 0, got {}",
                self.border_inset_px
            )));
        }
        self.window_policy.validate()?;
        if self
            .asset_classification
            .rules
            .iter()
            .any(|rule| rule.group_id.is_empty())
            || self.asset_classification.fallback_group_id.is_empty()
        {
            return Err(TimelineError::InvalidData(
                "asset group ids must not be empty".to_owned(),
            ));
        }
        Ok(())
    }
}

fn default_cell_width_px() -> f64 {
    60.0
}

fn default_initial_scale() -> TimeScale {
    TimeScale::Hour
}

fn default_border_inset_px() -> f64 {
    DEFAULT_BORDER_INSET_PX
}
