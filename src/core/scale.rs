use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};

pub const MINUTES_PER_DAY: u32 = 24 * 60;
pub const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Time granularity of one timeline grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimeScale {
    HalfHour,
    Hour,
    Day,
    Week,
}

/// Per-scale configuration row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleSpec {
    /// Minutes represented by one grid cell.
    pub cell_duration_minutes: u32,
    /// Legacy scale value: a quarter of the cell duration in minutes.
    pub legacy_value: f64,
    /// Lookahead class used by date virtualization.
    pub coarse: bool,
}

const SCALE_TABLE: [(TimeScale, ScaleSpec); 4] = [
    (
        TimeScale::HalfHour,
        ScaleSpec {
            cell_duration_minutes: 30,
            legacy_value: 7.5,
            coarse: false,
        },
    ),
    (
        TimeScale::Hour,
        ScaleSpec {
            cell_duration_minutes: 60,
            legacy_value: 15.0,
            coarse: false,
        },
    ),
    (
        TimeScale::Day,
        ScaleSpec {
            cell_duration_minutes: MINUTES_PER_DAY,
            legacy_value: 360.0,
            coarse: false,
        },
    ),
    (
        TimeScale::Week,
        ScaleSpec {
            cell_duration_minutes: 7 * MINUTES_PER_DAY,
            legacy_value: 2520.0,
            coarse: true,
        },
    ),
];

impl TimeScale {
    pub const ALL: [Self; 4] = [Self::HalfHour, Self::Hour, Self::Day, Self::Week];

    #[must_use]
    pub fn spec(self) -> ScaleSpec {
        let row = match self {
            Self::HalfHour => 0,
            Self::Hour => 1,
            Self::Day => 2,
            Self::Week => 3,
        };
        SCALE_TABLE[row].1
    }

    #[must_use]
    pub fn cell_duration_minutes(self) -> u32 {
        self.spec().cell_duration_minutes
    }

    /// Number of grid cells covering one calendar day (1/7 at week scale).
    #[must_use]
    pub fn cells_per_day(self) -> f64 {
        f64::from(MINUTES_PER_DAY) / f64::from(self.cell_duration_minutes())
    }

    /// `true` when one cell is shorter than a day.
    #[must_use]
    pub fn is_sub_day(self) -> bool {
        self.cell_duration_minutes() < MINUTES_PER_DAY
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::HalfHour => "halfHour",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
        }
    }

    /// Resolves the numeric scale values used by older timeline hosts.
    pub fn from_legacy_value(value: f64) -> TimelineResult<Self> {
        SCALE_TABLE
            .iter()
            .find(|(_, spec)| spec.legacy_value == value)
            .map(|(scale, _)| *scale)
            .ok_or_else(|| TimelineError::InvalidScale(value.to_string()))
    }
}

impl fmt::Display for TimeScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TimeScale {
    type Err = TimelineError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalized: String = input
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "halfhour" => Ok(Self::HalfHour),
            "hour" => Ok(Self::Hour),
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            _ => Err(TimelineError::InvalidScale(input.to_owned())),
        }
    }
}

/// Notification produced by [`ScaleRegistry::set_scale`].
///
/// Every geometry computed under `previous` must be recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleChange {
    pub previous: TimeScale,
    pub current: TimeScale,
    pub epoch: u64,
}

impl ScaleChange {
    #[must_use]
    pub fn is_noop(self) -> bool {
        self.previous == self.current
    }
}

/// Holds the active scale.
///
/// The registry is owned by whoever drives layout and passed explicitly; it is
/// not process-global. `epoch` increments on every `set_scale` so geometry
/// stamped with an older epoch can be detected as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleRegistry {
    current: TimeScale,
    epoch: u64,
}

impl Default for ScaleRegistry {
    fn default() -> Self {
        Self::new(TimeScale::Hour)
    }
}

impl ScaleRegistry {
    #[must_use]
    pub fn new(initial: TimeScale) -> Self {
        Self {
            current: initial,
            epoch: 0,
        }
    }

    #[must_use]
    pub fn scale(self) -> TimeScale {
        self.current
    }

    #[must_use]
    pub fn epoch(self) -> u64 {
        self.epoch
    }

    /// Sets the active scale. Never rejected; re-setting the same scale still
    /// counts as a notification point and bumps the epoch.
    pub fn set_scale(&mut self, scale: TimeScale) -> ScaleChange {
        let previous = self.current;
        self.current = scale;
        self.epoch += 1;
        ScaleChange {
            previous,
            current: scale,
            epoch: self.epoch,
        }
    }

    /// Parses `name` and sets it. Unknown names fail with `InvalidScale` and
    /// leave the registry untouched.
    pub fn set_scale_by_name(&mut self, name: &str) -> TimelineResult<ScaleChange> {
        let scale = name.parse::<TimeScale>()?;
        Ok(self.set_scale(scale))
    }
}
