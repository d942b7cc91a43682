use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppointmentId(String);

impl AppointmentId {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppointmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Booking of one asset over `[start_time, end_time)`, in epoch seconds.
///
/// Values are snapshots: interactions produce a new appointment (or a patch)
/// instead of mutating fields in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    /// `None` for drafts not yet stored.
    #[serde(default, rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<AppointmentId>,
    #[serde(rename = "asset")]
    pub asset_id: String,
    pub start_time: i64,
    pub end_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Appointment {
    /// Creates an unsaved draft. Fails unless `start_time < end_time`.
    pub fn new(asset_id: impl Into<String>, start_time: i64, end_time: i64) -> TimelineResult<Self> {
        validate_interval(start_time, end_time)?;
        Ok(Self {
            id: None,
            asset_id: asset_id.into(),
            start_time,
            end_time,
            title: None,
            description: None,
        })
    }

    #[must_use]
    pub fn with_id(mut self, id: AppointmentId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn duration_secs(&self) -> i64 {
        self.end_time - self.start_time
    }

    /// Half-open overlap test; touching endpoints do not overlap.
    #[must_use]
    pub fn overlaps(&self, start: i64, end: i64) -> bool {
        self.start_time < end && self.end_time > start
    }

    #[must_use]
    pub fn covers(&self, instant: i64) -> bool {
        self.start_time <= instant && instant < self.end_time
    }

    /// Returns a new snapshot with `patch` applied.
    pub fn patched(&self, patch: &AppointmentPatch) -> TimelineResult<Self> {
        let start_time = patch.start_time.unwrap_or(self.start_time);
        let end_time = patch.end_time.unwrap_or(self.end_time);
        validate_interval(start_time, end_time)?;
        Ok(Self {
            start_time,
            end_time,
            ..self.clone()
        })
    }
}

pub(crate) fn validate_interval(start: i64, end: i64) -> TimelineResult<()> {
    if start < end {
        Ok(())
    } else {
        Err(TimelineError::InvalidAppointment { start, end })
    }
}

/// Minimal set of changed fields sent to the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
}

impl AppointmentPatch {
    #[must_use]
    pub fn interval(start_time: i64, end_time: i64) -> Self {
        Self {
            start_time: Some(start_time),
            end_time: Some(end_time),
        }
    }

    #[must_use]
    pub fn end(end_time: i64) -> Self {
        Self {
            start_time: None,
            end_time: Some(end_time),
        }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.start_time.is_none() && self.end_time.is_none()
    }
}

/// Inclusive pixel interval currently shown by the viewport (plus buffer).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawVisibleRange")]
pub struct VisibleRange {
    start: f64,
    end: f64,
}

#[derive(Deserialize)]
struct RawVisibleRange {
    start: f64,
    end: f64,
}

impl TryFrom<RawVisibleRange> for VisibleRange {
    type Error = TimelineError;

    fn try_from(raw: RawVisibleRange) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl VisibleRange {
    pub fn new(start: f64, end: f64) -> TimelineResult<Self> {
        if !start.is_finite() || !end.is_finite() || start > end {
            return Err(TimelineError::InvalidData(format!(
                "visible range must be finite with start <= end, got [{start}, {end}]"
            )));
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn start(self) -> f64 {
        self.start
    }

    #[must_use]
    pub fn end(self) -> f64 {
        self.end
    }

    #[must_use]
    pub fn contains(self, position: f64) -> bool {
        position >= self.start && position <= self.end
    }

    /// Widens both sides by `padding` pixels.
    #[must_use]
    pub fn expanded(self, padding: f64) -> Self {
        let padding = padding.max(0.0);
        Self {
            start: self.start - padding,
            end: self.end + padding,
        }
    }

    #[must_use]
    pub fn intersects(self, left: f64, width: f64) -> bool {
        left <= self.end && left + width.max(0.0) >= self.start
    }
}

impl Default for VisibleRange {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 2000.0,
        }
    }
}

/// Render geometry of one appointment under a given scale.
///
/// `epoch` is the scale epoch the geometry was computed for; geometry with an
/// older epoch must be recomputed, never adjusted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityGeometry {
    pub left: f64,
    pub width: f64,
    pub epoch: u64,
}

impl EntityGeometry {
    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width.max(0.0)
    }

    #[must_use]
    pub fn is_stale(self, current_epoch: u64) -> bool {
        self.epoch != current_epoch
    }
}
