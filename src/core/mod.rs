pub mod asset_groups;
pub mod availability;
pub mod coordinate_mapper;
pub mod primitives;
pub mod projection;
pub mod scale;
pub mod types;
pub mod windowing;

pub use asset_groups::{
    AssetClassRule, AssetClassification, AssetGroup, classify_appointments, classify_assets,
};
pub use availability::{AvailabilityIndex, HourlyAvailability, has_overlap};
pub use coordinate_mapper::{CoordinateMapper, DEFAULT_BORDER_INSET_PX, ScaleMetrics};
pub use projection::{layout_visible, project_appointments};
pub use scale::{ScaleChange, ScaleRegistry, ScaleSpec, TimeScale};
pub use types::{Appointment, AppointmentId, AppointmentPatch, EntityGeometry, VisibleRange};
pub use windowing::{
    FillOutcome, ScrollOutcome, VirtualWindow, WeekSpan, WindowPolicy, generate_dates,
    group_weeks, week_label, week_number,
};
