use chrono::{NaiveDate, TimeZone};
use ordered_float::OrderedFloat;
#[cfg(feature = "parallel-layout")]
use rayon::prelude::*;

use crate::core::{Appointment, CoordinateMapper, EntityGeometry, TimeScale, VisibleRange};
use crate::error::TimelineResult;

/// Computes geometry for every appointment, in input order.
///
/// With the `parallel-layout` feature the projection runs on the rayon pool;
/// output order and error selection match the sequential path.
pub fn project_appointments<Tz>(
    appointments: &[Appointment],
    mapper: &CoordinateMapper<Tz>,
    scale: TimeScale,
    reference_day: NaiveDate,
    epoch: u64,
) -> TimelineResult<Vec<EntityGeometry>>
where
    Tz: TimeZone + Copy + Sync,
{
    #[cfg(feature = "parallel-layout")]
    {
        let projected: Vec<TimelineResult<EntityGeometry>> = appointments
            .par_iter()
            .map(|appointment| mapper.geometry(appointment, scale, reference_day, epoch))
            .collect();
        projected.into_iter().collect()
    }

    #[cfg(not(feature = "parallel-layout"))]
    {
        let mut out = Vec::with_capacity(appointments.len());
        for appointment in appointments {
            out.push(mapper.geometry(appointment, scale, reference_day, epoch)?);
        }
        Ok(out)
    }
}

/// Pairs appointments with their geometry, keeps those intersecting `range`
/// and orders them left to right (stable for equal lefts).
pub fn layout_visible<'a, Tz>(
    appointments: &'a [Appointment],
    mapper: &CoordinateMapper<Tz>,
    scale: TimeScale,
    reference_day: NaiveDate,
    epoch: u64,
    range: VisibleRange,
) -> TimelineResult<Vec<(&'a Appointment, EntityGeometry)>>
where
    Tz: TimeZone + Copy + Sync,
{
    let geometries = project_appointments(appointments, mapper, scale, reference_day, epoch)?;
    let mut visible: Vec<(&Appointment, EntityGeometry)> = appointments
        .iter()
        .zip(geometries)
        .filter(|(_, geometry)| range.intersects(geometry.left, geometry.width))
        .collect();
    visible.sort_by_key(|(_, geometry)| OrderedFloat(geometry.left));
    Ok(visible)
}
