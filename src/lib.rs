//! booking-timeline: coordinate, virtualization and interaction core for
//! booking calendars.
//!
//! The crate maps appointment intervals onto a horizontally scrolling pixel
//! grid at half-hour, hour, day or week scale, decides which days are
//! materialized, turns drag/resize gestures back into timestamps and answers
//! asset availability queries. Rendering and persistence stay with the host.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod telemetry;

pub use api::{AppointmentStore, InMemoryAppointmentStore, TimelineEngine, TimelineEngineConfig};
pub use error::{TimelineError, TimelineResult};
