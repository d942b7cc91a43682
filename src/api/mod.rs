//! Host-facing engine facade.
//!
//! `TimelineEngine` is split across per-concern `impl` blocks: scale, data,
//! layout, viewport, interaction, availability and plugins.

mod appointment_book;
mod availability_controller;
mod data_controller;
mod engine;
mod engine_config;
mod engine_init;
mod interaction_controller;
mod json_contract;
mod layout_controller;
mod plugin_dispatch;
mod plugin_registry;
mod store;
mod time_scale_controller;
mod viewport_controller;

pub use appointment_book::{AppointmentBook, WriteOutcome};
pub use engine::TimelineEngine;
pub use engine_config::TimelineEngineConfig;
pub use json_contract::{ENGINE_CONFIG_JSON_SCHEMA_V1, TimelineEngineConfigJsonContractV1};
pub use store::{AppointmentStore, InMemoryAppointmentStore};
