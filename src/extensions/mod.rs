//! Host-facing extension hooks.
//!
//! Extensions observe the engine; they never mutate core state directly.

pub mod plugins;

pub use plugins::{PluginContext, TimelineEvent, TimelinePlugin};
