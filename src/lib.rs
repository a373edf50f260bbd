//! chartscope: scale resolution and overlay panel control for charts.
//!
//! `api::ScaleResolver` turns chart configuration and aggregated data into
//! x/y/secondary-y/color scales. `api::TooltipController` owns the tooltip
//! or legend panel, positions it from pointer events and formats its title
//! and entries. Drawing is left to a `render::PanelHost` implementation.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ScaleResolver, TooltipController};
pub use error::{ChartError, ChartResult};
