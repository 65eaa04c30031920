//! Dashboard module - interactive state owned by the presentation layer.
//!
//! The dashboard is the only caller of a [`SimulatorTrait`](crate::simulation::SimulatorTrait)
//! and the only consumer of the chart tables.

mod dashboard_model;
mod dashboard_service;
mod dashboard_traits;

pub use dashboard_model::*;
pub use dashboard_service::DashboardService;
pub use dashboard_traits::DashboardServiceTrait;
