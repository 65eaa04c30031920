//! Simfolio Core - Domain types, chart reshaping and dashboard state.
//!
//! This crate contains the network-free part of the portfolio simulation
//! dashboard. Simulated performance is produced behind the
//! [`SimulatorTrait`](simulation::SimulatorTrait) seam, implemented by the
//! `simfolio-ai` crate.
//!
//! # Architecture
//!
//! - `simulation`: Assets, benchmarks, parameters and per-asset results
//! - `charts`: Pure reshaping of results into chart-ready tables
//! - `dashboard`: Interactive state, user actions and simulation runs
//! - `constants`: Seed values and color palettes

pub mod charts;
pub mod constants;
pub mod dashboard;
pub mod errors;
pub mod simulation;

pub use charts::ChartSet;
pub use dashboard::{DashboardService, DashboardServiceTrait, RunOutcome};
pub use simulation::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
