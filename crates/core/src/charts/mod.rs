//! Chart reshaping module.
//!
//! Pure functions turning simulation results and benchmarks into
//! chart-ready row sets. Nothing here holds state between calls.

mod charts_model;
mod charts_service;

pub use charts_model::*;
pub use charts_service::*;
