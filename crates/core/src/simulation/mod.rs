//! Simulation module - domain models and the simulator seam.

mod simulation_model;
mod simulation_traits;

pub use simulation_model::{
    normalize_ticker, Asset, Benchmark, Market, MonthlyPoint, SimulationParams, SimulationResult,
    SimulationSummary,
};
pub use simulation_traits::SimulatorTrait;
