//! Dashboard state models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_INITIAL_CONTRIBUTION, DEFAULT_MONTHLY_CONTRIBUTION, DEFAULT_START_DATE,
};
use crate::simulation::{Asset, Benchmark, Market, SimulationParams, SimulationResult};

/// What happened when the user triggered a simulation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum RunOutcome {
    /// Results were replaced with `results` entries.
    Completed { results: usize },
    /// Nothing to simulate.
    NoAssets,
    /// A run is already in flight.
    AlreadyRunning,
}

/// Process-local dashboard state.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub params: SimulationParams,
    pub results: Vec<SimulationResult>,
    pub last_error: Option<String>,
    /// Bumped whenever `results` is replaced.
    pub results_revision: u64,
    /// Bumped whenever the benchmark list changes.
    pub benchmarks_revision: u64,
}

impl DashboardState {
    pub fn new(params: SimulationParams) -> Self {
        Self {
            params,
            results: Vec::new(),
            last_error: None,
            results_revision: 0,
            benchmarks_revision: 0,
        }
    }

    /// State with the preset assets and benchmarks, ending on `end_date`.
    pub fn seeded(end_date: NaiveDate) -> Self {
        Self::new(seed_params(end_date))
    }
}

/// Default parameters: two Brazilian assets, three benchmarks and a window
/// from 2015 up to `end_date`.
pub fn seed_params(end_date: NaiveDate) -> SimulationParams {
    let start_date = NaiveDate::parse_from_str(DEFAULT_START_DATE, "%Y-%m-%d").unwrap_or(end_date);

    SimulationParams {
        assets: vec![
            Asset::new("PETR4", "Petrobras", Market::Domestic),
            Asset::new("VALE3", "Vale", Market::Domestic),
        ],
        start_date,
        end_date,
        initial_contribution: DEFAULT_INITIAL_CONTRIBUTION,
        monthly_contribution: DEFAULT_MONTHLY_CONTRIBUTION,
        reinvest_dividends: true,
        benchmarks: vec![
            seed_benchmark("1", "IBOV", 120.0, "#94a3b8"),
            seed_benchmark("2", "CDI", 95.0, "#cbd5e1"),
            seed_benchmark("3", "Poupança", 55.0, "#e2e8f0"),
        ],
    }
}

fn seed_benchmark(id: &str, name: &str, value: f64, color: &str) -> Benchmark {
    Benchmark {
        id: id.to_string(),
        name: name.to_string(),
        annualized_return_percent: value,
        color_tag: color.to_string(),
    }
}
