use crate::charts::ChartSet;
use crate::dashboard::dashboard_model::RunOutcome;
use crate::errors::Result;
use crate::simulation::{Benchmark, Market, SimulationParams, SimulationResult};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

/// Trait for dashboard operations driven by user actions.
///
/// Mutations that fail input checks (empty or duplicate ticker, incomplete
/// benchmark, negative contribution) are no-ops and report `false`/`None`.
#[async_trait]
pub trait DashboardServiceTrait: Send + Sync {
    fn params(&self) -> Result<SimulationParams>;
    fn results(&self) -> Result<Vec<SimulationResult>>;
    fn last_error(&self) -> Result<Option<String>>;
    fn is_busy(&self) -> bool;

    fn add_asset(&self, ticker: &str, display_name: Option<&str>, market: Market) -> Result<bool>;
    fn remove_asset(&self, ticker: &str) -> Result<bool>;
    fn add_benchmark(
        &self,
        name: &str,
        annualized_return_percent: Option<f64>,
    ) -> Result<Option<Benchmark>>;
    fn remove_benchmark(&self, benchmark_id: &str) -> Result<bool>;
    fn set_date_range(&self, start_date: NaiveDate, end_date: NaiveDate) -> Result<()>;
    /// Parses ISO `YYYY-MM-DD` dates before storing them.
    fn set_date_range_str(&self, start_date: &str, end_date: &str) -> Result<()>;
    fn set_contributions(&self, initial: f64, monthly: f64) -> Result<bool>;
    fn set_reinvest_dividends(&self, reinvest: bool) -> Result<()>;

    /// Runs the simulator over the current parameters.
    async fn run_simulation(&self) -> Result<RunOutcome>;

    /// Chart tables for the current results and benchmarks.
    fn charts(&self) -> Result<Arc<ChartSet>>;
}
