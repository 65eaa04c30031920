use crate::charts::ChartSet;
use crate::constants::{benchmark_color, SIMULATION_FAILED_NOTICE};
use crate::errors::Result;
use crate::simulation::{
    normalize_ticker, Asset, Benchmark, Market, SimulationParams, SimulationResult,
    SimulatorTrait,
};
use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use log::{debug, error, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use super::dashboard_model::{DashboardState, RunOutcome};
use super::dashboard_traits::DashboardServiceTrait;

/// Chart tables computed for a given pair of revisions.
struct CachedCharts {
    results_revision: u64,
    benchmarks_revision: u64,
    charts: Arc<ChartSet>,
}

/// Clears the busy flag when a run ends, however it ends.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct DashboardService {
    simulator: Arc<dyn SimulatorTrait>,
    state: RwLock<DashboardState>,
    busy: AtomicBool,
    chart_cache: RwLock<Option<CachedCharts>>,
}

impl DashboardService {
    /// Dashboard seeded with the preset assets and benchmarks, ending today.
    pub fn new(simulator: Arc<dyn SimulatorTrait>) -> Self {
        Self::with_state(simulator, DashboardState::seeded(Local::now().date_naive()))
    }

    pub fn with_params(simulator: Arc<dyn SimulatorTrait>, params: SimulationParams) -> Self {
        Self::with_state(simulator, DashboardState::new(params))
    }

    fn with_state(simulator: Arc<dyn SimulatorTrait>, state: DashboardState) -> Self {
        DashboardService {
            simulator,
            state: RwLock::new(state),
            busy: AtomicBool::new(false),
            chart_cache: RwLock::new(None),
        }
    }

    fn is_valid_amount(value: f64) -> bool {
        value.is_finite() && value >= 0.0
    }
}

#[async_trait]
impl DashboardServiceTrait for DashboardService {
    fn params(&self) -> Result<SimulationParams> {
        Ok(self.state.read()?.params.clone())
    }

    fn results(&self) -> Result<Vec<SimulationResult>> {
        Ok(self.state.read()?.results.clone())
    }

    fn last_error(&self) -> Result<Option<String>> {
        Ok(self.state.read()?.last_error.clone())
    }

    fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    fn add_asset(&self, ticker: &str, display_name: Option<&str>, market: Market) -> Result<bool> {
        let ticker = normalize_ticker(ticker);
        if ticker.is_empty() {
            debug!("Ignoring asset with empty ticker");
            return Ok(false);
        }

        let mut state = self.state.write()?;
        if state.params.has_asset(&ticker) {
            debug!("Ignoring duplicate asset {}", ticker);
            return Ok(false);
        }

        let display_name = display_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(ticker.as_str())
            .to_string();
        state.params.assets.push(Asset {
            ticker,
            display_name,
            market,
        });
        Ok(true)
    }

    fn remove_asset(&self, ticker: &str) -> Result<bool> {
        let ticker = normalize_ticker(ticker);
        let mut state = self.state.write()?;
        let before = state.params.assets.len();
        state.params.assets.retain(|asset| asset.ticker != ticker);
        Ok(state.params.assets.len() != before)
    }

    fn add_benchmark(
        &self,
        name: &str,
        annualized_return_percent: Option<f64>,
    ) -> Result<Option<Benchmark>> {
        let name = name.trim();
        let value = match annualized_return_percent {
            Some(value) if value.is_finite() && !name.is_empty() => value,
            _ => {
                debug!("Ignoring incomplete benchmark '{}'", name);
                return Ok(None);
            }
        };

        let mut state = self.state.write()?;
        let benchmark = Benchmark {
            id: Uuid::new_v4().simple().to_string(),
            name: name.to_string(),
            annualized_return_percent: value,
            color_tag: benchmark_color(state.params.benchmarks.len()).to_string(),
        };
        state.params.benchmarks.push(benchmark.clone());
        state.benchmarks_revision += 1;
        Ok(Some(benchmark))
    }

    fn remove_benchmark(&self, benchmark_id: &str) -> Result<bool> {
        let mut state = self.state.write()?;
        let before = state.params.benchmarks.len();
        state.params.benchmarks.retain(|b| b.id != benchmark_id);
        let removed = state.params.benchmarks.len() != before;
        if removed {
            state.benchmarks_revision += 1;
        }
        Ok(removed)
    }

    fn set_date_range(&self, start_date: NaiveDate, end_date: NaiveDate) -> Result<()> {
        let mut state = self.state.write()?;
        state.params.start_date = start_date;
        state.params.end_date = end_date;
        Ok(())
    }

    fn set_date_range_str(&self, start_date: &str, end_date: &str) -> Result<()> {
        let start_date = NaiveDate::parse_from_str(start_date.trim(), "%Y-%m-%d")?;
        let end_date = NaiveDate::parse_from_str(end_date.trim(), "%Y-%m-%d")?;
        self.set_date_range(start_date, end_date)
    }

    fn set_contributions(&self, initial: f64, monthly: f64) -> Result<bool> {
        if !Self::is_valid_amount(initial) || !Self::is_valid_amount(monthly) {
            debug!(
                "Ignoring contributions initial={} monthly={}",
                initial, monthly
            );
            return Ok(false);
        }

        let mut state = self.state.write()?;
        state.params.initial_contribution = initial;
        state.params.monthly_contribution = monthly;
        Ok(true)
    }

    fn set_reinvest_dividends(&self, reinvest: bool) -> Result<()> {
        self.state.write()?.params.reinvest_dividends = reinvest;
        Ok(())
    }

    async fn run_simulation(&self) -> Result<RunOutcome> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("Simulation already running, ignoring trigger");
            return Ok(RunOutcome::AlreadyRunning);
        }
        let _busy = BusyGuard(&self.busy);

        let params = self.state.read()?.params.clone();
        if params.assets.is_empty() {
            return Ok(RunOutcome::NoAssets);
        }

        info!("Running simulation for {} assets", params.assets.len());
        match self.simulator.simulate(&params).await {
            Ok(results) => {
                let count = results.len();
                let mut state = self.state.write()?;
                state.results = results;
                state.results_revision += 1;
                state.last_error = None;
                info!(
                    "Simulation finished: {} of {} assets",
                    count,
                    params.assets.len()
                );
                Ok(RunOutcome::Completed { results: count })
            }
            Err(e) => {
                error!("Simulation run failed: {}", e);
                self.state.write()?.last_error = Some(SIMULATION_FAILED_NOTICE.to_string());
                Err(e)
            }
        }
    }

    fn charts(&self) -> Result<Arc<ChartSet>> {
        let state = self.state.read()?;

        if let Some(cached) = self.chart_cache.read()?.as_ref() {
            if cached.results_revision == state.results_revision
                && cached.benchmarks_revision == state.benchmarks_revision
            {
                return Ok(cached.charts.clone());
            }
        }

        let charts = Arc::new(ChartSet::build(&state.results, &state.params.benchmarks));
        *self.chart_cache.write()? = Some(CachedCharts {
            results_revision: state.results_revision,
            benchmarks_revision: state.benchmarks_revision,
            charts: charts.clone(),
        });
        Ok(charts)
    }
}
