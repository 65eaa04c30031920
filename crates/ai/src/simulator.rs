//! Simulation requester: one structured generation call per asset.
//!
//! Calls run with bounded concurrency and results keep the order of
//! `params.assets`. A reply that does not decode drops only that asset. A
//! failing call (transport error, non-success status) fails the whole batch.

use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use log::{debug, info, warn};
use serde::Deserialize;

use simfolio_core::{
    Asset, MonthlyPoint, SimulationParams, SimulationResult, SimulationSummary, SimulatorTrait,
};

use crate::config::SimulationRequesterConfig;
use crate::error::AiError;
use crate::generation::{GenerationRequest, GenerationServiceTrait};
use crate::prompt::{build_simulation_prompt, SIMULATION_RESPONSE_SCHEMA};

/// Reply payload as the generation service produces it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SimulationPayload {
    history: Vec<MonthlyPoint>,
    history_no_reinvest: Vec<MonthlyPoint>,
    summary: PayloadSummary,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PayloadSummary {
    final_value: f64,
    total_dividends: f64,
    total_invested: f64,
    profitability: f64,
    shares_accumulated: f64,
}

impl From<PayloadSummary> for SimulationSummary {
    fn from(summary: PayloadSummary) -> Self {
        Self {
            final_value: summary.final_value,
            total_dividends: summary.total_dividends,
            total_invested: summary.total_invested,
            profitability_percent: summary.profitability,
            accumulated_units: summary.shares_accumulated,
        }
    }
}

/// Strips a surrounding markdown code fence, if any.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // An info string ("json") may follow the opening fence; the payload itself
    // can also start on that line.
    match body.split_once('\n') {
        Some((first_line, rest)) if !first_line.trim_start().starts_with(['{', '[']) => {
            rest.trim()
        }
        _ => body.trim(),
    }
}

/// Decodes one reply into a result tagged with `ticker`.
pub fn decode_simulation(ticker: &str, text: &str) -> Result<SimulationResult, AiError> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Err(AiError::decode("empty response"));
    }

    let payload: SimulationPayload =
        serde_json::from_str(body).map_err(|e| AiError::decode(e.to_string()))?;

    Ok(SimulationResult::from_parts(
        ticker,
        payload.summary.into(),
        payload.history,
        payload.history_no_reinvest,
    ))
}

/// An asset whose reply was dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetFailure {
    pub ticker: String,
    pub reason: String,
}

/// Outcome of one batch: decoded results in asset order plus the dropped assets.
#[derive(Debug, Default)]
pub struct SimulationBatch {
    pub results: Vec<SimulationResult>,
    pub failures: Vec<AssetFailure>,
}

enum AssetOutcome {
    Simulated(SimulationResult),
    Dropped(AssetFailure),
}

/// Requests simulations from a generation service.
pub struct SimulationRequester {
    generator: Arc<dyn GenerationServiceTrait>,
    config: SimulationRequesterConfig,
}

impl SimulationRequester {
    pub fn new(generator: Arc<dyn GenerationServiceTrait>) -> Self {
        Self::with_config(generator, SimulationRequesterConfig::default())
    }

    pub fn with_config(
        generator: Arc<dyn GenerationServiceTrait>,
        config: SimulationRequesterConfig,
    ) -> Self {
        Self { generator, config }
    }

    async fn simulate_asset(
        &self,
        asset: &Asset,
        params: &SimulationParams,
    ) -> Result<AssetOutcome, AiError> {
        let request = GenerationRequest {
            prompt: build_simulation_prompt(asset, params),
            response_schema: SIMULATION_RESPONSE_SCHEMA.clone(),
        };

        debug!("Requesting simulation for {}", asset.ticker);
        let text = self.generator.generate(&request).await?;

        match decode_simulation(&asset.ticker, &text) {
            Ok(result) => Ok(AssetOutcome::Simulated(result)),
            Err(e) => {
                warn!("Dropping simulation for {}: {}", asset.ticker, e);
                Ok(AssetOutcome::Dropped(AssetFailure {
                    ticker: asset.ticker.clone(),
                    reason: e.to_string(),
                }))
            }
        }
    }

    /// Runs every asset in `params` and reports successes and drops separately.
    pub async fn simulate_batch(
        &self,
        params: &SimulationParams,
    ) -> Result<SimulationBatch, AiError> {
        let concurrency = self.config.max_concurrency.max(1);
        info!(
            "Simulating {} assets ({} concurrent requests)",
            params.assets.len(),
            concurrency
        );

        let requests: Vec<_> = params
            .assets
            .iter()
            .map(|asset| self.simulate_asset(asset, params))
            .collect();
        let outcomes: Vec<Result<AssetOutcome, AiError>> = stream::iter(requests)
            .buffered(concurrency)
            .collect()
            .await;

        let batch = outcomes
            .into_iter()
            .try_fold(SimulationBatch::default(), |mut batch, outcome| {
                match outcome? {
                    AssetOutcome::Simulated(result) => batch.results.push(result),
                    AssetOutcome::Dropped(failure) => batch.failures.push(failure),
                }
                Ok::<_, AiError>(batch)
            })?;

        info!(
            "Simulation batch finished: {} succeeded, {} dropped",
            batch.results.len(),
            batch.failures.len()
        );
        Ok(batch)
    }
}

#[async_trait]
impl SimulatorTrait for SimulationRequester {
    async fn simulate(
        &self,
        params: &SimulationParams,
    ) -> simfolio_core::Result<Vec<SimulationResult>> {
        let batch = self.simulate_batch(params).await?;
        Ok(batch.results)
    }
}
