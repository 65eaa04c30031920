use crate::constants::{asset_series_color, DEFAULT_BENCHMARK_COLOR};
use crate::simulation::{Benchmark, MonthlyPoint, SimulationResult};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::charts_model::{
    DetailRow, ProfitabilityEntry, ProfitabilityKind, ReinvestmentRow, ValueSeriesRow,
};

/// First value per month key. Later duplicates of the same month are ignored.
fn values_by_date(points: &[MonthlyPoint]) -> HashMap<&str, f64> {
    let mut by_date = HashMap::with_capacity(points.len());
    for point in points {
        by_date.entry(point.date.as_str()).or_insert(point.total_value);
    }
    by_date
}

/// Multi-series value table: one row per date in the sorted union of every
/// result's `history` dates, one field per ticker that has a point there.
pub fn build_value_table(results: &[SimulationResult]) -> Vec<ValueSeriesRow> {
    let mut by_date: BTreeMap<&str, BTreeMap<String, f64>> = BTreeMap::new();

    for result in results {
        for (date, value) in values_by_date(&result.history) {
            by_date
                .entry(date)
                .or_default()
                .entry(result.ticker.clone())
                .or_insert(value);
        }
    }

    by_date
        .into_iter()
        .map(|(date, values)| ValueSeriesRow {
            date: date.to_string(),
            values,
        })
        .collect()
}

/// Combined portfolio value with and without reinvestment.
///
/// Dates come from `history` only. A result missing a date in
/// `history_no_reinvest` contributes nothing to that date's "without" total.
pub fn build_reinvestment_table(results: &[SimulationResult]) -> Vec<ReinvestmentRow> {
    let mut totals: BTreeMap<&str, (f64, f64)> = BTreeMap::new();

    for result in results {
        for (date, value) in values_by_date(&result.history) {
            totals.entry(date).or_default().0 += value;
        }
    }

    for result in results {
        for (date, value) in values_by_date(&result.history_no_reinvest) {
            if let Some(total) = totals.get_mut(date) {
                total.1 += value;
            }
        }
    }

    totals
        .into_iter()
        .map(|(date, (with_reinvestment, without_reinvestment))| ReinvestmentRow {
            date: date.to_string(),
            with_reinvestment,
            without_reinvestment,
        })
        .collect()
}

/// Assets first, then benchmarks, each in their original order.
pub fn build_profitability_table(
    results: &[SimulationResult],
    benchmarks: &[Benchmark],
) -> Vec<ProfitabilityEntry> {
    let assets = results
        .iter()
        .enumerate()
        .map(|(index, result)| ProfitabilityEntry {
            label: result.ticker.clone(),
            value: result.profitability_percent,
            kind: ProfitabilityKind::Asset,
            color_tag: asset_series_color(index).to_string(),
        });

    let benchmarks = benchmarks.iter().map(|benchmark| ProfitabilityEntry {
        label: benchmark.name.clone(),
        value: benchmark.annualized_return_percent,
        kind: ProfitabilityKind::Benchmark,
        color_tag: if benchmark.color_tag.is_empty() {
            DEFAULT_BENCHMARK_COLOR.to_string()
        } else {
            benchmark.color_tag.clone()
        },
    });

    assets.chain(benchmarks).collect()
}

/// Per-asset detail rows, in result order.
pub fn build_detail_table(results: &[SimulationResult]) -> Vec<DetailRow> {
    results
        .iter()
        .enumerate()
        .map(|(index, result)| DetailRow {
            ticker: result.ticker.clone(),
            accumulated_units: result.accumulated_units,
            total_invested: result.total_invested,
            total_dividends: result.total_dividends,
            final_value: result.final_value,
            profitability_percent: result.profitability_percent,
            color_tag: asset_series_color(index).to_string(),
        })
        .collect()
}

/// Every chart table the dashboard renders, computed together.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartSet {
    pub values: Vec<ValueSeriesRow>,
    pub reinvestment: Vec<ReinvestmentRow>,
    pub profitability: Vec<ProfitabilityEntry>,
    pub details: Vec<DetailRow>,
}

impl ChartSet {
    pub fn build(results: &[SimulationResult], benchmarks: &[Benchmark]) -> Self {
        if results.is_empty() && benchmarks.is_empty() {
            return Self::default();
        }

        let chart_set = Self {
            values: build_value_table(results),
            reinvestment: build_reinvestment_table(results),
            profitability: build_profitability_table(results, benchmarks),
            details: build_detail_table(results),
        };
        debug!(
            "Built chart set: {} dates, {} profitability entries",
            chart_set.values.len(),
            chart_set.profitability.len()
        );
        chart_set
    }
}
