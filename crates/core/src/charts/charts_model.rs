//! Chart row models.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One date of the multi-series value chart.
///
/// `values` holds one entry per ticker that has a point on this date; tickers
/// without one are absent rather than zero. Serializes flat:
/// `{"date": "2015-01", "PETR4": 10000.0}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValueSeriesRow {
    pub date: String,
    #[serde(flatten)]
    pub values: BTreeMap<String, f64>,
}

impl ValueSeriesRow {
    pub fn value_for(&self, ticker: &str) -> Option<f64> {
        self.values.get(ticker).copied()
    }
}

/// Portfolio total at one date, with and without dividend reinvestment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReinvestmentRow {
    pub date: String,
    pub with_reinvestment: f64,
    pub without_reinvestment: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProfitabilityKind {
    Asset,
    Benchmark,
}

/// A bar of the profitability comparison chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfitabilityEntry {
    pub label: String,
    pub value: f64,
    pub kind: ProfitabilityKind,
    pub color_tag: String,
}

/// A row of the per-asset detail table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DetailRow {
    pub ticker: String,
    pub accumulated_units: f64,
    pub total_invested: f64,
    pub total_dividends: f64,
    pub final_value: f64,
    pub profitability_percent: f64,
    pub color_tag: String,
}
