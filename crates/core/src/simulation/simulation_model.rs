//! Simulation domain models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Market an asset trades on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Market {
    #[serde(rename = "BR")]
    Domestic,
    #[serde(rename = "US")]
    Foreign,
}

impl Market {
    /// Short code shown next to the ticker.
    pub fn code(&self) -> &'static str {
        match self {
            Market::Domestic => "BR",
            Market::Foreign => "US",
        }
    }

    /// Human-readable market name.
    pub fn label(&self) -> &'static str {
        match self {
            Market::Domestic => "Brazil",
            Market::Foreign => "United States",
        }
    }
}

/// Normalizes user-entered tickers: surrounding whitespace removed, uppercased.
pub fn normalize_ticker(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Tradable instrument the user wants simulated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub ticker: String,
    pub display_name: String,
    pub market: Market,
}

impl Asset {
    pub fn new(ticker: &str, display_name: &str, market: Market) -> Self {
        Self {
            ticker: normalize_ticker(ticker),
            display_name: display_name.to_string(),
            market,
        }
    }
}

/// Fixed comparison return rate (an index or fixed-income proxy).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Benchmark {
    pub id: String,
    pub name: String,
    pub annualized_return_percent: f64,
    pub color_tag: String,
}

/// Everything a simulation run needs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimulationParams {
    pub assets: Vec<Asset>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub initial_contribution: f64,
    pub monthly_contribution: f64,
    /// Captured from the user but not sent to the simulator.
    pub reinvest_dividends: bool,
    pub benchmarks: Vec<Benchmark>,
}

impl SimulationParams {
    pub fn has_asset(&self, ticker: &str) -> bool {
        let ticker = normalize_ticker(ticker);
        self.assets.iter().any(|a| a.ticker == ticker)
    }
}

/// One month of a simulated scenario.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPoint {
    /// Month key, "YYYY-MM".
    pub date: String,
    pub total_value: f64,
    pub accumulated_dividends: f64,
}

/// Summary of the reinvestment scenario as reported by the simulator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimulationSummary {
    pub final_value: f64,
    pub total_dividends: f64,
    pub total_invested: f64,
    pub profitability_percent: f64,
    pub accumulated_units: f64,
}

/// Simulated performance of a single asset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub ticker: String,
    pub final_value: f64,
    pub total_dividends: f64,
    pub total_invested: f64,
    pub profitability_percent: f64,
    pub accumulated_units: f64,
    /// Scenario with dividends reinvested.
    pub history: Vec<MonthlyPoint>,
    /// Scenario with dividends kept as cash.
    pub history_no_reinvest: Vec<MonthlyPoint>,
}

impl SimulationResult {
    /// Merge an asset's ticker with a simulated summary and both histories.
    pub fn from_parts(
        ticker: &str,
        summary: SimulationSummary,
        history: Vec<MonthlyPoint>,
        history_no_reinvest: Vec<MonthlyPoint>,
    ) -> Self {
        Self {
            ticker: ticker.to_string(),
            final_value: summary.final_value,
            total_dividends: summary.total_dividends,
            total_invested: summary.total_invested,
            profitability_percent: summary.profitability_percent,
            accumulated_units: summary.accumulated_units,
            history,
            history_no_reinvest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_ticker() {
        assert_eq!(normalize_ticker("  petr4 "), "PETR4");
        assert_eq!(normalize_ticker("Vale3"), "VALE3");
        assert_eq!(normalize_ticker("   "), "");
    }

    #[test]
    fn test_asset_new_uppercases_ticker() {
        let asset = Asset::new("itsa4", "Itausa", Market::Domestic);
        assert_eq!(asset.ticker, "ITSA4");
        assert_eq!(asset.display_name, "Itausa");
    }

    #[test]
    fn test_market_serializes_as_code() {
        assert_eq!(serde_json::to_string(&Market::Domestic).unwrap(), "\"BR\"");
        assert_eq!(serde_json::to_string(&Market::Foreign).unwrap(), "\"US\"");
        let parsed: Market = serde_json::from_str("\"US\"").unwrap();
        assert_eq!(parsed, Market::Foreign);
        assert_eq!(parsed.code(), "US");
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = SimulationResult::from_parts(
            "PETR4",
            SimulationSummary {
                final_value: 1.0,
                total_dividends: 2.0,
                total_invested: 3.0,
                profitability_percent: 4.0,
                accumulated_units: 5.0,
            },
            vec![],
            vec![],
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["ticker"], "PETR4");
        assert_eq!(json["profitabilityPercent"], 4.0);
        assert_eq!(json["accumulatedUnits"], 5.0);
        assert!(json["historyNoReinvest"].is_array());
    }

    #[test]
    fn test_params_dates_serialize_iso() {
        let params = SimulationParams {
            assets: vec![Asset::new("PETR4", "Petrobras", Market::Domestic)],
            start_date: NaiveDate::from_ymd_opt(2015, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2015, 3, 31).unwrap(),
            initial_contribution: 10_000.0,
            monthly_contribution: 500.0,
            reinvest_dividends: true,
            benchmarks: vec![],
        };
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["startDate"], "2015-01-01");
        assert_eq!(json["endDate"], "2015-03-31");
        assert!(params.has_asset("petr4"));
        assert!(!params.has_asset("VALE3"));
    }
}
