//! Per-asset prompt and the structured response schema sent with it.

use once_cell::sync::Lazy;
use serde_json::{json, Value};
use simfolio_core::{Asset, SimulationParams};

const ISO_DATE: &str = "%Y-%m-%d";

fn monthly_point_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "date": { "type": "STRING" },
            "totalValue": { "type": "NUMBER" },
            "accumulatedDividends": { "type": "NUMBER" }
        },
        "required": ["date", "totalValue", "accumulatedDividends"]
    })
}

/// Schema every per-asset reply must satisfy.
pub static SIMULATION_RESPONSE_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "OBJECT",
        "properties": {
            "history": { "type": "ARRAY", "items": monthly_point_schema() },
            "historyNoReinvest": { "type": "ARRAY", "items": monthly_point_schema() },
            "summary": {
                "type": "OBJECT",
                "properties": {
                    "finalValue": { "type": "NUMBER" },
                    "totalDividends": { "type": "NUMBER" },
                    "totalInvested": { "type": "NUMBER" },
                    "profitability": { "type": "NUMBER" },
                    "sharesAccumulated": { "type": "NUMBER" }
                },
                "required": [
                    "finalValue",
                    "totalDividends",
                    "totalInvested",
                    "profitability",
                    "sharesAccumulated"
                ]
            }
        },
        "required": ["history", "historyNoReinvest", "summary"]
    })
});

/// Builds the natural-language request for one asset.
pub fn build_simulation_prompt(asset: &Asset, params: &SimulationParams) -> String {
    format!(
        "Simulate monthly historical data for the stock {ticker} ({market}) \
from {start} to {end}.\n\
Initial contribution: {initial:.2}.\n\
Monthly contribution: {monthly:.2}.\n\
\n\
Return JSON with TWO monthly history scenarios:\n\
1. history: dividends are automatically reinvested.\n\
2. historyNoReinvest: dividends are NOT reinvested and accumulate as cash.\n\
\n\
Each point must contain date (YYYY-MM), totalValue (number) and accumulatedDividends (number).\n\
\n\
Also include a summary of the reinvestment scenario with finalValue, totalDividends, \
totalInvested, profitability (percent) and sharesAccumulated.\n\
\n\
Base the data on the approximate real historical performance of this company.",
        ticker = asset.ticker,
        market = asset.market.label(),
        start = params.start_date.format(ISO_DATE),
        end = params.end_date.format(ISO_DATE),
        initial = params.initial_contribution,
        monthly = params.monthly_contribution,
    )
}
