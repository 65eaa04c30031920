/// Series colors for simulated assets, cycled by result index.
pub const ASSET_SERIES_COLORS: &[&str] = &[
    "#10b981", "#3b82f6", "#f59e0b", "#ef4444", "#8b5cf6", "#ec4899",
];

/// Colors assigned to user-added benchmarks, cycled by benchmark count.
pub const BENCHMARK_COLORS: &[&str] = &["#94a3b8", "#cbd5e1", "#e2e8f0", "#64748b", "#475569"];

/// Fallback color for benchmarks without a color tag.
pub const DEFAULT_BENCHMARK_COLOR: &str = "#94a3b8";

/// Default simulation window start (ISO date).
pub const DEFAULT_START_DATE: &str = "2015-01-01";

/// Default one-off contribution at the start of the window
pub const DEFAULT_INITIAL_CONTRIBUTION: f64 = 10_000.0;

/// Default recurring monthly contribution
pub const DEFAULT_MONTHLY_CONTRIBUTION: f64 = 500.0;

/// Returns the series color for the result at `index`.
pub fn asset_series_color(index: usize) -> &'static str {
    ASSET_SERIES_COLORS[index % ASSET_SERIES_COLORS.len()]
}

/// Returns the color a new benchmark receives when `existing` benchmarks are configured.
pub fn benchmark_color(existing: usize) -> &'static str {
    BENCHMARK_COLORS[existing % BENCHMARK_COLORS.len()]
}

/// Notice shown to the user when a simulation run fails as a whole.
pub const SIMULATION_FAILED_NOTICE: &str = "Failed to simulate data. Please try again.";
