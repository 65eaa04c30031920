//! Simfolio AI - portfolio simulations from an LLM generation service.
//!
//! This crate implements the core [`SimulatorTrait`](simfolio_core::SimulatorTrait)
//! by asking a structured-output model (Gemini) for one simulated history
//! per asset.
//!
//! # Architecture
//!
//! - `config`: Gemini connection settings and requester tuning, read from env
//! - `generation`: Generation service seam, the rig-backed Gemini client and a fake
//! - `prompt`: Per-asset prompt and the response schema
//! - `simulator`: The requester that fans calls out and decodes replies
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use simfolio_ai::{GeminiClient, SimulationRequester};
//! use simfolio_core::{DashboardService, DashboardServiceTrait};
//!
//! let client = GeminiClient::from_env()?;
//! let requester = SimulationRequester::new(Arc::new(client));
//! let dashboard = DashboardService::new(Arc::new(requester));
//!
//! dashboard.run_simulation().await?;
//! let charts = dashboard.charts()?;
//! ```

pub mod config;
pub mod error;
pub mod generation;
pub mod prompt;
pub mod simulator;

pub use config::{GeminiConfig, SimulationRequesterConfig};
pub use error::AiError;
pub use generation::{
    FakeGenerationService, FakeReply, GeminiClient, GenerationRequest, GenerationServiceTrait,
};
pub use prompt::{build_simulation_prompt, SIMULATION_RESPONSE_SCHEMA};
pub use simulator::{decode_simulation, AssetFailure, SimulationBatch, SimulationRequester};
