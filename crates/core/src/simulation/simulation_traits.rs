use crate::errors::Result;
use crate::simulation::simulation_model::{SimulationParams, SimulationResult};
use async_trait::async_trait;

/// Trait for anything able to produce simulated performance for a set of assets.
#[async_trait]
pub trait SimulatorTrait: Send + Sync {
    /// Simulate every asset in `params`.
    ///
    /// Returns at most one result per requested asset, in request order.
    /// Assets whose simulated payload could not be decoded are left out
    /// without failing the call. An `Err` means the whole run failed.
    async fn simulate(&self, params: &SimulationParams) -> Result<Vec<SimulationResult>>;
}
