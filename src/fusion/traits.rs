use crate::{
    error::Result,
    models::generation::{GenerationRequest, Pipeline, StatusResponse},
};
use async_trait::async_trait;

/// The three remote operations of the generation service. The HTTP client
/// implements this; the orchestration layer only ever talks through it.
#[async_trait]
pub trait GenerationService: Send + Sync {
    async fn list_pipelines(&self) -> Result<Vec<Pipeline>>;

    /// Submit one generation job, returning the service-assigned job id.
    async fn run_generation(&self, request: &GenerationRequest) -> Result<String>;

    async fn check_status(&self, job_id: &str) -> Result<StatusResponse>;
}
