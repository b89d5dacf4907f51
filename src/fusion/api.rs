use crate::{
    config::{FusionConfig, DEFAULT_BASE_URL},
    error::{FusionError, Result},
    fusion::traits::GenerationService,
    models::generation::{GenerationRequest, Pipeline, RunResponse, StatusResponse},
};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;

/// HTTP client for the FusionBrain REST API.
pub struct FusionApi {
    client: Client,
    base_url: String,
    api_key: String,
    secret_key: String,
}

impl FusionApi {
    pub fn new(config: FusionConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .ok_or_else(|| FusionError::ConfigError("FusionBrain API key is required".into()))?;

        let secret_key = config
            .secret_key
            .ok_or_else(|| FusionError::ConfigError("FusionBrain secret key is required".into()))?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            client: Client::new(),
            base_url,
            api_key,
            secret_key,
        })
    }

    fn build_headers(&self) -> reqwest::header::HeaderMap {
        let mut headers = reqwest::header::HeaderMap::new();
        if let Ok(key) = format!("Key {}", self.api_key).parse() {
            headers.insert("X-Key", key);
        }
        if let Ok(secret) = format!("Secret {}", self.secret_key).parse() {
            headers.insert("X-Secret", secret);
        }
        headers
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl GenerationService for FusionApi {
    async fn list_pipelines(&self) -> Result<Vec<Pipeline>> {
        let response = self
            .client
            .get(self.endpoint("key/api/v1/pipelines"))
            .headers(self.build_headers())
            .send()
            .await
            .map_err(|e| FusionError::RequestError(format!("Pipeline list failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(FusionError::ServiceError(format!(
                "Pipeline list returned {}: {}",
                status, error_text
            )));
        }

        response
            .json::<Vec<Pipeline>>()
            .await
            .map_err(|e| FusionError::ServiceError(format!("Malformed pipeline list: {}", e)))
    }

    async fn run_generation(&self, request: &GenerationRequest) -> Result<String> {
        let params = serde_json::to_string(&request.params())
            .map_err(|e| FusionError::SerializationError(e.to_string()))?;

        let params_part = Part::text(params)
            .mime_str("application/json")
            .map_err(|e| FusionError::RequestError(e.to_string()))?;

        let form = Form::new()
            .text("pipeline_id", request.pipeline_id.clone())
            .part("params", params_part);

        let response = self
            .client
            .post(self.endpoint("key/api/v1/pipeline/run"))
            .headers(self.build_headers())
            .multipart(form)
            .send()
            .await
            .map_err(|e| FusionError::RequestError(format!("Generation submit failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(FusionError::ServiceError(format!(
                "Generation submit returned {}: {}",
                status, error_text
            )));
        }

        let run: RunResponse = response
            .json()
            .await
            .map_err(|e| FusionError::ServiceError(format!("Malformed submit response: {}", e)))?;

        run.uuid.ok_or_else(|| {
            FusionError::ServiceError("Submit response carries no job id".into())
        })
    }

    async fn check_status(&self, job_id: &str) -> Result<StatusResponse> {
        let response = self
            .client
            .get(self.endpoint(&format!("key/api/v1/pipeline/status/{}", job_id)))
            .headers(self.build_headers())
            .send()
            .await
            .map_err(|e| FusionError::RequestError(format!("Status check failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(FusionError::ServiceError(format!(
                "Status check returned {}: {}",
                status, error_text
            )));
        }

        response
            .json::<StatusResponse>()
            .await
            .map_err(|e| FusionError::ServiceError(format!("Malformed status response: {}", e)))
    }
}
