use std::sync::Arc;
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use crate::{
    error::{FusionError, Result},
    fusion::traits::GenerationService,
    models::generation::{GenerationRequest, JobStatus},
    models::settings::{ImageStyle, UserSettings},
};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;
pub const DEFAULT_POLL_DELAY: Duration = Duration::from_secs(10);

/// Orchestrates one generation round-trip against the remote service:
/// pipeline discovery, job submission, and bounded polling until the job
/// reports DONE or the attempt budget runs out.
#[derive(Clone)]
pub struct GenerationClient {
    service: Arc<dyn GenerationService>,
    max_attempts: u32,
    poll_delay: Duration,
}

impl GenerationClient {
    pub fn new(service: Arc<dyn GenerationService>) -> Self {
        Self {
            service,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            poll_delay: DEFAULT_POLL_DELAY,
        }
    }

    pub fn with_poll_policy(mut self, max_attempts: u32, poll_delay: Duration) -> Self {
        self.max_attempts = max_attempts;
        self.poll_delay = poll_delay;
        self
    }

    /// Returns the id of the first pipeline the service lists.
    pub async fn discover_pipeline(&self) -> Result<String> {
        let pipelines = self.service.list_pipelines().await?;

        let first = pipelines
            .into_iter()
            .next()
            .ok_or_else(|| FusionError::ServiceError("No pipelines available".into()))?;

        log::debug!("Discovered pipeline: {}", first.id);
        Ok(first.id)
    }

    /// Submits a single-image job and returns the service job id.
    pub async fn submit(
        &self,
        prompt: &str,
        pipeline_id: &str,
        width: u32,
        height: u32,
        style: ImageStyle,
    ) -> Result<String> {
        let request = GenerationRequest {
            prompt: prompt.to_string(),
            pipeline_id: pipeline_id.to_string(),
            width,
            height,
            style,
        };

        let job_id = self.service.run_generation(&request).await?;
        log::info!("Submitted generation job {} on pipeline {}", job_id, pipeline_id);
        Ok(job_id)
    }

    /// Polls the job at fixed intervals. `Ok(Some(bytes))` carries the first
    /// result image, decoded; `Ok(None)` means the attempt budget was spent
    /// without reaching DONE — a timeout, not a fault. Any non-DONE status
    /// consumes an attempt.
    pub async fn await_result(&self, job_id: &str) -> Result<Option<Vec<u8>>> {
        for attempt in 1..=self.max_attempts {
            let status = self.service.check_status(job_id).await?;

            match status.status {
                JobStatus::Done => {
                    let result = status.result.ok_or_else(|| {
                        FusionError::ServiceError("DONE status carries no result".into())
                    })?;

                    let encoded = result.files.first().ok_or_else(|| {
                        FusionError::ServiceError("DONE status carries no files".into())
                    })?;

                    let bytes = BASE64.decode(encoded).map_err(|e| {
                        FusionError::ServiceError(format!("Undecodable image payload: {}", e))
                    })?;

                    log::info!(
                        "Job {} finished after {} poll(s), {} bytes",
                        job_id,
                        attempt,
                        bytes.len()
                    );
                    return Ok(Some(bytes));
                }
                JobStatus::Fail => {
                    log::warn!(
                        "Job {} reported FAIL on poll {}: {}",
                        job_id,
                        attempt,
                        status.error_description.as_deref().unwrap_or("no detail")
                    );
                }
                JobStatus::Initial | JobStatus::Processing => {
                    log::debug!("Job {} still {:?} on poll {}", job_id, status.status, attempt);
                }
            }

            if attempt < self.max_attempts {
                tokio::time::sleep(self.poll_delay).await;
            }
        }

        log::warn!(
            "Job {} not done after {} polls, giving up",
            job_id,
            self.max_attempts
        );
        Ok(None)
    }

    /// Full round-trip for one prompt under the given settings.
    pub async fn generate(&self, prompt: &str, settings: &UserSettings) -> Result<Option<Vec<u8>>> {
        let pipeline_id = self.discover_pipeline().await?;
        let job_id = self
            .submit(prompt, &pipeline_id, settings.width, settings.height, settings.style)
            .await?;
        self.await_result(&job_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::generation::{GenerationResult, Pipeline, StatusResponse};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Scripted service: hands out a fixed pipeline list and a sequence of
    /// job statuses, counting every call.
    struct ScriptedService {
        pipelines: Vec<Pipeline>,
        statuses: Mutex<Vec<StatusResponse>>,
        status_calls: Mutex<u32>,
        submissions: Mutex<Vec<GenerationRequest>>,
    }

    impl ScriptedService {
        fn new(pipelines: Vec<Pipeline>, statuses: Vec<StatusResponse>) -> Self {
            Self {
                pipelines,
                statuses: Mutex::new(statuses),
                status_calls: Mutex::new(0),
                submissions: Mutex::new(Vec::new()),
            }
        }

        fn status_calls(&self) -> u32 {
            *self.status_calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl GenerationService for ScriptedService {
        async fn list_pipelines(&self) -> Result<Vec<Pipeline>> {
            Ok(self.pipelines.clone())
        }

        async fn run_generation(&self, request: &GenerationRequest) -> Result<String> {
            self.submissions.lock().unwrap().push(request.clone());
            Ok("j1".to_string())
        }

        async fn check_status(&self, _job_id: &str) -> Result<StatusResponse> {
            *self.status_calls.lock().unwrap() += 1;
            let mut statuses = self.statuses.lock().unwrap();
            if statuses.is_empty() {
                Ok(pending())
            } else {
                Ok(statuses.remove(0))
            }
        }
    }

    fn pipeline(id: &str) -> Pipeline {
        Pipeline {
            id: id.to_string(),
            name: None,
            status: None,
        }
    }

    fn pending() -> StatusResponse {
        StatusResponse {
            uuid: "j1".into(),
            status: JobStatus::Processing,
            result: None,
            error_description: None,
        }
    }

    fn done_with(payload: &[u8]) -> StatusResponse {
        StatusResponse {
            uuid: "j1".into(),
            status: JobStatus::Done,
            result: Some(GenerationResult {
                files: vec![BASE64.encode(payload)],
                censored: Some(false),
            }),
            error_description: None,
        }
    }

    #[tokio::test]
    async fn test_discover_returns_first_pipeline() {
        let service = Arc::new(ScriptedService::new(
            vec![pipeline("p1"), pipeline("p2")],
            vec![],
        ));
        let client = GenerationClient::new(service);
        assert_eq!(client.discover_pipeline().await.unwrap(), "p1");
    }

    #[tokio::test]
    async fn test_discover_empty_list_is_service_error() {
        let service = Arc::new(ScriptedService::new(vec![], vec![]));
        let client = GenerationClient::new(service);
        match client.discover_pipeline().await {
            Err(FusionError::ServiceError(_)) => {}
            other => panic!("expected service error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_done_on_third_poll() {
        let service = Arc::new(ScriptedService::new(
            vec![pipeline("p1")],
            vec![pending(), pending(), done_with(b"image-bytes")],
        ));
        let client = GenerationClient::new(service.clone());

        let bytes = client.await_result("j1").await.unwrap();
        assert_eq!(bytes.as_deref(), Some(&b"image-bytes"[..]));
        assert_eq!(service.status_calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_is_timeout_not_error() {
        let service = Arc::new(ScriptedService::new(vec![pipeline("p1")], vec![]));
        let client = GenerationClient::new(service.clone());

        let outcome = client.await_result("j1").await.unwrap();
        assert!(outcome.is_none());
        assert_eq!(service.status_calls(), DEFAULT_MAX_ATTEMPTS);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fail_status_keeps_polling() {
        let mut statuses = vec![StatusResponse {
            uuid: "j1".into(),
            status: JobStatus::Fail,
            result: None,
            error_description: Some("boom".into()),
        }];
        statuses.push(done_with(b"late"));

        let service = Arc::new(ScriptedService::new(vec![pipeline("p1")], statuses));
        let client = GenerationClient::new(service.clone());

        let bytes = client.await_result("j1").await.unwrap();
        assert_eq!(bytes.as_deref(), Some(&b"late"[..]));
        assert_eq!(service.status_calls(), 2);
    }

    #[tokio::test]
    async fn test_done_without_files_is_service_error() {
        let service = Arc::new(ScriptedService::new(
            vec![pipeline("p1")],
            vec![StatusResponse {
                uuid: "j1".into(),
                status: JobStatus::Done,
                result: Some(GenerationResult {
                    files: vec![],
                    censored: None,
                }),
                error_description: None,
            }],
        ));
        let client = GenerationClient::new(service);
        assert!(matches!(
            client.await_result("j1").await,
            Err(FusionError::ServiceError(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_generate_submits_settings() {
        let service = Arc::new(ScriptedService::new(
            vec![pipeline("p1")],
            vec![done_with(b"ok")],
        ));
        let client = GenerationClient::new(service.clone());

        let settings = UserSettings {
            style: ImageStyle::Kandinsky,
            width: 800,
            height: 600,
        };
        let bytes = client.generate("a ship", &settings).await.unwrap();
        assert!(bytes.is_some());

        let submissions = service.submissions.lock().unwrap();
        assert_eq!(submissions.len(), 1);
        assert_eq!(submissions[0].pipeline_id, "p1");
        assert_eq!(submissions[0].prompt, "a ship");
        assert_eq!(submissions[0].width, 800);
        assert_eq!(submissions[0].height, 600);
        assert_eq!(submissions[0].style, ImageStyle::Kandinsky);
    }
}
