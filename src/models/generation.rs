use serde::{Deserialize, Serialize};

use crate::models::settings::ImageStyle;

/// A remote generation pipeline (model) as listed by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipeline {
    pub id: String,
    pub name: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub pipeline_id: String,
    pub width: u32,
    pub height: u32,
    pub style: ImageStyle,
}

impl GenerationRequest {
    /// The `params` payload of the run form. Always exactly one image.
    pub fn params(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "GENERATE",
            "numImages": 1,
            "width": self.width,
            "height": self.height,
            "style": self.style.as_str(),
            "generateParams": {
                "query": self.prompt
            }
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RunResponse {
    pub uuid: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    #[serde(rename = "INITIAL")]
    Initial,
    #[serde(rename = "PROCESSING")]
    Processing,
    #[serde(rename = "DONE")]
    Done,
    #[serde(rename = "FAIL")]
    Fail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    pub files: Vec<String>,
    pub censored: Option<bool>,
}

/// Status document returned for a tracked job. A missing `status` field in
/// the raw response fails deserialization and surfaces as a service error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub uuid: String,
    pub status: JobStatus,
    pub result: Option<GenerationResult>,
    #[serde(rename = "errorDescription")]
    pub error_description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_params_shape() {
        let request = GenerationRequest {
            prompt: "a cat".to_string(),
            pipeline_id: "p1".to_string(),
            width: 800,
            height: 600,
            style: ImageStyle::Uhd,
        };

        let params = request.params();
        assert_eq!(params["type"], "GENERATE");
        assert_eq!(params["numImages"], 1);
        assert_eq!(params["width"], 800);
        assert_eq!(params["height"], 600);
        assert_eq!(params["style"], "UHD");
        assert_eq!(params["generateParams"]["query"], "a cat");
    }

    #[test]
    fn test_status_deserialization() {
        let done: StatusResponse = serde_json::from_str(
            r#"{"uuid":"j1","status":"DONE","result":{"files":["aGk="],"censored":false}}"#,
        )
        .unwrap();
        assert_eq!(done.status, JobStatus::Done);
        assert_eq!(done.result.unwrap().files.len(), 1);

        let pending: StatusResponse =
            serde_json::from_str(r#"{"uuid":"j1","status":"PROCESSING"}"#).unwrap();
        assert_eq!(pending.status, JobStatus::Processing);
        assert!(pending.result.is_none());

        // no status field at all
        assert!(serde_json::from_str::<StatusResponse>(r#"{"uuid":"j1"}"#).is_err());
    }
}
