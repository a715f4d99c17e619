//! Thin HTTP client for the third-party image generation API.
//!
//! One POST per call, bearer credential, fixed generation parameters and a
//! hard request timeout. Non-2xx statuses and transport failures come back
//! as `UpstreamError`; the caller decides what they mean to clients.
use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::error::{AppError, AppResult, UpstreamError};

pub const NUM_OUTPUTS: u32 = 1;
pub const ASPECT_RATIO: &str = "9:16";
pub const OUTPUT_FORMAT: &str = "webp";
pub const OUTPUT_QUALITY: u32 = 90;

/// JSON body sent to the image API.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationPayload<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub num_outputs: u32,
    pub aspect_ratio: &'static str,
    pub output_format: &'static str,
    pub output_quality: u32,
}

impl<'a> GenerationPayload<'a> {
    pub fn new(model: &'a str, prompt: &'a str) -> Self {
        GenerationPayload {
            model,
            prompt,
            num_outputs: NUM_OUTPUTS,
            aspect_ratio: ASPECT_RATIO,
            output_format: OUTPUT_FORMAT,
            output_quality: OUTPUT_QUALITY,
        }
    }
}

#[derive(Clone)]
pub struct ImageApiClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl ImageApiClient {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(AppError::HttpClient)?;
        Ok(ImageApiClient {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.image_api_url.clone(),
            config.image_api_key.clone(),
            config.image_model.clone(),
            config.upstream_timeout,
        )
    }

    /// Submit a generation request for an already augmented prompt.
    ///
    /// A 2xx body that is not valid JSON is returned as `Value::Null`; the
    /// translator treats that like any other payload without an image.
    pub async fn generate(&self, prompt: &str) -> Result<Value, UpstreamError> {
        let payload = GenerationPayload::new(&self.model, prompt);
        tracing::info!("Sending generation request to {}", self.endpoint);
        tracing::debug!("Generation payload: {:?}", payload);

        let response = self.client.post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let text = response.text().await?;
            Ok(serde_json::from_str(&text).unwrap_or_else(|e| {
                tracing::warn!("Upstream returned non-JSON body: {}", e);
                Value::Null
            }))
        } else {
            let body = response.text().await.unwrap_or_else(|_| "Unable to read error body".to_string());
            tracing::error!("Upstream generation failed. Status: {}, Body: {:.512}", status, body);
            Err(UpstreamError::Status { status, body })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_carries_fixed_parameters() {
        let v = serde_json::to_value(GenerationPayload::new("flux/schnell", "a fox")).unwrap();
        assert_eq!(v["model"], "flux/schnell");
        assert_eq!(v["prompt"], "a fox");
        assert_eq!(v["num_outputs"], 1);
        assert_eq!(v["aspect_ratio"], "9:16");
        assert_eq!(v["output_format"], "webp");
        assert_eq!(v["output_quality"], 90);
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_transport_error() {
        let client = ImageApiClient::new(
            "http://127.0.0.1:9/generate",
            "key",
            "m",
            Duration::from_secs(2),
        )
        .unwrap();
        let err = client.generate("x").await.unwrap_err();
        assert!(err.status().is_none());
    }
}
