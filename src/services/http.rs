use std::time::Duration;

use async_trait::async_trait;
use reqwest::{multipart, Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::config::Endpoints;
use crate::errors::PhishGuardError;
use crate::models::{ImageUpload, QrResponse, RawAnalysis};
use crate::utils::truncation::truncate_error;
use super::provider::{ClassificationService, ImageAnalysisService};

/// Both analysis services, reached over HTTP.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    endpoints: Endpoints,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl HttpBackend {
    pub fn new(endpoints: Endpoints) -> Result<Self, PhishGuardError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(endpoints.timeout_secs))
            .build()
            .map_err(|e| PhishGuardError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, endpoints })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }
}

/// Decode a service response body.
///
/// A body carrying `error` is a service error whatever the status code; any
/// other non-2xx response is a transport failure.
async fn decode_body<T: DeserializeOwned>(resp: Response) -> Result<T, PhishGuardError> {
    let status = resp.status();
    let bytes = resp.bytes().await?;
    debug!(status = status.as_u16(), bytes = bytes.len(), "Service responded");

    if !status.is_success() {
        if let Ok(body) = serde_json::from_slice::<ErrorBody>(&bytes) {
            return Err(PhishGuardError::Service(body.error));
        }
        return Err(PhishGuardError::Transport(format!(
            "service returned {}: {}",
            status,
            truncate_error(String::from_utf8_lossy(&bytes).trim())
        )));
    }

    serde_json::from_slice(&bytes)
        .map_err(|e| PhishGuardError::Transport(format!("malformed response: {}", e)))
}

#[async_trait]
impl ClassificationService for HttpBackend {
    async fn classify_url(&self, url: &str) -> Result<RawAnalysis, PhishGuardError> {
        let endpoint = self.endpoints.url_endpoint();
        debug!(endpoint = %endpoint, "Submitting URL for classification");

        let resp = self.client
            .post(&endpoint)
            .json(&json!({ "url": url }))
            .send()
            .await?;

        decode_body(resp).await
    }

    fn service_name(&self) -> &str { "http-classifier" }
}

#[async_trait]
impl ImageAnalysisService for HttpBackend {
    async fn analyze_image(&self, upload: &ImageUpload) -> Result<QrResponse, PhishGuardError> {
        let endpoint = self.endpoints.qr_endpoint();
        debug!(endpoint = %endpoint, file = %upload.file_name, bytes = upload.bytes.len(), "Uploading image");

        let part = multipart::Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.content_type)
            .map_err(|e| PhishGuardError::Transport(format!("invalid content type '{}': {}", upload.content_type, e)))?;
        let form = multipart::Form::new().part("file", part);

        let resp = self.client
            .post(&endpoint)
            .multipart(form)
            .send()
            .await?;

        decode_body(resp).await
    }

    fn service_name(&self) -> &str { "http-image-analyzer" }
}
