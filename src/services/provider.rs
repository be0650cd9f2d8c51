use async_trait::async_trait;
use crate::errors::PhishGuardError;
use crate::models::{ImageUpload, QrResponse, RawAnalysis};

/// Scores a URL for phishing risk.
#[async_trait]
pub trait ClassificationService: Send + Sync {
    /// Submit one URL and return the decoded, not yet validated, verdict body.
    async fn classify_url(&self, url: &str) -> Result<RawAnalysis, PhishGuardError>;

    /// Service name for logging
    fn service_name(&self) -> &str;
}

/// Decodes the QR codes in an uploaded image and classifies their content.
#[async_trait]
pub trait ImageAnalysisService: Send + Sync {
    async fn analyze_image(&self, upload: &ImageUpload) -> Result<QrResponse, PhishGuardError>;

    fn service_name(&self) -> &str;
}
