use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::errors::PhishGuardError;
use super::severity::Severity;

/// Verdict label that marks a result as benign when the service omits `is_phishing`.
pub const LEGITIMATE_VERDICT: &str = "Legitimate";

/// Normalized verdict payload returned by either analysis endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub verdict: String,
    pub is_phishing: bool,
    /// Risk magnitude on a 0-100 scale, exactly as the service reported it.
    pub risk_score: f64,
    /// The URL or decoded QR content that was analyzed.
    pub subject: String,
    pub details: Vec<String>,
}

impl AnalysisResult {
    pub fn severity(&self) -> Severity {
        Severity::from_flag(self.is_phishing)
    }
}

/// Verdict payload as it arrives on the wire.
///
/// Accepts the field names of both backend variants: `verdict`/`result`,
/// `risk_score`/`confidence` and `url`/`scanned_content`/`content`. The
/// subject fields are kept apart and read in that order of preference.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAnalysis {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default, alias = "result")]
    pub verdict: Option<String>,
    #[serde(default)]
    pub is_phishing: Option<bool>,
    #[serde(default, alias = "confidence")]
    pub risk_score: Option<f64>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub scanned_content: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub details: Option<Vec<String>>,
}

impl RawAnalysis {
    /// Validate the payload and produce the normalized result.
    ///
    /// `error` is checked before any other field. `fallback_subject` is used
    /// when the payload itself names no subject.
    pub fn normalize(self, fallback_subject: Option<&str>) -> Result<AnalysisResult, PhishGuardError> {
        if let Some(message) = self.error {
            return Err(PhishGuardError::Service(message));
        }

        let verdict = self.verdict.ok_or_else(|| {
            PhishGuardError::ContractViolation("response carries neither an error nor a verdict".into())
        })?;
        let risk_score = self.risk_score.ok_or_else(|| {
            PhishGuardError::ContractViolation("response carries a verdict but no risk score".into())
        })?;
        if !risk_score.is_finite() || !(0.0..=100.0).contains(&risk_score) {
            return Err(PhishGuardError::ContractViolation(format!(
                "risk score {} is outside 0-100",
                risk_score
            )));
        }

        let is_phishing = self
            .is_phishing
            .unwrap_or_else(|| verdict != LEGITIMATE_VERDICT);

        let subject = self
            .url
            .or(self.scanned_content)
            .or(self.content)
            .or_else(|| fallback_subject.map(str::to_string))
            .unwrap_or_default();

        Ok(AnalysisResult {
            verdict,
            is_phishing,
            risk_score,
            subject,
            details: self.details.unwrap_or_default(),
        })
    }
}

/// One decoded QR payload paired with its classification.
#[derive(Debug, Clone, Deserialize)]
pub struct QrEntry {
    pub content: String,
    pub analysis: RawAnalysis,
}

/// Body of the image analysis endpoint.
#[derive(Debug, Clone)]
pub enum QrResponse {
    Failure { error: String },
    /// Entries are decoded lazily; only the first one is ever read.
    Batch { results: Vec<Value> },
    Flattened(RawAnalysis),
}

impl<'de> Deserialize<'de> for QrResponse {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        if let Some(error) = value.get("error").and_then(Value::as_str) {
            return Ok(QrResponse::Failure { error: error.to_string() });
        }
        match value.get("results") {
            Some(Value::Array(results)) => Ok(QrResponse::Batch { results: results.clone() }),
            Some(other) => Err(D::Error::custom(format!("`results` must be an array, got {}", other))),
            None => RawAnalysis::deserialize(value)
                .map(QrResponse::Flattened)
                .map_err(D::Error::custom),
        }
    }
}

impl QrResponse {
    /// Resolve to the first decoded entry. An empty batch is [`PhishGuardError::EmptyResult`].
    pub fn into_first(self) -> Result<AnalysisResult, PhishGuardError> {
        match self {
            QrResponse::Failure { error } => Err(PhishGuardError::Service(error)),
            QrResponse::Batch { results } => {
                let first = results.into_iter().next().ok_or(PhishGuardError::EmptyResult)?;
                let entry: QrEntry = serde_json::from_value(first).map_err(|e| {
                    PhishGuardError::ContractViolation(format!("first result entry is malformed: {}", e))
                })?;
                let content = entry.content;
                entry.analysis.normalize(Some(&content))
            }
            QrResponse::Flattened(raw) => raw.normalize(None),
        }
    }
}
