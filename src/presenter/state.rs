use serde::Serialize;

use crate::errors::PhishGuardError;
use crate::models::AnalysisResult;

pub const URL_LOADING_MESSAGE: &str = "Scanning...";
pub const QR_LOADING_MESSAGE: &str = "Decoding & Analyzing...";
pub const EMPTY_URL_MESSAGE: &str = "Please enter a URL";

/// What the result panel currently shows. Exactly one state is visible at a time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ViewState {
    Idle,
    Loading { message: String },
    Result { result: AnalysisResult },
    /// The image was analyzed but nothing was decoded.
    Empty { message: String },
    ErrorShown { error_type: String, message: String },
    /// Input was rejected before any request; the panel itself is unchanged.
    ValidationShown { message: String },
}

impl ViewState {
    pub fn loading(message: &str) -> Self {
        ViewState::Loading { message: message.to_string() }
    }

    /// Terminal state for a failed scan.
    pub fn from_error(err: &PhishGuardError) -> Self {
        match err {
            PhishGuardError::Validation(message) => ViewState::ValidationShown {
                message: message.clone(),
            },
            PhishGuardError::EmptyResult => ViewState::Empty {
                message: err.to_string(),
            },
            other => ViewState::ErrorShown {
                error_type: other.classify().error_type.to_string(),
                message: other.to_string(),
            },
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading { .. })
    }

    /// True once a scan has settled into something the user can read.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ViewState::Idle | ViewState::Loading { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            ViewState::Idle => "idle",
            ViewState::Loading { .. } => "loading",
            ViewState::Result { .. } => "result",
            ViewState::Empty { .. } => "empty",
            ViewState::ErrorShown { .. } => "error",
            ViewState::ValidationShown { .. } => "validation",
        }
    }
}
