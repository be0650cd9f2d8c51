use thiserror::Error;

#[derive(Debug, Error)]
pub enum PhishGuardError {
    /// Rejected locally before any request was made.
    #[error("{0}")]
    Validation(String),

    #[error("Error: {0}")]
    Transport(String),

    /// The service answered with a well-formed `error` body.
    #[error("{0}")]
    Service(String),

    #[error("No analyzing data found.")]
    EmptyResult,

    #[error("Error: {0}")]
    ContractViolation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl From<reqwest::Error> for PhishGuardError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PhishGuardError::Transport(format!("request timed out: {}", err))
        } else if err.is_connect() {
            PhishGuardError::Transport(format!("connection failed: {}", err))
        } else if err.is_decode() {
            PhishGuardError::Transport(format!("malformed response: {}", err))
        } else {
            PhishGuardError::Transport(err.to_string())
        }
    }
}

impl From<askama::Error> for PhishGuardError {
    fn from(err: askama::Error) -> Self {
        PhishGuardError::Render(err.to_string())
    }
}
