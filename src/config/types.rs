use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct PhishGuardConfig {
    pub service: Option<ServiceConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ServiceConfig {
    pub base_url: Option<String>,
    pub contract: Option<Contract>,
    pub timeout_secs: Option<u64>,
    pub url_endpoint: Option<String>,
    pub qr_endpoint: Option<String>,
}

/// Which pair of endpoint paths the backend exposes.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Contract {
    /// `/predict-url` and `/analyze-qr`
    #[default]
    Flask,
    /// `/api/predict` and `/api/scan_qr`
    Api,
}

impl Contract {
    pub fn url_path(&self) -> &'static str {
        match self {
            Contract::Flask => "/predict-url",
            Contract::Api => "/api/predict",
        }
    }

    pub fn qr_path(&self) -> &'static str {
        match self {
            Contract::Flask => "/analyze-qr",
            Contract::Api => "/api/scan_qr",
        }
    }
}

impl std::str::FromStr for Contract {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "flask" => Ok(Contract::Flask),
            "api" => Ok(Contract::Api),
            other => Err(format!("unknown contract '{}', expected flask or api", other)),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct OutputConfig {
    pub html_path: Option<String>,
    pub color: Option<bool>,
}

/// Fully resolved endpoint settings used to build the HTTP backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub base_url: String,
    pub url_path: String,
    pub qr_path: String,
    pub timeout_secs: u64,
}

impl Endpoints {
    pub fn url_endpoint(&self) -> String {
        join_url(&self.base_url, &self.url_path)
    }

    pub fn qr_endpoint(&self) -> String {
        join_url(&self.base_url, &self.qr_path)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        ServiceConfig::default().resolve()
    }
}

impl ServiceConfig {
    pub fn resolve(&self) -> Endpoints {
        let contract = self.contract.unwrap_or_default();
        Endpoints {
            base_url: self
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            url_path: self
                .url_endpoint
                .clone()
                .unwrap_or_else(|| contract.url_path().to_string()),
            qr_path: self
                .qr_endpoint
                .clone()
                .unwrap_or_else(|| contract.qr_path().to_string()),
            timeout_secs: self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        }
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints_use_flask_contract() {
        let endpoints = Endpoints::default();
        assert_eq!(endpoints.url_endpoint(), "http://localhost:3000/predict-url");
        assert_eq!(endpoints.qr_endpoint(), "http://localhost:3000/analyze-qr");
        assert_eq!(endpoints.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_api_contract_paths() {
        let service = ServiceConfig {
            base_url: Some("https://guard.example/".into()),
            contract: Some(Contract::Api),
            ..Default::default()
        };
        let endpoints = service.resolve();
        assert_eq!(endpoints.url_endpoint(), "https://guard.example/api/predict");
        assert_eq!(endpoints.qr_endpoint(), "https://guard.example/api/scan_qr");
    }

    #[test]
    fn test_endpoint_override_beats_contract() {
        let service = ServiceConfig {
            contract: Some(Contract::Api),
            qr_endpoint: Some("v2/qr".into()),
            ..Default::default()
        };
        let endpoints = service.resolve();
        assert_eq!(endpoints.qr_endpoint(), "http://localhost:3000/v2/qr");
        assert_eq!(endpoints.url_path, "/api/predict");
    }

    #[test]
    fn test_contract_from_str() {
        assert_eq!("FLASK".parse::<Contract>().unwrap(), Contract::Flask);
        assert_eq!("api".parse::<Contract>().unwrap(), Contract::Api);
        assert!("grpc".parse::<Contract>().is_err());
    }
}
