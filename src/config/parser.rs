use std::path::Path;
use crate::errors::PhishGuardError;
use super::types::{PhishGuardConfig, ServiceConfig};
use tracing::{debug, warn};

const MAX_CONFIG_BYTES: u64 = 1_048_576;
const MAX_TIMEOUT_SECS: u64 = 300;

pub async fn parse_config(path: &Path) -> Result<PhishGuardConfig, PhishGuardError> {
    if !path.exists() {
        return Err(PhishGuardError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > MAX_CONFIG_BYTES {
        return Err(PhishGuardError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    let config = parse_config_str(&content)?;
    debug!(path = %path.display(), "Loaded configuration");
    Ok(config)
}

pub fn parse_config_str(content: &str) -> Result<PhishGuardConfig, PhishGuardError> {
    // An empty file is a valid, all-defaults config.
    if content.trim().is_empty() {
        return Ok(PhishGuardConfig::default());
    }
    let config: PhishGuardConfig = serde_yaml::from_str(content)?;
    if let Some(service) = &config.service {
        validate_service(service)?;
    }
    Ok(config)
}

/// Reject settings the HTTP backend cannot work with.
pub fn validate_service(service: &ServiceConfig) -> Result<(), PhishGuardError> {
    if let Some(base_url) = &service.base_url {
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(PhishGuardError::Config(format!(
                "base_url must start with http:// or https://, got '{}'",
                base_url
            )));
        }
        if base_url.starts_with("http://") && !is_local(base_url) {
            warn!(base_url = %base_url, "Service is reached over plain HTTP");
        }
    }

    if let Some(timeout) = service.timeout_secs {
        if timeout == 0 || timeout > MAX_TIMEOUT_SECS {
            return Err(PhishGuardError::Config(format!(
                "timeout_secs must be between 1 and {}, got {}",
                MAX_TIMEOUT_SECS, timeout
            )));
        }
    }

    for (name, endpoint) in [("url_endpoint", &service.url_endpoint), ("qr_endpoint", &service.qr_endpoint)] {
        if let Some(path) = endpoint {
            if path.trim().is_empty() {
                return Err(PhishGuardError::Config(format!("{} must not be empty", name)));
            }
        }
    }

    Ok(())
}

fn is_local(url: &str) -> bool {
    let host = url
        .trim_start_matches("http://")
        .split(['/', ':'])
        .next()
        .unwrap_or_default();
    matches!(host, "localhost" | "127.0.0.1")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Contract;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config_str(
            r#"
service:
  base_url: https://guard.example
  contract: api
  timeout_secs: 10
output:
  html_path: ./scan.html
  color: false
"#,
        )
        .unwrap();

        let service = config.service.unwrap();
        assert_eq!(service.contract, Some(Contract::Api));
        assert_eq!(service.timeout_secs, Some(10));
        let output = config.output.unwrap();
        assert_eq!(output.html_path.as_deref(), Some("./scan.html"));
        assert_eq!(output.color, Some(false));
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = parse_config_str("  \n").unwrap();
        assert!(config.service.is_none());
        assert!(config.output.is_none());
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let err = parse_config_str("service:\n  base_url: ftp://guard.example\n").unwrap_err();
        assert!(matches!(err, PhishGuardError::Config(_)));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let err = parse_config_str("service:\n  timeout_secs: 0\n").unwrap_err();
        assert!(matches!(err, PhishGuardError::Config(_)));
    }

    #[test]
    fn test_rejects_unknown_contract() {
        let err = parse_config_str("service:\n  contract: grpc\n").unwrap_err();
        assert!(matches!(err, PhishGuardError::Yaml(_)));
    }

    #[test]
    fn test_rejects_blank_endpoint_override() {
        let err = parse_config_str("service:\n  url_endpoint: \" \"\n").unwrap_err();
        assert!(matches!(err, PhishGuardError::Config(_)));
    }

    #[test]
    fn test_is_local() {
        assert!(is_local("http://localhost:3000"));
        assert!(is_local("http://127.0.0.1/predict"));
        assert!(!is_local("http://guard.example"));
    }
}
