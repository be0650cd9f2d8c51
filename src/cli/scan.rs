use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::cli::commands::{QrArgs, ServiceArgs, UrlArgs};
use crate::config::{parse_config, validate_service, Endpoints, PhishGuardConfig};
use crate::errors::PhishGuardError;
use crate::models::ImageUpload;
use crate::presenter::{ConsoleSink, HtmlPanel, ResultPresenter, ResultSink, SinkSet, ViewState};
use crate::services::HttpBackend;

const DOCUMENT_TITLE: &str = "PhishGuard scan result";

/// Everything a scan command needs once flags and config are merged.
pub struct ScanSetup {
    pub endpoints: Endpoints,
    pub html_path: Option<PathBuf>,
    pub json: bool,
    pub color: bool,
}

/// Merge the config file (if any) with command-line overrides.
pub async fn resolve_setup(args: &ServiceArgs) -> Result<ScanSetup, PhishGuardError> {
    let config = match &args.config {
        Some(path) => parse_config(path).await?,
        None => PhishGuardConfig::default(),
    };

    let mut service = config.service.unwrap_or_default();
    if let Some(base_url) = &args.base_url {
        service.base_url = Some(base_url.clone());
    }
    if let Some(contract) = args.contract {
        service.contract = Some(contract);
    }
    if let Some(timeout) = args.timeout {
        service.timeout_secs = Some(timeout);
    }
    validate_service(&service)?;

    let output = config.output.unwrap_or_default();
    let html_path = args
        .html
        .clone()
        .or_else(|| output.html_path.map(PathBuf::from));

    Ok(ScanSetup {
        endpoints: service.resolve(),
        html_path,
        json: args.json,
        color: output.color.unwrap_or(true),
    })
}

pub async fn handle_url(args: UrlArgs) -> Result<ViewState, PhishGuardError> {
    let setup = resolve_setup(&args.service).await?;
    run(setup, |presenter| async move { presenter.scan_url(&args.url).await }).await
}

pub async fn handle_qr(args: QrArgs) -> Result<ViewState, PhishGuardError> {
    let setup = resolve_setup(&args.service).await?;
    let upload = ImageUpload::from_path(&args.image).await?;
    run(setup, |presenter| async move { presenter.scan_qr(Some(upload)).await }).await
}

async fn run<F, Fut>(setup: ScanSetup, scan: F) -> Result<ViewState, PhishGuardError>
where
    F: FnOnce(Arc<ResultPresenter>) -> Fut,
    Fut: std::future::Future<Output = ViewState>,
{
    if !setup.color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let backend = Arc::new(HttpBackend::new(setup.endpoints.clone())?);
    let panel = Arc::new(HtmlPanel::new());
    let sinks: Vec<Arc<dyn ResultSink>> = vec![
        Arc::new(ConsoleSink::new(setup.json)),
        panel.clone(),
    ];
    let sink = Arc::new(SinkSet::new(sinks));

    info!(
        url_endpoint = %setup.endpoints.url_endpoint(),
        qr_endpoint = %setup.endpoints.qr_endpoint(),
        "Using analysis service"
    );
    let presenter = Arc::new(ResultPresenter::new(backend.clone(), backend, sink));
    let view = scan(presenter).await;

    if setup.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    }
    if let Some(path) = &setup.html_path {
        write_document(path, &panel).await?;
    }

    Ok(view)
}

async fn write_document(path: &Path, panel: &HtmlPanel) -> Result<(), PhishGuardError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    tokio::fs::write(path, panel.to_document(DOCUMENT_TITLE)?).await?;
    info!(path = %path.display(), "Wrote result page");
    Ok(())
}

/// Process exit code for a settled scan.
pub fn exit_code_for(view: &ViewState) -> i32 {
    match view {
        ViewState::Idle | ViewState::Result { .. } => 0,
        ViewState::ValidationShown { .. } => 3,
        ViewState::Empty { .. } => 6,
        ViewState::ErrorShown { error_type, .. } => match error_type.as_str() {
            "TransportError" => 4,
            "ServiceError" => 5,
            "ContractViolation" => 7,
            _ => 1,
        },
        ViewState::Loading { .. } => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Contract;

    #[test]
    fn test_exit_codes_match_error_codes() {
        let cases = [
            (PhishGuardError::Transport("x".into()), 4),
            (PhishGuardError::Service("x".into()), 5),
            (PhishGuardError::ContractViolation("x".into()), 7),
            (PhishGuardError::EmptyResult, 6),
            (PhishGuardError::Validation("x".into()), 3),
        ];
        for (err, code) in cases {
            assert_eq!(exit_code_for(&ViewState::from_error(&err)), code);
            assert_eq!(err.exit_code(), code);
        }
    }

    #[tokio::test]
    async fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("phishguard.yaml");
        std::fs::write(
            &path,
            "service:\n  base_url: http://localhost:5000\n  contract: api\n  timeout_secs: 20\noutput:\n  html_path: from-config.html\n",
        )
        .unwrap();

        let args = ServiceArgs {
            config: Some(path),
            timeout: Some(3),
            contract: Some(Contract::Flask),
            ..Default::default()
        };
        let setup = resolve_setup(&args).await.unwrap();
        assert_eq!(setup.endpoints.url_endpoint(), "http://localhost:5000/predict-url");
        assert_eq!(setup.endpoints.timeout_secs, 3);
        assert_eq!(setup.html_path, Some(PathBuf::from("from-config.html")));
    }

    #[tokio::test]
    async fn test_invalid_override_is_config_error() {
        let args = ServiceArgs {
            base_url: Some("guard.example".into()),
            ..Default::default()
        };
        assert!(matches!(resolve_setup(&args).await, Err(PhishGuardError::Config(_))));
    }
}
