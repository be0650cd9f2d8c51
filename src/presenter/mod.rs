//! Request/render adapter between the UI surface and the analysis services.

pub mod console;
pub mod sink;
pub mod state;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::{PanelStyle, PhishGuardError};
use crate::models::{AnalysisResult, ImageUpload};
use crate::services::{ClassificationService, ImageAnalysisService};

pub use console::ConsoleSink;
pub use sink::{HtmlPanel, PanelContents, ResultSink, SinkSet};
pub use state::{ViewState, EMPTY_URL_MESSAGE, QR_LOADING_MESSAGE, URL_LOADING_MESSAGE};

/// Runs scans against the injected services and renders each outcome into the sink.
///
/// At most one request is in flight per presenter. Every scan that reaches
/// the network ends in exactly one terminal view; the presenter never leaves
/// the sink in the loading state.
pub struct ResultPresenter {
    classifier: Arc<dyn ClassificationService>,
    analyzer: Arc<dyn ImageAnalysisService>,
    sink: Arc<dyn ResultSink>,
    state: Mutex<ViewState>,
    busy: AtomicBool,
}

/// Held for the duration of one request; re-enables the trigger on drop.
struct InFlight<'a> {
    presenter: &'a ResultPresenter,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        // A future dropped mid-request must not leave the spinner behind.
        if self.presenter.state().is_loading() {
            warn!("Scan abandoned before the service answered");
            self.presenter.show(ViewState::Idle);
        }
        self.presenter.busy.store(false, Ordering::Release);
        self.presenter.sink.set_trigger_enabled(true);
    }
}

impl ResultPresenter {
    pub fn new(
        classifier: Arc<dyn ClassificationService>,
        analyzer: Arc<dyn ImageAnalysisService>,
        sink: Arc<dyn ResultSink>,
    ) -> Self {
        Self {
            classifier,
            analyzer,
            sink,
            state: Mutex::new(ViewState::Idle),
            busy: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> ViewState {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Classify one URL and render the verdict.
    pub async fn scan_url(&self, url_text: &str) -> ViewState {
        if self.is_busy() {
            warn!("URL scan ignored, a request is already in flight");
            return self.state();
        }

        let url = url_text.trim();
        if url.is_empty() {
            return self.reject(PhishGuardError::Validation(EMPTY_URL_MESSAGE.into()));
        }

        let Some(_in_flight) = self.begin(URL_LOADING_MESSAGE) else {
            return self.state();
        };

        let request_id = Uuid::new_v4();
        info!(%request_id, url = %url, service = self.classifier.service_name(), "Scanning URL");

        let outcome = match self.classifier.classify_url(url).await {
            Ok(raw) => raw.normalize(Some(url)),
            Err(e) => Err(e),
        };
        self.settle(outcome)
    }

    /// Analyze an uploaded image and render the first decoded result.
    ///
    /// `None` (no file picked) is a no-op.
    pub async fn scan_qr(&self, upload: Option<ImageUpload>) -> ViewState {
        let Some(upload) = upload else {
            debug!("No image supplied, nothing to scan");
            return self.state();
        };

        let Some(_in_flight) = self.begin(QR_LOADING_MESSAGE) else {
            warn!("Image scan ignored, a request is already in flight");
            return self.state();
        };

        let request_id = Uuid::new_v4();
        info!(
            %request_id,
            file = %upload.file_name,
            bytes = upload.bytes.len(),
            service = self.analyzer.service_name(),
            "Scanning image"
        );

        let outcome = match self.analyzer.analyze_image(&upload).await {
            Ok(response) => response.into_first(),
            Err(e) => Err(e),
        };
        self.settle(outcome)
    }

    fn begin(&self, loading_message: &str) -> Option<InFlight<'_>> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return None;
        }
        self.sink.set_trigger_enabled(false);
        self.show(ViewState::loading(loading_message));
        Some(InFlight { presenter: self })
    }

    /// Surface input that was refused before any request started.
    ///
    /// The sink only raises an alert for it, so the stored state keeps
    /// describing whatever the panel still displays.
    fn reject(&self, err: PhishGuardError) -> ViewState {
        debug!(error = %err, "Input rejected");
        let view = ViewState::from_error(&err);
        self.sink.show(&view);
        view
    }

    /// Replace the loader with the outcome of a request.
    fn settle(&self, outcome: Result<AnalysisResult, PhishGuardError>) -> ViewState {
        let view = match outcome {
            Ok(result) => {
                info!(
                    verdict = %result.verdict,
                    severity = result.severity().css_class(),
                    risk_score = result.risk_score,
                    "Scan complete"
                );
                ViewState::Result { result }
            }
            Err(err) => {
                let class = err.classify();
                warn!(error_type = class.error_type, error = %err, "Scan did not produce a verdict");
                // A validation alert would leave the loader on the panel.
                if class.style == PanelStyle::Validation {
                    ViewState::ErrorShown {
                        error_type: class.error_type.to_string(),
                        message: err.to_string(),
                    }
                } else {
                    ViewState::from_error(&err)
                }
            }
        };
        self.show(view.clone());
        view
    }

    fn show(&self, view: ViewState) {
        self.sink.show(&view);
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = view;
    }
}
