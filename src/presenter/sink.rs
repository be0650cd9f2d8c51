use std::sync::{Arc, Mutex};

use tracing::error;

use crate::errors::PhishGuardError;
use crate::presenter::ViewState;
use crate::render::html::{render_document, render_panel};

/// The UI surface a presenter writes into.
pub trait ResultSink: Send + Sync {
    /// Replace whatever the panel shows with `view`.
    fn show(&self, view: &ViewState);

    /// Enable or disable the control that triggers a scan.
    fn set_trigger_enabled(&self, _enabled: bool) {}
}

/// Forwards every call to several sinks, in order.
pub struct SinkSet {
    sinks: Vec<Arc<dyn ResultSink>>,
}

impl SinkSet {
    pub fn new(sinks: Vec<Arc<dyn ResultSink>>) -> Self {
        Self { sinks }
    }
}

impl ResultSink for SinkSet {
    fn show(&self, view: &ViewState) {
        for sink in &self.sinks {
            sink.show(view);
        }
    }

    fn set_trigger_enabled(&self, enabled: bool) {
        for sink in &self.sinks {
            sink.set_trigger_enabled(enabled);
        }
    }
}

const RENDER_FAILURE_MARKUP: &str = r#"<span class="error">Error: result could not be displayed</span>"#;

/// Snapshot of an [`HtmlPanel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelContents {
    /// Inner markup of the result box.
    pub markup: String,
    pub hidden: bool,
    /// Last validation prompt shown to the user, outside the panel.
    pub alert: Option<String>,
    pub trigger_enabled: bool,
}

impl Default for PanelContents {
    fn default() -> Self {
        Self {
            markup: String::new(),
            hidden: true,
            alert: None,
            trigger_enabled: true,
        }
    }
}

/// Result box holding escaped HTML, one visible result at a time.
#[derive(Debug, Default)]
pub struct HtmlPanel {
    contents: Mutex<PanelContents>,
}

impl HtmlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> PanelContents {
        self.contents.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn markup(&self) -> String {
        self.snapshot().markup
    }

    /// Standalone page containing the current panel.
    pub fn to_document(&self, title: &str) -> Result<String, PhishGuardError> {
        let contents = self.snapshot();
        render_document(title, &contents.markup, contents.hidden)
    }
}

impl ResultSink for HtmlPanel {
    fn show(&self, view: &ViewState) {
        let mut contents = self.contents.lock().unwrap_or_else(|e| e.into_inner());
        match view {
            ViewState::ValidationShown { message } => {
                contents.alert = Some(message.clone());
            }
            ViewState::Idle => {
                contents.markup.clear();
                contents.hidden = true;
            }
            _ => {
                contents.markup = match render_panel(view) {
                    Ok(Some(markup)) => markup,
                    Ok(None) => String::new(),
                    Err(e) => {
                        error!(error = %e, state = view.name(), "Failed to render panel");
                        RENDER_FAILURE_MARKUP.to_string()
                    }
                };
                contents.hidden = false;
                contents.alert = None;
            }
        }
    }

    fn set_trigger_enabled(&self, enabled: bool) {
        self.contents.lock().unwrap_or_else(|e| e.into_inner()).trigger_enabled = enabled;
    }
}
