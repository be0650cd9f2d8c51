//! HTML fragments for the result panel.
//!
//! Templates are compiled by askama, which HTML-escapes every interpolated
//! value. Service-controlled text (URLs, verdicts, details) is never inserted
//! raw.

use askama::Template;

use crate::errors::{PanelStyle, PhishGuardError};
use crate::models::AnalysisResult;
use crate::presenter::ViewState;

#[derive(Template)]
#[template(
    source = r#"<div class="result-card {{ severity_class }}">
    <div class="icon-wrapper">
        <i class="fas {{ icon }}"></i>
    </div>
    <h3>{{ verdict }}</h3>
    <p class="url-display">{{ subject }}</p>
    <div class="score-bar">
        <div class="score-fill" style="width: {{ risk_score }}%"></div>
    </div>
    <p>Risk Score: <strong>{{ risk_score }}/100</strong></p>
    <ul class="details-list">
        {%- for detail in details %}
        <li>{{ detail }}</li>
        {%- endfor %}
    </ul>
</div>"#,
    ext = "html"
)]
struct ResultCardTemplate<'a> {
    severity_class: &'static str,
    icon: &'static str,
    verdict: &'a str,
    subject: &'a str,
    risk_score: f64,
    details: &'a [String],
}

#[derive(Template)]
#[template(source = r#"<div class="loader">{{ message }}</div>"#, ext = "html")]
struct LoaderTemplate<'a> {
    message: &'a str,
}

#[derive(Template)]
#[template(source = r#"<span class="{{ class }}">{{ message }}</span>"#, ext = "html")]
struct StatusTemplate<'a> {
    class: &'static str,
    message: &'a str,
}

#[derive(Template)]
#[template(
    source = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{{ title }}</title>
<link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css">
<style>
body { font-family: sans-serif; max-width: 40rem; margin: 2rem auto; }
.result-card { border-radius: 8px; padding: 1rem 1.5rem; }
.result-card.safe { border: 2px solid #2e7d32; }
.result-card.danger { border: 2px solid #c62828; }
.score-bar { background: #eee; height: 10px; border-radius: 5px; }
.score-fill { background: #c62828; height: 100%; border-radius: 5px; }
.safe .score-fill { background: #2e7d32; }
.error { color: #c62828; }
.hidden { display: none; }
</style>
</head>
<body>
<div id="result" class="result-box{% if hidden %} hidden{% endif %}">
{{ panel|safe }}
</div>
</body>
</html>
"#,
    ext = "html"
)]
struct DocumentTemplate<'a> {
    title: &'a str,
    panel: &'a str,
    hidden: bool,
}

/// Render the card for a successful analysis.
pub fn render_result_card(result: &AnalysisResult) -> Result<String, PhishGuardError> {
    let severity = result.severity();
    let card = ResultCardTemplate {
        severity_class: severity.css_class(),
        icon: severity.icon(),
        verdict: &result.verdict,
        subject: &result.subject,
        risk_score: result.risk_score,
        details: &result.details,
    };
    Ok(card.render()?)
}

pub fn render_loader(message: &str) -> Result<String, PhishGuardError> {
    Ok(LoaderTemplate { message }.render()?)
}

pub fn render_status(style: PanelStyle, message: &str) -> Result<String, PhishGuardError> {
    Ok(StatusTemplate { class: style.css_class(), message }.render()?)
}

/// Render the panel markup for a view state.
///
/// Returns `None` for states that leave the panel as it was (idle, validation prompts).
pub fn render_panel(view: &ViewState) -> Result<Option<String>, PhishGuardError> {
    let markup = match view {
        ViewState::Idle | ViewState::ValidationShown { .. } => return Ok(None),
        ViewState::Loading { message } => render_loader(message)?,
        ViewState::Result { result } => render_result_card(result)?,
        ViewState::Empty { message } => render_status(PanelStyle::Notice, message)?,
        ViewState::ErrorShown { message, .. } => render_status(PanelStyle::Error, message)?,
    };
    Ok(Some(markup))
}

/// Wrap panel markup in a standalone page.
pub fn render_document(title: &str, panel: &str, hidden: bool) -> Result<String, PhishGuardError> {
    Ok(DocumentTemplate { title, panel, hidden }.render()?)
}
