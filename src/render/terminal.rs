use console::style;

use crate::models::{AnalysisResult, Severity};
use crate::presenter::ViewState;
use crate::utils::formatting::score_bar;

const BAR_WIDTH: usize = 30;

/// Render a verdict badge with appropriate colors.
pub fn render_severity_badge(severity: Severity) -> String {
    match severity {
        Severity::Danger => style(" DANGER ").on_red().white().bold().to_string(),
        Severity::Safe => style(" SAFE ").on_green().black().bold().to_string(),
    }
}

/// Render the result card as styled terminal output.
pub fn render_result(result: &AnalysisResult) -> String {
    let severity = result.severity();
    let (marker, bar) = match severity {
        Severity::Danger => (
            style("⚠").red().bold(),
            style(score_bar(result.risk_score, BAR_WIDTH)).red(),
        ),
        Severity::Safe => (
            style("✓").green().bold(),
            style(score_bar(result.risk_score, BAR_WIDTH)).green(),
        ),
    };

    let mut out = String::new();
    out.push_str(&format!(
        "\n  {} {} {}\n",
        marker,
        render_severity_badge(severity),
        style(&result.verdict).white().bold(),
    ));
    out.push_str(&format!("  {}\n", style(&result.subject).cyan()));
    out.push_str(&format!(
        "  {} {} {}\n",
        bar,
        style("Risk Score:").dim(),
        style(format!("{}/100", result.risk_score)).white().bold(),
    ));
    for detail in &result.details {
        out.push_str(&format!("    {} {}\n", style("•").dim(), detail));
    }
    out
}

/// Render any settled view state; loading and idle produce nothing.
pub fn render_view(view: &ViewState) -> Option<String> {
    match view {
        ViewState::Idle | ViewState::Loading { .. } => None,
        ViewState::Result { result } => Some(render_result(result)),
        ViewState::Empty { message } => Some(render_info(message)),
        ViewState::ErrorShown { message, .. } => Some(render_error(message)),
        ViewState::ValidationShown { message } => Some(render_warning(message)),
    }
}

pub fn render_error(msg: &str) -> String {
    format!("{} {}", style("✗").red(), style(msg).red())
}

pub fn render_warning(msg: &str) -> String {
    format!("{} {}", style("!").yellow().bold(), style(msg).yellow())
}

pub fn render_info(msg: &str) -> String {
    format!("{} {}", style("·").dim(), style(msg).dim())
}
