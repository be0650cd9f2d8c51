use serde::{Deserialize, Serialize};

/// Visual category of a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Safe,
    Danger,
}

impl Severity {
    pub fn from_flag(is_phishing: bool) -> Self {
        if is_phishing {
            Severity::Danger
        } else {
            Severity::Safe
        }
    }

    /// CSS class applied to the result card.
    pub fn css_class(&self) -> &'static str {
        match self {
            Severity::Safe => "safe",
            Severity::Danger => "danger",
        }
    }

    /// Font Awesome icon shown on the result card.
    pub fn icon(&self) -> &'static str {
        match self {
            Severity::Safe => "fa-check-circle",
            Severity::Danger => "fa-exclamation-triangle",
        }
    }
}
