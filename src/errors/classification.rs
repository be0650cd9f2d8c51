use super::types::PhishGuardError;

/// How a failure is presented in the result panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelStyle {
    /// Prompt next to the input; the panel is left untouched.
    Validation,
    /// Neutral message, no error styling.
    Notice,
    Error,
}

impl PanelStyle {
    pub fn css_class(&self) -> &'static str {
        match self {
            PanelStyle::Validation => "validation",
            PanelStyle::Notice => "notice",
            PanelStyle::Error => "error",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    pub style: PanelStyle,
}

impl PhishGuardError {
    /// Classify this error to determine its name and how it is shown to the user.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            PhishGuardError::Validation(_) => ErrorClassification {
                error_type: "ValidationError",
                style: PanelStyle::Validation,
            },
            PhishGuardError::EmptyResult => ErrorClassification {
                error_type: "EmptyResultError",
                style: PanelStyle::Notice,
            },
            PhishGuardError::Transport(_) => ErrorClassification {
                error_type: "TransportError",
                style: PanelStyle::Error,
            },
            PhishGuardError::Service(_) => ErrorClassification {
                error_type: "ServiceError",
                style: PanelStyle::Error,
            },
            PhishGuardError::ContractViolation(_) => ErrorClassification {
                error_type: "ContractViolation",
                style: PanelStyle::Error,
            },
            PhishGuardError::Config(_) => ErrorClassification {
                error_type: "ConfigError",
                style: PanelStyle::Error,
            },
            PhishGuardError::Render(_) => ErrorClassification {
                error_type: "RenderError",
                style: PanelStyle::Error,
            },
            PhishGuardError::Io(_) => ErrorClassification {
                error_type: "IoError",
                style: PanelStyle::Error,
            },
            PhishGuardError::Json(_) => ErrorClassification {
                error_type: "JsonError",
                style: PanelStyle::Error,
            },
            PhishGuardError::Yaml(_) => ErrorClassification {
                error_type: "YamlError",
                style: PanelStyle::Error,
            },
        }
    }

    /// Process exit code used by the CLI when a scan ends in this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            PhishGuardError::Config(_) | PhishGuardError::Yaml(_) => 2,
            PhishGuardError::Validation(_) => 3,
            PhishGuardError::Transport(_) => 4,
            PhishGuardError::Service(_) => 5,
            PhishGuardError::EmptyResult => 6,
            PhishGuardError::ContractViolation(_) => 7,
            _ => 1,
        }
    }
}
