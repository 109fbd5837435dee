use serde::{Deserialize, Serialize};

use crate::element::ScrollBehavior;

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

/// Defaults applied to scroll requests.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Behavior used when a request leaves it unset (default: "auto").
    #[serde(default)]
    pub default_behavior: ScrollBehavior,
}

/// Logging knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    /// Log every rendered-output emission at TRACE (default: false).
    #[serde(default)]
    pub trace_emissions: bool,
    /// EnvFilter directive used when RUST_LOG is unset (default: "info").
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            trace_emissions: false,
            log_filter: default_log_filter(),
        }
    }
}
