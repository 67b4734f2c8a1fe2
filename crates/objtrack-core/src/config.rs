use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::report::Severity;

/// Top-level tracker configuration, loaded from objtrack.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackerConfig {
    #[serde(default)]
    pub report: ReportConfig,
}

/// Controls which diagnostics reach the log and how errors affect the
/// intercepted call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Severities forwarded to the log; everything else is dropped
    #[serde(default = "default_flags")]
    pub flags: Vec<Severity>,
    /// Skip the real API call when an error is reported
    #[serde(default = "default_true")]
    pub skip_on_error: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            flags: default_flags(),
            skip_on_error: true,
        }
    }
}

impl ReportConfig {
    pub fn is_enabled(&self, severity: Severity) -> bool {
        self.flags.contains(&severity)
    }
}

impl TrackerConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, CoreError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from file if it exists, otherwise return defaults.
    pub fn load_or_default(path: &str) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(CoreError::Io(_)) => Self::default(),
            Err(e) => {
                tracing::warn!(path, error = %e, "ignoring malformed tracker configuration");
                Self::default()
            }
        }
    }
}

fn default_flags() -> Vec<Severity> {
    vec![Severity::Error, Severity::Warning]
}

fn default_true() -> bool {
    true
}
