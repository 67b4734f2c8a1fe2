//! Diagnostic reporting.
//!
//! The engine never decides on its own whether a problem is fatal to the
//! intercepted call: it hands a [`Report`] to the context's [`ReportSink`]
//! and propagates the sink's verdict.

use ash::vk;
use objtrack_types::ObjectType;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::config::ReportConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Information,
    Warning,
    PerformanceWarning,
    Error,
    Debug,
}

impl Severity {
    pub fn debug_report_flags(self) -> vk::DebugReportFlagsEXT {
        match self {
            Severity::Information => vk::DebugReportFlagsEXT::INFORMATION,
            Severity::Warning => vk::DebugReportFlagsEXT::WARNING,
            Severity::PerformanceWarning => vk::DebugReportFlagsEXT::PERFORMANCE_WARNING,
            Severity::Error => vk::DebugReportFlagsEXT::ERROR,
            Severity::Debug => vk::DebugReportFlagsEXT::DEBUG,
        }
    }
}

/// One diagnostic about one object.
#[derive(Debug)]
pub struct Report<'a> {
    pub severity: Severity,
    pub object_type: ObjectType,
    pub handle: u64,
    pub code: &'a str,
    pub message: String,
}

/// Receives diagnostics. Returns `true` when the intercepted call should be
/// skipped.
pub trait ReportSink: Send + Sync {
    fn log_msg(&self, report: &Report<'_>) -> bool;
}

/// Forwards diagnostics to `tracing`.
pub struct TracingSink {
    config: ReportConfig,
}

impl TracingSink {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }
}

impl ReportSink for TracingSink {
    fn log_msg(&self, report: &Report<'_>) -> bool {
        if !self.config.is_enabled(report.severity) {
            return false;
        }

        let code = report.code;
        let object_type = report.object_type.name();
        let handle = report.handle;
        let report_type = report.object_type.debug_report_type().as_raw();
        match report.severity {
            Severity::Error => error!(code, object_type, report_type, handle, "{}", report.message),
            Severity::Warning | Severity::PerformanceWarning => {
                warn!(code, object_type, report_type, handle, "{}", report.message)
            }
            Severity::Information => info!(code, object_type, report_type, handle, "{}", report.message),
            Severity::Debug => debug!(code, object_type, report_type, handle, "{}", report.message),
        }

        report.severity == Severity::Error && self.config.skip_on_error
    }
}

/// An owned copy of a [`Report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedReport {
    pub severity: Severity,
    pub object_type: ObjectType,
    pub handle: u64,
    pub code: String,
    pub message: String,
}

/// Keeps every diagnostic in memory. Errors ask for the call to be skipped.
#[derive(Default)]
pub struct MemorySink {
    reports: Mutex<Vec<RecordedReport>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<RecordedReport> {
        self.reports.lock().clone()
    }

    /// All reports at `Severity::Error`.
    pub fn errors(&self) -> Vec<RecordedReport> {
        self.reports
            .lock()
            .iter()
            .filter(|r| r.severity == Severity::Error)
            .cloned()
            .collect()
    }

    pub fn count_code(&self, code: &str) -> usize {
        self.reports.lock().iter().filter(|r| r.code == code).count()
    }

    pub fn clear(&self) {
        self.reports.lock().clear();
    }
}

impl ReportSink for MemorySink {
    fn log_msg(&self, report: &Report<'_>) -> bool {
        self.reports.lock().push(RecordedReport {
            severity: report.severity,
            object_type: report.object_type,
            handle: report.handle,
            code: report.code.to_string(),
            message: report.message.clone(),
        });
        report.severity == Severity::Error
    }
}
