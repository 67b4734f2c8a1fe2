//! Integration test: configuration and report sinks
//!
//! Run with: cargo test --test config_test -- --nocapture

use objtrack_core::{CoreError, Report, ReportConfig, ReportSink, Severity, TracingSink, TrackerConfig};
use objtrack_types::ObjectType;

fn error_report(code: &str) -> Report<'_> {
    Report {
        severity: Severity::Error,
        object_type: ObjectType::Buffer,
        handle: 0x42,
        code,
        message: "Invalid Buffer Object 0x42.".to_string(),
    }
}

#[test]
fn test_defaults() {
    let config = TrackerConfig::default();
    assert!(config.report.skip_on_error);
    assert!(config.report.is_enabled(Severity::Error));
    assert!(config.report.is_enabled(Severity::Warning));
    assert!(!config.report.is_enabled(Severity::Information));
}

#[test]
fn test_parse_report_section() {
    let config = TrackerConfig::parse(
        r#"
        [report]
        flags = ["error", "information", "performance_warning"]
        skip_on_error = false
        "#,
    )
    .expect("valid config");

    assert!(!config.report.skip_on_error);
    assert!(config.report.is_enabled(Severity::Information));
    assert!(config.report.is_enabled(Severity::PerformanceWarning));
    assert!(!config.report.is_enabled(Severity::Warning));
}

#[test]
fn test_empty_file_uses_defaults() {
    let config = TrackerConfig::parse("").expect("empty config");
    assert_eq!(config.report.flags, vec![Severity::Error, Severity::Warning]);
}

#[test]
fn test_malformed_config() {
    let result = TrackerConfig::parse("[report]\nflags = \"everything\"");
    assert!(matches!(result, Err(CoreError::Toml(_))));
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let result = TrackerConfig::load("/nonexistent/objtrack.toml");
    assert!(matches!(result, Err(CoreError::Io(_))));

    let config = TrackerConfig::load_or_default("/nonexistent/objtrack.toml");
    assert!(config.report.skip_on_error);
}

#[test]
fn test_tracing_sink_verdicts() {
    let sink = TracingSink::new(ReportConfig::default());
    assert!(sink.log_msg(&error_report("VUID-test")));

    let info = Report {
        severity: Severity::Information,
        ..error_report(objtrack_types::vuid::INFO)
    };
    assert!(!sink.log_msg(&info));

    let no_skip = TracingSink::new(ReportConfig {
        flags: vec![Severity::Error],
        skip_on_error: false,
    });
    assert!(!no_skip.log_msg(&error_report("VUID-test")));

    // Errors that are filtered out never skip the call
    let muted = TracingSink::new(ReportConfig {
        flags: vec![Severity::Warning],
        skip_on_error: true,
    });
    assert!(!muted.log_msg(&error_report("VUID-test")));
}

#[test]
fn test_severity_maps_to_debug_report_flags() {
    use ash::vk::DebugReportFlagsEXT;
    assert_eq!(Severity::Error.debug_report_flags(), DebugReportFlagsEXT::ERROR);
    assert_eq!(
        Severity::PerformanceWarning.debug_report_flags(),
        DebugReportFlagsEXT::PERFORMANCE_WARNING
    );
}
