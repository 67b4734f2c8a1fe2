use tracing_subscriber::{fmt, EnvFilter};

/// Filter directives for the tracker's own log lines, e.g.
/// `OBJTRACK_LOG=objtrack_core=debug`.
pub const LOG_ENV: &str = "OBJTRACK_LOG";

/// Installs a `fmt` subscriber filtered by [`LOG_ENV`], falling back to
/// `info` when the variable is unset or unparsable. The layer runs inside
/// someone else's process, so an application that already set a global
/// subscriber keeps it.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .try_init();
}
