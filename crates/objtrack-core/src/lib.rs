//! Object lifetime tracking for Vulkan handles.
//!
//! A [`Tracker`] keeps one registry of live objects per instance and per
//! device, and answers the questions an interception layer asks around each
//! API call: is this handle alive, does it belong to this device, was it
//! destroyed with the allocator it was created with, and what is left over
//! when its owner goes away.

pub mod config;
pub mod directory;
pub mod error;
pub mod lifetime;
pub mod record;
pub mod report;
pub mod tracker;

pub use config::{ReportConfig, TrackerConfig};
pub use directory::{Context, ContextKind, DispatchKey, RegistryDirectory};
pub use error::CoreError;
pub use record::{ObjectRecord, QueueInfo};
pub use report::{MemorySink, RecordedReport, Report, ReportSink, Severity, TracingSink};
pub use tracker::{Tracker, NULL_HANDLE};
