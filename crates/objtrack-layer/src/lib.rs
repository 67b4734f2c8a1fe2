//! Object tracker interception shims.
//!
//! Each shim mirrors one intercepted Vulkan entry point. It validates every
//! handle argument, invokes the next implementation in the chain (passed in
//! as a closure) only when validation passed, and updates the tracker's
//! bookkeeping once that call has succeeded.
//!
//! Shims that receive dispatchable handles are `unsafe`: those handles must
//! point at live loader objects, see [`dispatch::dispatch_key`].

use std::sync::Arc;

use ash::prelude::VkResult;
use ash::vk;
use ash::vk::Handle;
use tracing::info;

use objtrack_core::{Context, ReportSink, Tracker, TracingSink, TrackerConfig};
use objtrack_types::ObjectType;

pub mod command;
pub mod descriptor;
pub mod device;
pub mod dispatch;
pub mod image;
pub mod instance;
pub mod memory;
pub mod swapchain;
pub mod sync;

/// Returned by creating shims whose validation asked for the call to be
/// skipped.
pub const SKIPPED: vk::Result = vk::Result::ERROR_VALIDATION_FAILED_EXT;

/// Diagnostic codes checked when destroying an object.
#[derive(Debug, Clone, Copy)]
pub struct DestroyCodes {
    /// Invalid owner (instance or device) handle
    pub owner: &'static str,
    /// Invalid object handle
    pub object: &'static str,
    /// Object owned by a different device
    pub parent: Option<&'static str>,
    /// Created with allocation callbacks, destroyed without
    pub expected_custom: Option<&'static str>,
    /// Created without allocation callbacks, destroyed with
    pub expected_default: Option<&'static str>,
}

/// The object tracker as seen by the dispatch layer.
pub struct ObjectTrackerLayer {
    tracker: Tracker,
    config: TrackerConfig,
}

impl ObjectTrackerLayer {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            tracker: Tracker::new(),
            config,
        }
    }

    /// Sets up logging and loads configuration from the platform default
    /// location, falling back to defaults.
    pub fn from_default_config() -> Self {
        objtrack_common::logging::init_logging();
        let path = objtrack_common::platform::default_config_path();
        let config = TrackerConfig::load_or_default(&path);
        info!(path = %path, "object tracker layer loaded");
        Self::new(config)
    }

    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Sink used for instances created without an explicit one.
    fn default_sink(&self) -> Arc<dyn ReportSink> {
        Arc::new(TracingSink::new(self.config.report.clone()))
    }

    // ── Shared create/destroy flow ──────────────────────────

    /// Validates the owner, runs `call`, registers the result in `ctx`.
    #[allow(clippy::too_many_arguments)]
    fn create_child<H: Handle + Copy>(
        &self,
        ctx: Context,
        owner: u64,
        owner_type: ObjectType,
        owner_code: &str,
        object_type: ObjectType,
        allocator: Option<&vk::AllocationCallbacks<'_>>,
        call: impl FnOnce() -> VkResult<H>,
    ) -> VkResult<H> {
        if self.tracker.validate_object(ctx, owner, owner_type, false, owner_code, None) {
            return Err(SKIPPED);
        }
        let object = call()?;
        self.tracker
            .create_object(ctx, object.as_raw(), object_type, allocator.is_some());
        Ok(object)
    }

    /// Validates owner, object and allocator symmetry, runs `call`, then
    /// forgets the object. Returns whether `call` ran.
    #[allow(clippy::too_many_arguments)]
    fn destroy_child(
        &self,
        ctx: Context,
        owner: u64,
        owner_type: ObjectType,
        object: u64,
        object_type: ObjectType,
        allocator: Option<&vk::AllocationCallbacks<'_>>,
        codes: &DestroyCodes,
        call: impl FnOnce(),
    ) -> bool {
        let mut skip = self
            .tracker
            .validate_object(ctx, owner, owner_type, false, codes.owner, None);
        skip |= self
            .tracker
            .validate_object(ctx, object, object_type, true, codes.object, codes.parent);
        skip |= self.tracker.validate_destroy_object(
            ctx,
            object,
            object_type,
            allocator.is_some(),
            codes.expected_custom,
            codes.expected_default,
        );
        if skip {
            return false;
        }

        call();
        self.tracker.record_destroy_object(ctx, object, object_type);
        true
    }
}
