//! The validation engine.
//!
//! Every operation is a single step under the lock of the registry it
//! touches. No two registry locks are ever held at once: searches across
//! devices snapshot the directory and lock each foreign registry in turn.
//! Diagnostics are emitted after the lock is released.

mod pool;
mod queue;
mod swapchain;
mod teardown;
mod validate;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use objtrack_types::{ObjectStatus, ObjectType};
use tracing::{debug, error, warn};

use crate::directory::{Context, ContextKind, ContextState, DispatchKey, RegistryDirectory};
use crate::report::ReportSink;

/// Handle value of `VK_NULL_HANDLE`.
pub const NULL_HANDLE: u64 = 0;

pub struct Tracker {
    directory: RegistryDirectory,
    /// Process-wide creation counter, shared by every context
    object_track_index: AtomicU64,
}

impl Tracker {
    pub fn new() -> Self {
        Self {
            directory: RegistryDirectory::new(),
            object_track_index: AtomicU64::new(0),
        }
    }

    pub fn directory(&self) -> &RegistryDirectory {
        &self.directory
    }

    fn next_index(&self) -> u64 {
        self.object_track_index.fetch_add(1, Ordering::Relaxed)
    }

    /// Resolves a context the dispatch layer hands in. Handles created
    /// outside the layer (an instance made before it was loaded, say) reach
    /// here too, so a miss is logged and the caller falls back to its
    /// neutral answer.
    fn resolve(&self, ctx: Context) -> Option<Arc<ContextState>> {
        let state = self.directory.resolve(ctx);
        if state.is_none() {
            warn!(?ctx, "no registry for context");
        }
        state
    }

    // ── Context lifecycle ───────────────────────────────────

    pub fn create_instance_context(&self, key: DispatchKey, instance: u64, sink: Arc<dyn ReportSink>) {
        debug!(%key, instance, "registering instance context");
        let state = ContextState::new(ContextKind::Instance, key, instance, None, sink);
        if self.directory.insert(state).is_some() {
            error!(%key, "instance context registered twice; previous registry discarded");
        }
    }

    /// Registers a device created from `instance`. The device reports
    /// through its instance's sink.
    pub fn create_device_context(&self, instance: DispatchKey, key: DispatchKey, device: u64) -> bool {
        let Some(parent) = self.resolve(Context::Instance(instance)) else {
            return false;
        };
        debug!(%key, %instance, device, "registering device context");
        let state = ContextState::new(
            ContextKind::Device,
            key,
            device,
            Some(instance),
            Arc::clone(parent.sink()),
        );
        if self.directory.insert(state).is_some() {
            error!(%key, "device context registered twice; previous registry discarded");
        }
        true
    }

    /// Drains and unregisters a device context. Whatever the application
    /// leaked is dropped from bookkeeping without further reports.
    pub fn destroy_device_context(&self, key: DispatchKey) {
        if let Some(state) = self.directory.resolve_device(key) {
            let drained = state.lifetime().drain();
            debug!(%key, drained, "device context destroyed");
        }
        self.directory.remove(Context::Device(key));
    }

    /// Drains and unregisters an instance context along with any device
    /// contexts still registered under it.
    pub fn destroy_instance_context(&self, key: DispatchKey) {
        for device in self.directory.devices_of(key) {
            self.destroy_device_context(device.key);
        }
        if let Some(state) = self.directory.resolve_instance(key) {
            let drained = state.lifetime().drain();
            debug!(%key, drained, "instance context destroyed");
        }
        self.directory.remove(Context::Instance(key));
    }

    /// The instance a device context was created from.
    pub fn instance_of(&self, device: DispatchKey) -> Option<DispatchKey> {
        self.directory.resolve_device(device).and_then(|d| d.parent)
    }

    // ── Counters ────────────────────────────────────────────

    pub fn object_count(&self, ctx: Context, object_type: ObjectType) -> u64 {
        self.directory
            .resolve(ctx)
            .map_or(0, |s| s.lifetime().count(object_type))
    }

    pub fn total_object_count(&self, ctx: Context) -> u64 {
        self.directory.resolve(ctx).map_or(0, |s| s.lifetime().total())
    }

    pub fn is_tracked(&self, ctx: Context, handle: u64, object_type: ObjectType) -> bool {
        self.directory
            .resolve(ctx)
            .is_some_and(|s| s.lifetime().is_tracked(object_type, handle))
    }

    /// Status flags of a live object, `None` when `ctx` does not own it.
    pub fn object_status(&self, ctx: Context, handle: u64, object_type: ObjectType) -> Option<ObjectStatus> {
        self.directory
            .resolve(ctx)
            .and_then(|s| s.lifetime().get(object_type, handle).map(|r| r.status))
    }
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new()
    }
}
