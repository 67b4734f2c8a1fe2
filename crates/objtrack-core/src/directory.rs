//! Process-wide association from context identity to registry.
//!
//! Instance-level and device-level contexts live in separate partitions.
//! Physical devices resolve through the instance partition, every other
//! dispatchable handle through the device partition.

use std::collections::HashMap;
use std::sync::Arc;

use objtrack_types::ObjectType;
use parking_lot::{Mutex, MutexGuard, RwLock};

use crate::lifetime::ObjectLifetime;
use crate::report::{Report, ReportSink, Severity};

/// Identity of a context as seen by the dispatch layer: the loader dispatch
/// table pointer shared by an instance or device and all of its
/// dispatchable children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DispatchKey(pub u64);

impl std::fmt::Display for DispatchKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextKind {
    Instance,
    Device,
}

/// Which partition an operation resolves its context through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    Instance(DispatchKey),
    Device(DispatchKey),
}

impl Context {
    pub fn key(self) -> DispatchKey {
        match self {
            Context::Instance(key) | Context::Device(key) => key,
        }
    }

    pub fn kind(self) -> ContextKind {
        match self {
            Context::Instance(_) => ContextKind::Instance,
            Context::Device(_) => ContextKind::Device,
        }
    }
}

/// Everything the tracker keeps for one instance or device.
pub struct ContextState {
    pub kind: ContextKind,
    pub key: DispatchKey,
    /// The `VkInstance` or `VkDevice` handle value
    pub handle: u64,
    /// Owning instance, for devices
    pub parent: Option<DispatchKey>,
    sink: Arc<dyn ReportSink>,
    lifetime: Mutex<ObjectLifetime>,
}

impl ContextState {
    pub fn new(
        kind: ContextKind,
        key: DispatchKey,
        handle: u64,
        parent: Option<DispatchKey>,
        sink: Arc<dyn ReportSink>,
    ) -> Self {
        Self {
            kind,
            key,
            handle,
            parent,
            sink,
            lifetime: Mutex::new(ObjectLifetime::new()),
        }
    }

    pub fn lifetime(&self) -> MutexGuard<'_, ObjectLifetime> {
        self.lifetime.lock()
    }

    pub fn sink(&self) -> &Arc<dyn ReportSink> {
        &self.sink
    }

    /// Hands a diagnostic to this context's sink. Must not be called while
    /// holding the lifetime lock, since sinks may call back into the API.
    pub fn log_msg(
        &self,
        severity: Severity,
        object_type: ObjectType,
        handle: u64,
        code: &str,
        message: String,
    ) -> bool {
        self.sink.log_msg(&Report {
            severity,
            object_type,
            handle,
            code,
            message,
        })
    }
}

type Partition = RwLock<HashMap<DispatchKey, Arc<ContextState>>>;

#[derive(Default)]
pub struct RegistryDirectory {
    instances: Partition,
    devices: Partition,
}

impl RegistryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    fn partition(&self, kind: ContextKind) -> &Partition {
        match kind {
            ContextKind::Instance => &self.instances,
            ContextKind::Device => &self.devices,
        }
    }

    pub fn resolve_instance(&self, key: DispatchKey) -> Option<Arc<ContextState>> {
        self.instances.read().get(&key).cloned()
    }

    pub fn resolve_device(&self, key: DispatchKey) -> Option<Arc<ContextState>> {
        self.devices.read().get(&key).cloned()
    }

    pub fn resolve(&self, ctx: Context) -> Option<Arc<ContextState>> {
        match ctx {
            Context::Instance(key) => self.resolve_instance(key),
            Context::Device(key) => self.resolve_device(key),
        }
    }

    /// Registers `state`, returning the entry it replaced, if any.
    pub fn insert(&self, state: ContextState) -> Option<Arc<ContextState>> {
        let kind = state.kind;
        self.partition(kind).write().insert(state.key, Arc::new(state))
    }

    pub fn remove(&self, ctx: Context) -> Option<Arc<ContextState>> {
        self.partition(ctx.kind()).write().remove(&ctx.key())
    }

    /// Snapshot of every instance context.
    pub fn instances(&self) -> Vec<Arc<ContextState>> {
        self.instances.read().values().cloned().collect()
    }

    /// Snapshot of every device context other than `exclude`.
    pub fn devices_except(&self, exclude: Option<DispatchKey>) -> Vec<Arc<ContextState>> {
        self.devices
            .read()
            .values()
            .filter(|d| Some(d.key) != exclude)
            .cloned()
            .collect()
    }

    /// Snapshot of the device contexts created from `instance`.
    pub fn devices_of(&self, instance: DispatchKey) -> Vec<Arc<ContextState>> {
        self.devices
            .read()
            .values()
            .filter(|d| d.parent == Some(instance))
            .cloned()
            .collect()
    }

    pub fn instance_count(&self) -> usize {
        self.instances.read().len()
    }

    pub fn device_count(&self) -> usize {
        self.devices.read().len()
    }
}
