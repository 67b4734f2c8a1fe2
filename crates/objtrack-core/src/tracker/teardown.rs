use objtrack_types::{vuid, ObjectType};

use super::Tracker;
use crate::directory::{Context, ContextKind, ContextState, DispatchKey};
use crate::report::Severity;

impl Tracker {
    /// Reports every surviving `object_type` record of `ctx` as leaked.
    /// Returns whether any were found.
    pub fn device_report_undestroyed_objects(&self, ctx: Context, object_type: ObjectType, code: &str) -> bool {
        let Some(state) = self.resolve(ctx) else {
            return false;
        };
        report_leaks(&state, object_type, code)
    }

    /// Drops every surviving `object_type` record of `ctx`.
    pub fn device_destroy_undestroyed_objects(&self, ctx: Context, object_type: ObjectType) {
        let Some(state) = self.resolve(ctx) else {
            return;
        };
        let mut lifetime = state.lifetime();
        let leaked: Vec<u64> = lifetime.records(object_type).map(|r| r.handle).collect();
        for handle in leaked {
            lifetime.remove(object_type, handle);
        }
    }

    /// Leak report over every object type the context's owner has to
    /// destroy explicitly. Swapchain images are the swapchain's
    /// responsibility and are never reported.
    pub fn report_undestroyed_objects(&self, ctx: Context, code: &str) -> bool {
        let Some(state) = self.resolve(ctx) else {
            return false;
        };
        let mut found = false;
        for &object_type in owned_types(ctx) {
            found |= report_leaks(&state, object_type, code);
        }
        found
    }

    pub fn destroy_undestroyed_objects(&self, ctx: Context) {
        for &object_type in owned_types(ctx) {
            self.device_destroy_undestroyed_objects(ctx, object_type);
        }
    }

    /// Reports devices of `instance` that are still alive, along with
    /// everything they own. Returns whether any were found.
    pub fn report_undestroyed_devices(&self, instance: DispatchKey, code: &str) -> bool {
        let Some(state) = self.resolve(Context::Instance(instance)) else {
            return false;
        };

        let devices = self.directory.devices_of(instance);
        for device in &devices {
            state.log_msg(
                Severity::Error,
                ObjectType::Device,
                device.handle,
                vuid::OBJECT_LEAK,
                format!(
                    "OBJ ERROR : {} object {:#x} has not been destroyed.",
                    ObjectType::Device,
                    device.handle
                ),
            );
            for &object_type in ObjectType::DEVICE_CHILDREN.iter() {
                report_leaks(device, object_type, code);
            }
        }
        !devices.is_empty()
    }
}

fn owned_types(ctx: Context) -> &'static [ObjectType] {
    match ctx.kind() {
        ContextKind::Instance => &ObjectType::INSTANCE_CHILDREN,
        ContextKind::Device => &ObjectType::DEVICE_CHILDREN,
    }
}

fn report_leaks(state: &ContextState, object_type: ObjectType, code: &str) -> bool {
    let leaked: Vec<(u64, u64)> = state
        .lifetime()
        .records(object_type)
        .map(|r| (r.handle, r.create_index))
        .collect();

    let owner = match state.kind {
        ContextKind::Instance => "instance",
        ContextKind::Device => "device",
    };
    for &(handle, create_index) in &leaked {
        state.log_msg(
            Severity::Error,
            object_type,
            handle,
            code,
            format!(
                "OBJ ERROR : For {} {:#x}, {} object {:#x} (OBJ[{:#x}]) has not been destroyed.",
                owner, state.handle, object_type, handle, create_index
            ),
        );
    }
    !leaked.is_empty()
}
