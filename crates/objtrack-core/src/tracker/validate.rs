use objtrack_types::{vuid, ObjectStatus, ObjectType};
use tracing::error;

use super::{Tracker, NULL_HANDLE};
use crate::directory::{Context, ContextState};
use crate::record::ObjectRecord;
use crate::report::Severity;

impl Tracker {
    /// Registers a freshly created object. Registering a handle that is
    /// already tracked under the same type is a no-op.
    pub fn create_object(&self, ctx: Context, handle: u64, object_type: ObjectType, custom_allocator: bool) {
        let Some(state) = self.resolve(ctx) else {
            return;
        };

        let index = {
            let mut lifetime = state.lifetime();
            if lifetime.contains(object_type, handle) {
                return;
            }
            let index = self.next_index();
            lifetime.insert(ObjectRecord::new(
                object_type,
                handle,
                ObjectStatus::from_allocator(custom_allocator),
                index,
            ));
            index
        };

        state.log_msg(
            Severity::Information,
            object_type,
            handle,
            vuid::INFO,
            format!("OBJ[{:#x}] : CREATE {} object {:#x}", index, object_type, handle),
        );
    }

    /// Checks that `handle` names a live object of `object_type` owned by
    /// `ctx`. Returns `true` when the intercepted call should be skipped.
    ///
    /// A handle unknown to `ctx` but owned by another device is a
    /// wrong-device error when `wrong_device_code` is given, except for
    /// surfaces, which may be shared between devices of one instance.
    pub fn validate_object(
        &self,
        ctx: Context,
        handle: u64,
        object_type: ObjectType,
        null_allowed: bool,
        invalid_code: &str,
        wrong_device_code: Option<&str>,
    ) -> bool {
        if null_allowed && handle == NULL_HANDLE {
            return false;
        }

        if object_type == ObjectType::Device {
            return self.validate_device_object(ctx, handle, invalid_code);
        }

        let Some(state) = self.resolve(ctx) else {
            return false;
        };

        if state.lifetime().is_tracked(object_type, handle) {
            return false;
        }

        let current = match ctx {
            Context::Device(key) => Some(key),
            Context::Instance(_) => None,
        };
        let found_elsewhere = self
            .directory
            .devices_except(current)
            .iter()
            .any(|other| other.lifetime().is_tracked(object_type, handle));

        if found_elsewhere {
            return match wrong_device_code {
                Some(code) if object_type != ObjectType::SurfaceKhr => state.log_msg(
                    Severity::Error,
                    object_type,
                    handle,
                    code,
                    format!(
                        "Object {:#x} was not created, allocated or retrieved from the correct device.",
                        handle
                    ),
                ),
                _ => false,
            };
        }

        state.log_msg(
            Severity::Error,
            object_type,
            handle,
            invalid_code,
            format!("Invalid {} Object {:#x}.", object_type, handle),
        )
    }

    /// Devices are registered in the instance they were created from, so a
    /// device handle is valid when any instance knows it.
    pub fn validate_device_object(&self, ctx: Context, handle: u64, invalid_code: &str) -> bool {
        let known = self
            .directory
            .instances()
            .iter()
            .any(|instance| instance.lifetime().contains(ObjectType::Device, handle));
        if known {
            return false;
        }

        let Some(state) = self.resolve(ctx) else {
            return false;
        };
        state.log_msg(
            Severity::Error,
            ObjectType::Device,
            handle,
            invalid_code,
            format!("Invalid Device Object {:#x}.", handle),
        )
    }

    /// Checks that a destroy call passes allocation callbacks exactly when
    /// the create call did. Unknown handles pass; their validity is checked
    /// by [`Tracker::validate_object`].
    ///
    /// Only presence is compared, not whether the two sets of callbacks are
    /// compatible with each other.
    pub fn validate_destroy_object(
        &self,
        ctx: Context,
        handle: u64,
        object_type: ObjectType,
        custom_allocator: bool,
        expected_custom_code: Option<&str>,
        expected_default_code: Option<&str>,
    ) -> bool {
        if handle == NULL_HANDLE {
            return false;
        }
        let Some(state) = self.resolve(ctx) else {
            return false;
        };

        let (created_custom, total, of_type) = {
            let lifetime = state.lifetime();
            let Some(record) = lifetime.get(object_type, handle) else {
                return false;
            };
            (
                record.custom_allocator(),
                lifetime.total(),
                lifetime.count(object_type),
            )
        };

        let mut skip = state.log_msg(
            Severity::Information,
            object_type,
            handle,
            vuid::INFO,
            format!(
                "OBJ_STAT Destroy {} obj {:#x} ({} total objs remain & {} {} objs).",
                object_type,
                handle,
                total - 1,
                of_type - 1,
                object_type
            ),
        );

        match (created_custom, custom_allocator) {
            (true, false) => {
                if let Some(code) = expected_custom_code {
                    skip |= state.log_msg(
                        Severity::Error,
                        object_type,
                        handle,
                        code,
                        format!(
                            "Custom allocator not specified while destroying {} obj {:#x} but specified at creation.",
                            object_type, handle
                        ),
                    );
                }
            }
            (false, true) => {
                if let Some(code) = expected_default_code {
                    skip |= state.log_msg(
                        Severity::Error,
                        object_type,
                        handle,
                        code,
                        format!(
                            "Custom allocator specified while destroying {} obj {:#x} but not specified at creation.",
                            object_type, handle
                        ),
                    );
                }
            }
            _ => {}
        }

        skip
    }

    /// Drops the record of an object whose destroy call succeeded. Null and
    /// unknown handles are ignored.
    pub fn record_destroy_object(&self, ctx: Context, handle: u64, object_type: ObjectType) {
        if handle == NULL_HANDLE {
            return;
        }
        let Some(state) = self.resolve(ctx) else {
            return;
        };
        let mut lifetime = state.lifetime();
        if lifetime.contains(object_type, handle) {
            lifetime.remove(object_type, handle);
        }
    }

    /// Unconditionally drops a record. The record must exist.
    pub fn destroy_object_silently(&self, ctx: Context, handle: u64, object_type: ObjectType) {
        let Some(state) = self.resolve(ctx) else {
            return;
        };
        remove_silently(&state, handle, object_type);
    }
}

pub(super) fn remove_silently(state: &ContextState, handle: u64, object_type: ObjectType) {
    debug_assert!(handle != NULL_HANDLE);
    let removed = state.lifetime().remove(object_type, handle);
    if removed.is_none() {
        error!(
            code = vuid::INTERNAL_ERROR,
            %object_type,
            handle,
            "attempted to remove an untracked object"
        );
        state.log_msg(
            Severity::Error,
            object_type,
            handle,
            vuid::INTERNAL_ERROR,
            format!("Attempted to remove untracked {} object {:#x}.", object_type, handle),
        );
    }
    debug_assert!(removed.is_some(), "{} {:#x} is not tracked", object_type, handle);
}
