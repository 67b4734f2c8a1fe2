//! Instance, physical device enumeration, and instance-level children.

use std::sync::Arc;

use ash::prelude::VkResult;
use ash::vk;
use ash::vk::Handle;

use objtrack_core::{Context, ReportSink};
use objtrack_types::ObjectType;

use crate::dispatch::dispatch_key;
use crate::{DestroyCodes, ObjectTrackerLayer, SKIPPED};

const DESTROY_INSTANCE_LEAK: &str = "VUID-vkDestroyInstance-instance-00629";

const SURFACE_DESTROY: DestroyCodes = DestroyCodes {
    owner: "VUID-vkDestroySurfaceKHR-instance-parameter",
    object: "VUID-vkDestroySurfaceKHR-surface-parameter",
    parent: None,
    expected_custom: Some("VUID-vkDestroySurfaceKHR-surface-01267"),
    expected_default: Some("VUID-vkDestroySurfaceKHR-surface-01268"),
};

const DEBUG_REPORT_CALLBACK_DESTROY: DestroyCodes = DestroyCodes {
    owner: "VUID-vkDestroyDebugReportCallbackEXT-instance-parameter",
    object: "VUID-vkDestroyDebugReportCallbackEXT-callback-parameter",
    parent: None,
    expected_custom: Some("VUID-vkDestroyDebugReportCallbackEXT-instance-01242"),
    expected_default: Some("VUID-vkDestroyDebugReportCallbackEXT-instance-01243"),
};

impl ObjectTrackerLayer {
    /// `vkCreateInstance`. Diagnostics for the new instance and everything
    /// created from it go to `sink`, or to the log when `None`.
    ///
    /// # Safety
    /// A successful `call` must return a live dispatchable instance.
    pub unsafe fn create_instance(
        &self,
        allocator: Option<&vk::AllocationCallbacks<'_>>,
        sink: Option<Arc<dyn ReportSink>>,
        call: impl FnOnce() -> VkResult<vk::Instance>,
    ) -> VkResult<vk::Instance> {
        let instance = call()?;
        let key = unsafe { dispatch_key(instance) };
        let sink = sink.unwrap_or_else(|| self.default_sink());

        self.tracker
            .create_instance_context(key, instance.as_raw(), sink);
        self.tracker.create_object(
            Context::Instance(key),
            instance.as_raw(),
            ObjectType::Instance,
            allocator.is_some(),
        );
        Ok(instance)
    }

    /// `vkDestroyInstance`. Devices and instance children still alive are
    /// reported as leaked, then dropped along with the instance.
    ///
    /// # Safety
    /// `instance` must be null or a live dispatchable instance.
    pub unsafe fn destroy_instance(
        &self,
        instance: vk::Instance,
        allocator: Option<&vk::AllocationCallbacks<'_>>,
        call: impl FnOnce(),
    ) {
        if instance == vk::Instance::null() {
            call();
            return;
        }
        let key = unsafe { dispatch_key(instance) };
        let ctx = Context::Instance(key);

        let mut skip = self.tracker.validate_object(
            ctx,
            instance.as_raw(),
            ObjectType::Instance,
            true,
            "VUID-vkDestroyInstance-instance-parameter",
            None,
        );
        skip |= self.tracker.validate_destroy_object(
            ctx,
            instance.as_raw(),
            ObjectType::Instance,
            allocator.is_some(),
            Some("VUID-vkDestroyInstance-instance-00630"),
            Some("VUID-vkDestroyInstance-instance-00631"),
        );
        if skip {
            return;
        }

        self.tracker
            .report_undestroyed_devices(key, DESTROY_INSTANCE_LEAK);
        self.tracker
            .report_undestroyed_objects(ctx, DESTROY_INSTANCE_LEAK);

        call();
        self.tracker.destroy_instance_context(key);
    }

    /// `vkEnumeratePhysicalDevices`.
    ///
    /// # Safety
    /// `instance` must be a live dispatchable instance.
    pub unsafe fn enumerate_physical_devices(
        &self,
        instance: vk::Instance,
        call: impl FnOnce() -> VkResult<Vec<vk::PhysicalDevice>>,
    ) -> VkResult<Vec<vk::PhysicalDevice>> {
        let ctx = Context::Instance(unsafe { dispatch_key(instance) });
        if self.tracker.validate_object(
            ctx,
            instance.as_raw(),
            ObjectType::Instance,
            false,
            "VUID-vkEnumeratePhysicalDevices-instance-parameter",
            None,
        ) {
            return Err(SKIPPED);
        }

        let physical_devices = call()?;
        for pd in &physical_devices {
            self.tracker
                .create_object(ctx, pd.as_raw(), ObjectType::PhysicalDevice, false);
        }
        Ok(physical_devices)
    }

    /// Any `vkCreate*SurfaceKHR`.
    ///
    /// # Safety
    /// `instance` must be a live dispatchable instance.
    pub unsafe fn create_surface(
        &self,
        instance: vk::Instance,
        allocator: Option<&vk::AllocationCallbacks<'_>>,
        call: impl FnOnce() -> VkResult<vk::SurfaceKHR>,
    ) -> VkResult<vk::SurfaceKHR> {
        let ctx = Context::Instance(unsafe { dispatch_key(instance) });
        self.create_child(
            ctx,
            instance.as_raw(),
            ObjectType::Instance,
            "VUID-vkCreateSurfaceKHR-instance-parameter",
            ObjectType::SurfaceKhr,
            allocator,
            call,
        )
    }

    /// `vkDestroySurfaceKHR`.
    ///
    /// # Safety
    /// `instance` must be a live dispatchable instance.
    pub unsafe fn destroy_surface(
        &self,
        instance: vk::Instance,
        surface: vk::SurfaceKHR,
        allocator: Option<&vk::AllocationCallbacks<'_>>,
        call: impl FnOnce(),
    ) {
        let ctx = Context::Instance(unsafe { dispatch_key(instance) });
        self.destroy_child(
            ctx,
            instance.as_raw(),
            ObjectType::Instance,
            surface.as_raw(),
            ObjectType::SurfaceKhr,
            allocator,
            &SURFACE_DESTROY,
            call,
        );
    }

    /// `vkCreateDebugReportCallbackEXT`.
    ///
    /// # Safety
    /// `instance` must be a live dispatchable instance.
    pub unsafe fn create_debug_report_callback(
        &self,
        instance: vk::Instance,
        allocator: Option<&vk::AllocationCallbacks<'_>>,
        call: impl FnOnce() -> VkResult<vk::DebugReportCallbackEXT>,
    ) -> VkResult<vk::DebugReportCallbackEXT> {
        let ctx = Context::Instance(unsafe { dispatch_key(instance) });
        self.create_child(
            ctx,
            instance.as_raw(),
            ObjectType::Instance,
            "VUID-vkCreateDebugReportCallbackEXT-instance-parameter",
            ObjectType::DebugReportCallbackExt,
            allocator,
            call,
        )
    }

    /// `vkDestroyDebugReportCallbackEXT`.
    ///
    /// # Safety
    /// `instance` must be a live dispatchable instance.
    pub unsafe fn destroy_debug_report_callback(
        &self,
        instance: vk::Instance,
        callback: vk::DebugReportCallbackEXT,
        allocator: Option<&vk::AllocationCallbacks<'_>>,
        call: impl FnOnce(),
    ) {
        let ctx = Context::Instance(unsafe { dispatch_key(instance) });
        self.destroy_child(
            ctx,
            instance.as_raw(),
            ObjectType::Instance,
            callback.as_raw(),
            ObjectType::DebugReportCallbackExt,
            allocator,
            &DEBUG_REPORT_CALLBACK_DESTROY,
            call,
        );
    }
}
