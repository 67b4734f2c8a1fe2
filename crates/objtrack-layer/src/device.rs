//! Device creation and teardown, queues, and the generic device-child flow.

use ash::prelude::VkResult;
use ash::vk;
use ash::vk::Handle;
use tracing::{error, warn};

use objtrack_core::Context;
use objtrack_types::ObjectType;

use crate::dispatch::dispatch_key;
use crate::{DestroyCodes, ObjectTrackerLayer, SKIPPED};

const DESTROY_DEVICE_LEAK: &str = "VUID-vkDestroyDevice-device-00378";

impl ObjectTrackerLayer {
    /// `vkCreateDevice`. The new device is recorded in the instance that
    /// owns `physical_device`, and gets a registry of its own.
    ///
    /// `queue_family_properties` is what
    /// `vkGetPhysicalDeviceQueueFamilyProperties` returned for
    /// `physical_device`; it backs the sparse-binding queue check.
    ///
    /// # Safety
    /// `physical_device` must be a live dispatchable handle, and a
    /// successful `call` must return a live dispatchable device.
    pub unsafe fn create_device(
        &self,
        physical_device: vk::PhysicalDevice,
        allocator: Option<&vk::AllocationCallbacks<'_>>,
        queue_family_properties: &[vk::QueueFamilyProperties],
        call: impl FnOnce() -> VkResult<vk::Device>,
    ) -> VkResult<vk::Device> {
        let instance_key = unsafe { dispatch_key(physical_device) };
        let instance_ctx = Context::Instance(instance_key);
        if self.tracker.validate_object(
            instance_ctx,
            physical_device.as_raw(),
            ObjectType::PhysicalDevice,
            false,
            "VUID-vkCreateDevice-physicalDevice-parameter",
            None,
        ) {
            return Err(SKIPPED);
        }

        let device = call()?;
        let key = unsafe { dispatch_key(device) };

        if !self
            .tracker
            .create_device_context(instance_key, key, device.as_raw())
        {
            warn!(%key, "device created from an untracked instance");
            return Ok(device);
        }
        self.tracker
            .create_object(instance_ctx, device.as_raw(), ObjectType::Device, allocator.is_some());
        self.tracker.set_queue_family_properties(
            key,
            queue_family_properties.iter().map(|p| p.queue_flags).collect(),
        );
        Ok(device)
    }

    /// `vkDestroyDevice`. Objects still alive are reported as leaked but do
    /// not block the call; they are dropped with the device's registry.
    ///
    /// # Safety
    /// `device` must be null or a live dispatchable device.
    pub unsafe fn destroy_device(
        &self,
        device: vk::Device,
        allocator: Option<&vk::AllocationCallbacks<'_>>,
        call: impl FnOnce(),
    ) {
        if device == vk::Device::null() {
            call();
            return;
        }
        let key = unsafe { dispatch_key(device) };
        let Some(instance_key) = self.tracker.instance_of(key) else {
            error!(%key, "destroying a device with no registry");
            call();
            return;
        };
        let ctx = Context::Device(key);
        let instance_ctx = Context::Instance(instance_key);

        let mut skip = self.tracker.validate_object(
            ctx,
            device.as_raw(),
            ObjectType::Device,
            true,
            "VUID-vkDestroyDevice-device-parameter",
            None,
        );
        skip |= self.tracker.validate_destroy_object(
            instance_ctx,
            device.as_raw(),
            ObjectType::Device,
            allocator.is_some(),
            Some("VUID-vkDestroyDevice-device-00379"),
            Some("VUID-vkDestroyDevice-device-00380"),
        );
        if skip {
            return;
        }

        self.tracker.report_undestroyed_objects(ctx, DESTROY_DEVICE_LEAK);
        self.tracker.destroy_undestroyed_objects(ctx);
        self.tracker.destroy_queue_data_structures(key);

        call();
        self.tracker
            .record_destroy_object(instance_ctx, device.as_raw(), ObjectType::Device);
        self.tracker.destroy_device_context(key);
    }

    /// `vkGetDeviceQueue`.
    ///
    /// # Safety
    /// `device` must be a live dispatchable device, and `call` must return a
    /// live dispatchable queue.
    pub unsafe fn get_device_queue(
        &self,
        device: vk::Device,
        queue_family_index: u32,
        call: impl FnOnce() -> vk::Queue,
    ) -> vk::Queue {
        let key = unsafe { dispatch_key(device) };
        self.tracker.validate_object(
            Context::Device(key),
            device.as_raw(),
            ObjectType::Device,
            false,
            "VUID-vkGetDeviceQueue-device-parameter",
            None,
        );

        let queue = call();
        if queue != vk::Queue::null() {
            self.tracker.create_queue(key, queue.as_raw());
            self.tracker
                .add_queue_info(key, queue_family_index, queue.as_raw());
        }
        queue
    }

    /// `vkQueueSubmit`. Checks the queue, the fence, and every command
    /// buffer and semaphore named by `submits`.
    ///
    /// # Safety
    /// `queue` must be a live dispatchable queue, and every pointer in
    /// `submits` must be valid for its stated count.
    pub unsafe fn queue_submit(
        &self,
        queue: vk::Queue,
        submits: &[vk::SubmitInfo<'_>],
        fence: vk::Fence,
        call: impl FnOnce() -> VkResult<()>,
    ) -> VkResult<()> {
        let ctx = Context::Device(unsafe { dispatch_key(queue) });

        let mut skip = self.tracker.validate_object(
            ctx,
            queue.as_raw(),
            ObjectType::Queue,
            false,
            "VUID-vkQueueSubmit-queue-parameter",
            Some("VUID-vkQueueSubmit-commonparent"),
        );
        skip |= self.tracker.validate_object(
            ctx,
            fence.as_raw(),
            ObjectType::Fence,
            true,
            "VUID-vkQueueSubmit-fence-parameter",
            Some("VUID-vkQueueSubmit-commonparent"),
        );

        for submit in submits {
            for &semaphore in unsafe { raw_slice(submit.p_wait_semaphores, submit.wait_semaphore_count) } {
                skip |= self.tracker.validate_object(
                    ctx,
                    semaphore.as_raw(),
                    ObjectType::Semaphore,
                    false,
                    "VUID-VkSubmitInfo-pWaitSemaphores-parameter",
                    Some("VUID-VkSubmitInfo-commonparent"),
                );
            }
            for &command_buffer in unsafe { raw_slice(submit.p_command_buffers, submit.command_buffer_count) } {
                skip |= self.tracker.validate_object(
                    ctx,
                    command_buffer.as_raw(),
                    ObjectType::CommandBuffer,
                    false,
                    "VUID-VkSubmitInfo-pCommandBuffers-parameter",
                    Some("VUID-VkSubmitInfo-commonparent"),
                );
            }
            for &semaphore in unsafe { raw_slice(submit.p_signal_semaphores, submit.signal_semaphore_count) } {
                skip |= self.tracker.validate_object(
                    ctx,
                    semaphore.as_raw(),
                    ObjectType::Semaphore,
                    false,
                    "VUID-VkSubmitInfo-pSignalSemaphores-parameter",
                    Some("VUID-VkSubmitInfo-commonparent"),
                );
            }
        }

        if skip {
            return Err(SKIPPED);
        }
        call()
    }

    /// `vkQueueBindSparse`. The queue's family must support sparse binding.
    ///
    /// # Safety
    /// `queue` must be a live dispatchable queue.
    pub unsafe fn queue_bind_sparse(
        &self,
        queue: vk::Queue,
        fence: vk::Fence,
        call: impl FnOnce() -> VkResult<()>,
    ) -> VkResult<()> {
        let key = unsafe { dispatch_key(queue) };
        let ctx = Context::Device(key);

        let mut skip = self.tracker.validate_object(
            ctx,
            queue.as_raw(),
            ObjectType::Queue,
            false,
            "VUID-vkQueueBindSparse-queue-parameter",
            Some("VUID-vkQueueBindSparse-commonparent"),
        );
        skip |= self.tracker.validate_object(
            ctx,
            fence.as_raw(),
            ObjectType::Fence,
            true,
            "VUID-vkQueueBindSparse-fence-parameter",
            Some("VUID-vkQueueBindSparse-commonparent"),
        );
        skip |= self
            .tracker
            .validate_queue_flags(key, queue.as_raw(), "vkQueueBindSparse");

        if skip {
            return Err(SKIPPED);
        }
        call()
    }

    // ── Generic device children ─────────────────────────────

    /// Shared `vkCreate*` flow for objects created singly from a device.
    ///
    /// # Safety
    /// `device` must be a live dispatchable device.
    pub unsafe fn create_device_child<H: Handle + Copy>(
        &self,
        device: vk::Device,
        object_type: ObjectType,
        device_code: &str,
        allocator: Option<&vk::AllocationCallbacks<'_>>,
        call: impl FnOnce() -> VkResult<H>,
    ) -> VkResult<H> {
        let ctx = Context::Device(unsafe { dispatch_key(device) });
        self.create_child(
            ctx,
            device.as_raw(),
            ObjectType::Device,
            device_code,
            object_type,
            allocator,
            call,
        )
    }

    /// Shared `vkDestroy*` / `vkFree*` flow for objects owned by a device.
    /// Returns whether `call` ran.
    ///
    /// # Safety
    /// `device` must be a live dispatchable device.
    pub unsafe fn destroy_device_child<H: Handle>(
        &self,
        device: vk::Device,
        object: H,
        object_type: ObjectType,
        allocator: Option<&vk::AllocationCallbacks<'_>>,
        codes: &DestroyCodes,
        call: impl FnOnce(),
    ) -> bool {
        let ctx = Context::Device(unsafe { dispatch_key(device) });
        self.destroy_child(
            ctx,
            device.as_raw(),
            ObjectType::Device,
            object.as_raw(),
            object_type,
            allocator,
            codes,
            call,
        )
    }
}

/// Views a Vulkan `(pointer, count)` pair as a slice.
///
/// # Safety
/// `ptr` must be valid for `count` reads, or `count` must be zero.
pub(crate) unsafe fn raw_slice<'a, T>(ptr: *const T, count: u32) -> &'a [T] {
    if ptr.is_null() || count == 0 {
        &[]
    } else {
        unsafe { std::slice::from_raw_parts(ptr, count as usize) }
    }
}
