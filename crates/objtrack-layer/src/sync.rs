//! Fences and semaphores.

use ash::prelude::VkResult;
use ash::vk;
use ash::vk::Handle;

use objtrack_core::Context;
use objtrack_types::ObjectType;

use crate::dispatch::dispatch_key;
use crate::{DestroyCodes, ObjectTrackerLayer, SKIPPED};

const FENCE_DESTROY: DestroyCodes = DestroyCodes {
    owner: "VUID-vkDestroyFence-device-parameter",
    object: "VUID-vkDestroyFence-fence-parameter",
    parent: Some("VUID-vkDestroyFence-fence-parent"),
    expected_custom: Some("VUID-vkDestroyFence-fence-01121"),
    expected_default: Some("VUID-vkDestroyFence-fence-01122"),
};

const SEMAPHORE_DESTROY: DestroyCodes = DestroyCodes {
    owner: "VUID-vkDestroySemaphore-device-parameter",
    object: "VUID-vkDestroySemaphore-semaphore-parameter",
    parent: Some("VUID-vkDestroySemaphore-semaphore-parent"),
    expected_custom: Some("VUID-vkDestroySemaphore-semaphore-01138"),
    expected_default: Some("VUID-vkDestroySemaphore-semaphore-01139"),
};

impl ObjectTrackerLayer {
    // ── Fence ───────────────────────────────────────────────────

    /// # Safety
    /// `device` must be a live dispatchable device.
    pub unsafe fn create_fence(
        &self,
        device: vk::Device,
        allocator: Option<&vk::AllocationCallbacks<'_>>,
        call: impl FnOnce() -> VkResult<vk::Fence>,
    ) -> VkResult<vk::Fence> {
        unsafe {
            self.create_device_child(
                device,
                ObjectType::Fence,
                "VUID-vkCreateFence-device-parameter",
                allocator,
                call,
            )
        }
    }

    /// # Safety
    /// `device` must be a live dispatchable device.
    pub unsafe fn destroy_fence(
        &self,
        device: vk::Device,
        fence: vk::Fence,
        allocator: Option<&vk::AllocationCallbacks<'_>>,
        call: impl FnOnce(),
    ) {
        unsafe {
            self.destroy_device_child(device, fence, ObjectType::Fence, allocator, &FENCE_DESTROY, call);
        }
    }

    /// `vkWaitForFences`. Every fence must belong to `device`.
    ///
    /// # Safety
    /// `device` must be a live dispatchable device.
    pub unsafe fn wait_for_fences(
        &self,
        device: vk::Device,
        fences: &[vk::Fence],
        call: impl FnOnce() -> VkResult<()>,
    ) -> VkResult<()> {
        let ctx = Context::Device(unsafe { dispatch_key(device) });
        let mut skip = false;
        for fence in fences {
            skip |= self.tracker.validate_object(
                ctx,
                fence.as_raw(),
                ObjectType::Fence,
                false,
                "VUID-vkWaitForFences-pFences-parameter",
                Some("VUID-vkWaitForFences-pFences-parent"),
            );
        }
        if skip {
            return Err(SKIPPED);
        }
        call()
    }

    // ── Semaphore ──────────────────────────────────────────────

    /// # Safety
    /// `device` must be a live dispatchable device.
    pub unsafe fn create_semaphore(
        &self,
        device: vk::Device,
        allocator: Option<&vk::AllocationCallbacks<'_>>,
        call: impl FnOnce() -> VkResult<vk::Semaphore>,
    ) -> VkResult<vk::Semaphore> {
        unsafe {
            self.create_device_child(
                device,
                ObjectType::Semaphore,
                "VUID-vkCreateSemaphore-device-parameter",
                allocator,
                call,
            )
        }
    }

    /// # Safety
    /// `device` must be a live dispatchable device.
    pub unsafe fn destroy_semaphore(
        &self,
        device: vk::Device,
        semaphore: vk::Semaphore,
        allocator: Option<&vk::AllocationCallbacks<'_>>,
        call: impl FnOnce(),
    ) {
        unsafe {
            self.destroy_device_child(
                device,
                semaphore,
                ObjectType::Semaphore,
                allocator,
                &SEMAPHORE_DESTROY,
                call,
            );
        }
    }
}
