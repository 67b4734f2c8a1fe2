//! Command pools and command buffers.

use ash::prelude::VkResult;
use ash::vk;
use ash::vk::Handle;

use objtrack_core::{Context, NULL_HANDLE};
use objtrack_types::{ObjectStatus, ObjectType};

use crate::dispatch::dispatch_key;
use crate::{DestroyCodes, ObjectTrackerLayer, SKIPPED};

const COMMAND_POOL_DESTROY: DestroyCodes = DestroyCodes {
    owner: "VUID-vkDestroyCommandPool-device-parameter",
    object: "VUID-vkDestroyCommandPool-commandPool-parameter",
    parent: Some("VUID-vkDestroyCommandPool-commandPool-parent"),
    expected_custom: Some("VUID-vkDestroyCommandPool-commandPool-00042"),
    expected_default: Some("VUID-vkDestroyCommandPool-commandPool-00043"),
};

impl ObjectTrackerLayer {
    // ── Command Pool ────────────────────────────────────────────

    /// # Safety
    /// `device` must be a live dispatchable device.
    pub unsafe fn create_command_pool(
        &self,
        device: vk::Device,
        allocator: Option<&vk::AllocationCallbacks<'_>>,
        call: impl FnOnce() -> VkResult<vk::CommandPool>,
    ) -> VkResult<vk::CommandPool> {
        unsafe {
            self.create_device_child(
                device,
                ObjectType::CommandPool,
                "VUID-vkCreateCommandPool-device-parameter",
                allocator,
                call,
            )
        }
    }

    /// `vkDestroyCommandPool`. Command buffers still allocated from the
    /// pool are freed along with it.
    ///
    /// # Safety
    /// `device` must be a live dispatchable device.
    pub unsafe fn destroy_command_pool(
        &self,
        device: vk::Device,
        command_pool: vk::CommandPool,
        allocator: Option<&vk::AllocationCallbacks<'_>>,
        call: impl FnOnce(),
    ) {
        let destroyed = unsafe {
            self.destroy_device_child(
                device,
                command_pool,
                ObjectType::CommandPool,
                allocator,
                &COMMAND_POOL_DESTROY,
                call,
            )
        };
        if destroyed && command_pool != vk::CommandPool::null() {
            let key = unsafe { dispatch_key(device) };
            self.tracker
                .destroy_pool_children(key, command_pool.as_raw(), ObjectType::CommandBuffer);
        }
    }

    // ── Command Buffer Allocation ───────────────────────────────

    /// `vkAllocateCommandBuffers`. Each new command buffer remembers its
    /// pool and level.
    ///
    /// # Safety
    /// `device` must be a live dispatchable device.
    pub unsafe fn allocate_command_buffers(
        &self,
        device: vk::Device,
        command_pool: vk::CommandPool,
        level: vk::CommandBufferLevel,
        call: impl FnOnce() -> VkResult<Vec<vk::CommandBuffer>>,
    ) -> VkResult<Vec<vk::CommandBuffer>> {
        let key = unsafe { dispatch_key(device) };
        let ctx = Context::Device(key);

        let mut skip = self.tracker.validate_object(
            ctx,
            device.as_raw(),
            ObjectType::Device,
            false,
            "VUID-vkAllocateCommandBuffers-device-parameter",
            None,
        );
        skip |= self.tracker.validate_object(
            ctx,
            command_pool.as_raw(),
            ObjectType::CommandPool,
            false,
            "VUID-VkCommandBufferAllocateInfo-commandPool-parameter",
            Some("VUID-vkAllocateCommandBuffers-commonparent"),
        );
        if skip {
            return Err(SKIPPED);
        }

        let command_buffers = call()?;
        for command_buffer in &command_buffers {
            self.tracker
                .allocate_command_buffer(key, command_pool.as_raw(), command_buffer.as_raw(), level);
        }
        Ok(command_buffers)
    }

    /// `vkFreeCommandBuffers`. Every command buffer must have been
    /// allocated from `command_pool`. Null entries are ignored.
    ///
    /// # Safety
    /// `device` must be a live dispatchable device.
    pub unsafe fn free_command_buffers(
        &self,
        device: vk::Device,
        command_pool: vk::CommandPool,
        command_buffers: &[vk::CommandBuffer],
        call: impl FnOnce(),
    ) {
        let key = unsafe { dispatch_key(device) };
        let ctx = Context::Device(key);

        let mut skip = self.tracker.validate_object(
            ctx,
            command_pool.as_raw(),
            ObjectType::CommandPool,
            false,
            "VUID-vkFreeCommandBuffers-commandPool-parameter",
            Some("VUID-vkFreeCommandBuffers-commandPool-parent"),
        );
        let live: Vec<u64> = command_buffers
            .iter()
            .map(|cb| cb.as_raw())
            .filter(|&cb| cb != NULL_HANDLE)
            .collect();
        for &command_buffer in &live {
            skip |= self
                .tracker
                .validate_command_buffer(key, command_pool.as_raw(), command_buffer);
        }
        if skip {
            return;
        }

        call();
        for command_buffer in live {
            self.tracker
                .record_destroy_object(ctx, command_buffer, ObjectType::CommandBuffer);
        }
    }

    // ── Command Buffer Recording ────────────────────────────────

    /// `vkBeginCommandBuffer`. A secondary command buffer's inheritance
    /// info may name a render pass and framebuffer, which must be live.
    ///
    /// # Safety
    /// `command_buffer` must be a live dispatchable command buffer.
    pub unsafe fn begin_command_buffer(
        &self,
        command_buffer: vk::CommandBuffer,
        inheritance: Option<&vk::CommandBufferInheritanceInfo<'_>>,
        call: impl FnOnce() -> VkResult<()>,
    ) -> VkResult<()> {
        let ctx = Context::Device(unsafe { dispatch_key(command_buffer) });

        let mut skip = self.tracker.validate_object(
            ctx,
            command_buffer.as_raw(),
            ObjectType::CommandBuffer,
            false,
            "VUID-vkBeginCommandBuffer-commandBuffer-parameter",
            None,
        );

        let secondary = self
            .tracker
            .object_status(ctx, command_buffer.as_raw(), ObjectType::CommandBuffer)
            .is_some_and(|status| status.contains(ObjectStatus::COMMAND_BUFFER_SECONDARY));
        if let (true, Some(info)) = (secondary, inheritance) {
            skip |= self.tracker.validate_object(
                ctx,
                info.framebuffer.as_raw(),
                ObjectType::Framebuffer,
                true,
                "VUID-VkCommandBufferBeginInfo-flags-00055",
                Some("VUID-VkCommandBufferInheritanceInfo-commonparent"),
            );
            skip |= self.tracker.validate_object(
                ctx,
                info.render_pass.as_raw(),
                ObjectType::RenderPass,
                true,
                "VUID-VkCommandBufferBeginInfo-flags-06000",
                Some("VUID-VkCommandBufferInheritanceInfo-commonparent"),
            );
        }

        if skip {
            return Err(SKIPPED);
        }
        call()
    }
}
