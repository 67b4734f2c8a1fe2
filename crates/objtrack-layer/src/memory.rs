//! Device memory and buffers.

use ash::prelude::VkResult;
use ash::vk;
use ash::vk::Handle;

use objtrack_core::Context;
use objtrack_types::ObjectType;

use crate::dispatch::dispatch_key;
use crate::{DestroyCodes, ObjectTrackerLayer, SKIPPED};

// Memory allocations carry no allocator-symmetry requirement of their own.
const MEMORY_FREE: DestroyCodes = DestroyCodes {
    owner: "VUID-vkFreeMemory-device-parameter",
    object: "VUID-vkFreeMemory-memory-parameter",
    parent: Some("VUID-vkFreeMemory-memory-parent"),
    expected_custom: None,
    expected_default: None,
};

const BUFFER_DESTROY: DestroyCodes = DestroyCodes {
    owner: "VUID-vkDestroyBuffer-device-parameter",
    object: "VUID-vkDestroyBuffer-buffer-parameter",
    parent: Some("VUID-vkDestroyBuffer-buffer-parent"),
    expected_custom: Some("VUID-vkDestroyBuffer-buffer-00923"),
    expected_default: Some("VUID-vkDestroyBuffer-buffer-00924"),
};

impl ObjectTrackerLayer {
    // ── vkAllocateMemory ────────────────────────────────────────

    /// # Safety
    /// `device` must be a live dispatchable device.
    pub unsafe fn allocate_memory(
        &self,
        device: vk::Device,
        allocator: Option<&vk::AllocationCallbacks<'_>>,
        call: impl FnOnce() -> VkResult<vk::DeviceMemory>,
    ) -> VkResult<vk::DeviceMemory> {
        unsafe {
            self.create_device_child(
                device,
                ObjectType::DeviceMemory,
                "VUID-vkAllocateMemory-device-parameter",
                allocator,
                call,
            )
        }
    }

    // ── vkFreeMemory ────────────────────────────────────────────

    /// # Safety
    /// `device` must be a live dispatchable device.
    pub unsafe fn free_memory(
        &self,
        device: vk::Device,
        memory: vk::DeviceMemory,
        allocator: Option<&vk::AllocationCallbacks<'_>>,
        call: impl FnOnce(),
    ) {
        unsafe {
            self.destroy_device_child(device, memory, ObjectType::DeviceMemory, allocator, &MEMORY_FREE, call);
        }
    }

    // ── vkMapMemory ─────────────────────────────────────────────

    /// # Safety
    /// `device` must be a live dispatchable device.
    pub unsafe fn map_memory(
        &self,
        device: vk::Device,
        memory: vk::DeviceMemory,
        call: impl FnOnce() -> VkResult<*mut std::ffi::c_void>,
    ) -> VkResult<*mut std::ffi::c_void> {
        let ctx = Context::Device(unsafe { dispatch_key(device) });
        if self.tracker.validate_object(
            ctx,
            memory.as_raw(),
            ObjectType::DeviceMemory,
            false,
            "VUID-vkMapMemory-memory-parameter",
            Some("VUID-vkMapMemory-memory-parent"),
        ) {
            return Err(SKIPPED);
        }
        call()
    }

    // ── Buffer ──────────────────────────────────────────────────

    /// # Safety
    /// `device` must be a live dispatchable device.
    pub unsafe fn create_buffer(
        &self,
        device: vk::Device,
        allocator: Option<&vk::AllocationCallbacks<'_>>,
        call: impl FnOnce() -> VkResult<vk::Buffer>,
    ) -> VkResult<vk::Buffer> {
        unsafe {
            self.create_device_child(
                device,
                ObjectType::Buffer,
                "VUID-vkCreateBuffer-device-parameter",
                allocator,
                call,
            )
        }
    }

    /// # Safety
    /// `device` must be a live dispatchable device.
    pub unsafe fn destroy_buffer(
        &self,
        device: vk::Device,
        buffer: vk::Buffer,
        allocator: Option<&vk::AllocationCallbacks<'_>>,
        call: impl FnOnce(),
    ) {
        unsafe {
            self.destroy_device_child(device, buffer, ObjectType::Buffer, allocator, &BUFFER_DESTROY, call);
        }
    }

    /// # Safety
    /// `device` must be a live dispatchable device.
    pub unsafe fn bind_buffer_memory(
        &self,
        device: vk::Device,
        buffer: vk::Buffer,
        memory: vk::DeviceMemory,
        call: impl FnOnce() -> VkResult<()>,
    ) -> VkResult<()> {
        let ctx = Context::Device(unsafe { dispatch_key(device) });
        let mut skip = self.tracker.validate_object(
            ctx,
            buffer.as_raw(),
            ObjectType::Buffer,
            false,
            "VUID-vkBindBufferMemory-buffer-parameter",
            Some("VUID-vkBindBufferMemory-buffer-parent"),
        );
        skip |= self.tracker.validate_object(
            ctx,
            memory.as_raw(),
            ObjectType::DeviceMemory,
            false,
            "VUID-vkBindBufferMemory-memory-parameter",
            Some("VUID-vkBindBufferMemory-memory-parent"),
        );
        if skip {
            return Err(SKIPPED);
        }
        call()
    }
}
