//! Images and image views.

use ash::prelude::VkResult;
use ash::vk;
use ash::vk::Handle;

use objtrack_core::Context;
use objtrack_types::ObjectType;

use crate::dispatch::dispatch_key;
use crate::{DestroyCodes, ObjectTrackerLayer, SKIPPED};

const IMAGE_DESTROY: DestroyCodes = DestroyCodes {
    owner: "VUID-vkDestroyImage-device-parameter",
    object: "VUID-vkDestroyImage-image-parameter",
    parent: Some("VUID-vkDestroyImage-image-parent"),
    expected_custom: Some("VUID-vkDestroyImage-image-01001"),
    expected_default: Some("VUID-vkDestroyImage-image-01002"),
};

const IMAGE_VIEW_DESTROY: DestroyCodes = DestroyCodes {
    owner: "VUID-vkDestroyImageView-device-parameter",
    object: "VUID-vkDestroyImageView-imageView-parameter",
    parent: Some("VUID-vkDestroyImageView-imageView-parent"),
    expected_custom: Some("VUID-vkDestroyImageView-imageView-01027"),
    expected_default: Some("VUID-vkDestroyImageView-imageView-01028"),
};

impl ObjectTrackerLayer {
    // ── vkCreateImage ────────────────────────────────────────

    /// # Safety
    /// `device` must be a live dispatchable device.
    pub unsafe fn create_image(
        &self,
        device: vk::Device,
        allocator: Option<&vk::AllocationCallbacks<'_>>,
        call: impl FnOnce() -> VkResult<vk::Image>,
    ) -> VkResult<vk::Image> {
        unsafe {
            self.create_device_child(
                device,
                ObjectType::Image,
                "VUID-vkCreateImage-device-parameter",
                allocator,
                call,
            )
        }
    }

    // ── vkDestroyImage ───────────────────────────────────────

    /// # Safety
    /// `device` must be a live dispatchable device.
    pub unsafe fn destroy_image(
        &self,
        device: vk::Device,
        image: vk::Image,
        allocator: Option<&vk::AllocationCallbacks<'_>>,
        call: impl FnOnce(),
    ) {
        unsafe {
            self.destroy_device_child(device, image, ObjectType::Image, allocator, &IMAGE_DESTROY, call);
        }
    }

    // ── vkCreateImageView ────────────────────────────────────

    /// The viewed image may be an application image or one owned by a
    /// swapchain.
    ///
    /// # Safety
    /// `device` must be a live dispatchable device.
    pub unsafe fn create_image_view(
        &self,
        device: vk::Device,
        image: vk::Image,
        allocator: Option<&vk::AllocationCallbacks<'_>>,
        call: impl FnOnce() -> VkResult<vk::ImageView>,
    ) -> VkResult<vk::ImageView> {
        let ctx = Context::Device(unsafe { dispatch_key(device) });
        if self.tracker.validate_object(
            ctx,
            image.as_raw(),
            ObjectType::Image,
            false,
            "VUID-VkImageViewCreateInfo-image-parameter",
            Some("VUID-vkCreateImageView-image-09179"),
        ) {
            return Err(SKIPPED);
        }
        unsafe {
            self.create_device_child(
                device,
                ObjectType::ImageView,
                "VUID-vkCreateImageView-device-parameter",
                allocator,
                call,
            )
        }
    }

    // ── vkDestroyImageView ───────────────────────────────────

    /// # Safety
    /// `device` must be a live dispatchable device.
    pub unsafe fn destroy_image_view(
        &self,
        device: vk::Device,
        image_view: vk::ImageView,
        allocator: Option<&vk::AllocationCallbacks<'_>>,
        call: impl FnOnce(),
    ) {
        unsafe {
            self.destroy_device_child(
                device,
                image_view,
                ObjectType::ImageView,
                allocator,
                &IMAGE_VIEW_DESTROY,
                call,
            );
        }
    }

    // ── vkBindImageMemory ────────────────────────────────────

    /// # Safety
    /// `device` must be a live dispatchable device.
    pub unsafe fn bind_image_memory(
        &self,
        device: vk::Device,
        image: vk::Image,
        memory: vk::DeviceMemory,
        call: impl FnOnce() -> VkResult<()>,
    ) -> VkResult<()> {
        let ctx = Context::Device(unsafe { dispatch_key(device) });
        let mut skip = self.tracker.validate_object(
            ctx,
            device.as_raw(),
            ObjectType::Device,
            false,
            "VUID-vkBindImageMemory-device-parameter",
            None,
        );
        skip |= self.tracker.validate_object(
            ctx,
            image.as_raw(),
            ObjectType::Image,
            false,
            "VUID-vkBindImageMemory-image-parameter",
            Some("VUID-vkBindImageMemory-image-parent"),
        );
        skip |= self.tracker.validate_object(
            ctx,
            memory.as_raw(),
            ObjectType::DeviceMemory,
            false,
            "VUID-vkBindImageMemory-memory-parameter",
            Some("VUID-vkBindImageMemory-memory-parent"),
        );
        if skip {
            return Err(SKIPPED);
        }
        call()
    }
}
