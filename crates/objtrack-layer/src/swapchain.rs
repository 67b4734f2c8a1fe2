//! Swapchains and the images they own.

use ash::prelude::VkResult;
use ash::vk;
use ash::vk::Handle;

use objtrack_core::Context;
use objtrack_types::ObjectType;

use crate::dispatch::dispatch_key;
use crate::{DestroyCodes, ObjectTrackerLayer, SKIPPED};

const SWAPCHAIN_DESTROY: DestroyCodes = DestroyCodes {
    owner: "VUID-vkDestroySwapchainKHR-device-parameter",
    object: "VUID-vkDestroySwapchainKHR-swapchain-parameter",
    parent: Some("VUID-vkDestroySwapchainKHR-commonparent"),
    expected_custom: Some("VUID-vkDestroySwapchainKHR-swapchain-01283"),
    expected_default: Some("VUID-vkDestroySwapchainKHR-swapchain-01284"),
};

impl ObjectTrackerLayer {
    // ── vkCreateSwapchainKHR ────────────────────────────────────

    /// `vkCreateSwapchainKHR`. The surface is looked up in the instance the
    /// device was created from.
    ///
    /// # Safety
    /// `device` must be a live dispatchable device.
    pub unsafe fn create_swapchain(
        &self,
        device: vk::Device,
        surface: vk::SurfaceKHR,
        old_swapchain: vk::SwapchainKHR,
        allocator: Option<&vk::AllocationCallbacks<'_>>,
        call: impl FnOnce() -> VkResult<vk::SwapchainKHR>,
    ) -> VkResult<vk::SwapchainKHR> {
        let key = unsafe { dispatch_key(device) };
        let ctx = Context::Device(key);

        let mut skip = false;
        if let Some(instance) = self.tracker.instance_of(key) {
            skip |= self.tracker.validate_object(
                Context::Instance(instance),
                surface.as_raw(),
                ObjectType::SurfaceKhr,
                false,
                "VUID-VkSwapchainCreateInfoKHR-surface-parameter",
                None,
            );
        }
        skip |= self.tracker.validate_object(
            ctx,
            old_swapchain.as_raw(),
            ObjectType::SwapchainKhr,
            true,
            "VUID-VkSwapchainCreateInfoKHR-oldSwapchain-parameter",
            Some("VUID-VkSwapchainCreateInfoKHR-commonparent"),
        );
        if skip {
            return Err(SKIPPED);
        }

        unsafe {
            self.create_device_child(
                device,
                ObjectType::SwapchainKhr,
                "VUID-vkCreateSwapchainKHR-device-parameter",
                allocator,
                call,
            )
        }
    }

    // ── vkDestroySwapchainKHR ───────────────────────────────────

    /// `vkDestroySwapchainKHR`. The swapchain's images go with it.
    ///
    /// # Safety
    /// `device` must be a live dispatchable device.
    pub unsafe fn destroy_swapchain(
        &self,
        device: vk::Device,
        swapchain: vk::SwapchainKHR,
        allocator: Option<&vk::AllocationCallbacks<'_>>,
        call: impl FnOnce(),
    ) {
        let destroyed = unsafe {
            self.destroy_device_child(
                device,
                swapchain,
                ObjectType::SwapchainKhr,
                allocator,
                &SWAPCHAIN_DESTROY,
                call,
            )
        };
        if destroyed && swapchain != vk::SwapchainKHR::null() {
            let key = unsafe { dispatch_key(device) };
            self.tracker.destroy_swapchain_images(key, swapchain.as_raw());
        }
    }

    // ── vkGetSwapchainImagesKHR ─────────────────────────────────

    /// # Safety
    /// `device` must be a live dispatchable device.
    pub unsafe fn get_swapchain_images(
        &self,
        device: vk::Device,
        swapchain: vk::SwapchainKHR,
        call: impl FnOnce() -> VkResult<Vec<vk::Image>>,
    ) -> VkResult<Vec<vk::Image>> {
        let key = unsafe { dispatch_key(device) };
        if self.tracker.validate_object(
            Context::Device(key),
            swapchain.as_raw(),
            ObjectType::SwapchainKhr,
            false,
            "VUID-vkGetSwapchainImagesKHR-swapchain-parameter",
            Some("VUID-vkGetSwapchainImagesKHR-commonparent"),
        ) {
            return Err(SKIPPED);
        }

        let images = call()?;
        for image in &images {
            self.tracker
                .create_swapchain_image_object(key, image.as_raw(), swapchain.as_raw());
        }
        Ok(images)
    }
}
