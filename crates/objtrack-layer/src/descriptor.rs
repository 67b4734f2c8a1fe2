//! Descriptor pools and descriptor sets.

use ash::prelude::VkResult;
use ash::vk;
use ash::vk::Handle;

use objtrack_core::{Context, NULL_HANDLE};
use objtrack_types::ObjectType;

use crate::dispatch::dispatch_key;
use crate::{DestroyCodes, ObjectTrackerLayer, SKIPPED};

const DESCRIPTOR_POOL_DESTROY: DestroyCodes = DestroyCodes {
    owner: "VUID-vkDestroyDescriptorPool-device-parameter",
    object: "VUID-vkDestroyDescriptorPool-descriptorPool-parameter",
    parent: Some("VUID-vkDestroyDescriptorPool-descriptorPool-parent"),
    expected_custom: Some("VUID-vkDestroyDescriptorPool-descriptorPool-00304"),
    expected_default: Some("VUID-vkDestroyDescriptorPool-descriptorPool-00305"),
};

impl ObjectTrackerLayer {
    // ── Descriptor Pool ─────────────────────────────────────────

    /// # Safety
    /// `device` must be a live dispatchable device.
    pub unsafe fn create_descriptor_pool(
        &self,
        device: vk::Device,
        allocator: Option<&vk::AllocationCallbacks<'_>>,
        call: impl FnOnce() -> VkResult<vk::DescriptorPool>,
    ) -> VkResult<vk::DescriptorPool> {
        unsafe {
            self.create_device_child(
                device,
                ObjectType::DescriptorPool,
                "VUID-vkCreateDescriptorPool-device-parameter",
                allocator,
                call,
            )
        }
    }

    /// `vkDestroyDescriptorPool`. Sets still allocated from the pool are
    /// freed along with it.
    ///
    /// # Safety
    /// `device` must be a live dispatchable device.
    pub unsafe fn destroy_descriptor_pool(
        &self,
        device: vk::Device,
        descriptor_pool: vk::DescriptorPool,
        allocator: Option<&vk::AllocationCallbacks<'_>>,
        call: impl FnOnce(),
    ) {
        let destroyed = unsafe {
            self.destroy_device_child(
                device,
                descriptor_pool,
                ObjectType::DescriptorPool,
                allocator,
                &DESCRIPTOR_POOL_DESTROY,
                call,
            )
        };
        if destroyed && descriptor_pool != vk::DescriptorPool::null() {
            let key = unsafe { dispatch_key(device) };
            self.tracker
                .destroy_pool_children(key, descriptor_pool.as_raw(), ObjectType::DescriptorSet);
        }
    }

    /// `vkResetDescriptorPool`. Every set allocated from the pool returns
    /// to it.
    ///
    /// # Safety
    /// `device` must be a live dispatchable device.
    pub unsafe fn reset_descriptor_pool(
        &self,
        device: vk::Device,
        descriptor_pool: vk::DescriptorPool,
        call: impl FnOnce() -> VkResult<()>,
    ) -> VkResult<()> {
        let key = unsafe { dispatch_key(device) };
        let ctx = Context::Device(key);

        let mut skip = self.tracker.validate_object(
            ctx,
            device.as_raw(),
            ObjectType::Device,
            false,
            "VUID-vkResetDescriptorPool-device-parameter",
            None,
        );
        skip |= self.tracker.validate_object(
            ctx,
            descriptor_pool.as_raw(),
            ObjectType::DescriptorPool,
            false,
            "VUID-vkResetDescriptorPool-descriptorPool-parameter",
            Some("VUID-vkResetDescriptorPool-descriptorPool-parent"),
        );
        if skip {
            return Err(SKIPPED);
        }

        self.tracker
            .destroy_pool_children(key, descriptor_pool.as_raw(), ObjectType::DescriptorSet);
        call()
    }

    // ── Descriptor Set Allocation ───────────────────────────────

    /// `vkAllocateDescriptorSets`. Every layout must belong to `device`.
    ///
    /// # Safety
    /// `device` must be a live dispatchable device.
    pub unsafe fn allocate_descriptor_sets(
        &self,
        device: vk::Device,
        descriptor_pool: vk::DescriptorPool,
        set_layouts: &[vk::DescriptorSetLayout],
        call: impl FnOnce() -> VkResult<Vec<vk::DescriptorSet>>,
    ) -> VkResult<Vec<vk::DescriptorSet>> {
        let key = unsafe { dispatch_key(device) };
        let ctx = Context::Device(key);

        let mut skip = self.tracker.validate_object(
            ctx,
            device.as_raw(),
            ObjectType::Device,
            false,
            "VUID-vkAllocateDescriptorSets-device-parameter",
            None,
        );
        skip |= self.tracker.validate_object(
            ctx,
            descriptor_pool.as_raw(),
            ObjectType::DescriptorPool,
            false,
            "VUID-VkDescriptorSetAllocateInfo-descriptorPool-parameter",
            Some("VUID-VkDescriptorSetAllocateInfo-commonparent"),
        );
        for layout in set_layouts {
            skip |= self.tracker.validate_object(
                ctx,
                layout.as_raw(),
                ObjectType::DescriptorSetLayout,
                false,
                "VUID-VkDescriptorSetAllocateInfo-pSetLayouts-parameter",
                Some("VUID-VkDescriptorSetAllocateInfo-commonparent"),
            );
        }
        if skip {
            return Err(SKIPPED);
        }

        let descriptor_sets = call()?;
        for set in &descriptor_sets {
            self.tracker
                .allocate_descriptor_set(key, descriptor_pool.as_raw(), set.as_raw());
        }
        Ok(descriptor_sets)
    }

    /// `vkFreeDescriptorSets`. Every set must have been allocated from
    /// `descriptor_pool`. Null entries are ignored.
    ///
    /// # Safety
    /// `device` must be a live dispatchable device.
    pub unsafe fn free_descriptor_sets(
        &self,
        device: vk::Device,
        descriptor_pool: vk::DescriptorPool,
        descriptor_sets: &[vk::DescriptorSet],
        call: impl FnOnce() -> VkResult<()>,
    ) -> VkResult<()> {
        let key = unsafe { dispatch_key(device) };
        let ctx = Context::Device(key);

        let mut skip = self.tracker.validate_object(
            ctx,
            descriptor_pool.as_raw(),
            ObjectType::DescriptorPool,
            false,
            "VUID-vkFreeDescriptorSets-descriptorPool-parameter",
            Some("VUID-vkFreeDescriptorSets-descriptorPool-parent"),
        );
        let live: Vec<u64> = descriptor_sets
            .iter()
            .map(|set| set.as_raw())
            .filter(|&set| set != NULL_HANDLE)
            .collect();
        for &set in &live {
            skip |= self
                .tracker
                .validate_descriptor_set(key, descriptor_pool.as_raw(), set);
        }
        if skip {
            return Err(SKIPPED);
        }

        call()?;
        for set in live {
            self.tracker
                .record_destroy_object(ctx, set, ObjectType::DescriptorSet);
        }
        Ok(())
    }
}
