use ash::vk;
use objtrack_types::{vuid, ObjectStatus, ObjectType};

use super::Tracker;
use crate::directory::{Context, DispatchKey};
use crate::record::ObjectRecord;
use crate::report::Severity;

impl Tracker {
    fn allocate_from_pool(
        &self,
        device: DispatchKey,
        pool: u64,
        handle: u64,
        object_type: ObjectType,
        status: ObjectStatus,
    ) {
        let Some(state) = self.resolve(Context::Device(device)) else {
            return;
        };

        let index = {
            let mut lifetime = state.lifetime();
            if lifetime.contains(object_type, handle) {
                return;
            }
            let index = self.next_index();
            lifetime.insert(ObjectRecord::new(object_type, handle, status, index).with_parent(pool));
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

    pub fn allocate_command_buffer(
        &self,
        device: DispatchKey,
        command_pool: u64,
        command_buffer: u64,
        level: vk::CommandBufferLevel,
    ) {
        let status = if level == vk::CommandBufferLevel::SECONDARY {
            ObjectStatus::COMMAND_BUFFER_SECONDARY
        } else {
            ObjectStatus::NONE
        };
        self.allocate_from_pool(device, command_pool, command_buffer, ObjectType::CommandBuffer, status);
    }

    pub fn allocate_descriptor_set(&self, device: DispatchKey, descriptor_pool: u64, descriptor_set: u64) {
        self.allocate_from_pool(
            device,
            descriptor_pool,
            descriptor_set,
            ObjectType::DescriptorSet,
            ObjectStatus::NONE,
        );
    }

    /// Checks that `command_buffer` is live and was allocated from
    /// `command_pool`.
    pub fn validate_command_buffer(&self, device: DispatchKey, command_pool: u64, command_buffer: u64) -> bool {
        self.validate_pool_child(
            device,
            command_pool,
            command_buffer,
            ObjectType::CommandBuffer,
            vuid::FREE_COMMAND_BUFFER_INVALID,
            vuid::FREE_COMMAND_BUFFER_PARENT,
        )
    }

    /// Checks that `descriptor_set` is live and was allocated from
    /// `descriptor_pool`.
    pub fn validate_descriptor_set(&self, device: DispatchKey, descriptor_pool: u64, descriptor_set: u64) -> bool {
        self.validate_pool_child(
            device,
            descriptor_pool,
            descriptor_set,
            ObjectType::DescriptorSet,
            vuid::FREE_DESCRIPTOR_SET_INVALID,
            vuid::FREE_DESCRIPTOR_SET_PARENT,
        )
    }

    fn validate_pool_child(
        &self,
        device: DispatchKey,
        pool: u64,
        handle: u64,
        object_type: ObjectType,
        invalid_code: &str,
        parent_code: &str,
    ) -> bool {
        let Some(state) = self.resolve(Context::Device(device)) else {
            return false;
        };

        let parent = state.lifetime().get(object_type, handle).map(|r| r.parent_object);
        match parent {
            Some(parent) if parent == pool => false,
            Some(parent) => {
                let (function, pool_type) = match object_type {
                    ObjectType::CommandBuffer => ("FreeCommandBuffers", ObjectType::CommandPool),
                    _ => ("FreeDescriptorSets", ObjectType::DescriptorPool),
                };
                state.log_msg(
                    Severity::Error,
                    object_type,
                    handle,
                    parent_code,
                    format!(
                        "{} is attempting to free {} {:#x} belonging to {} {:#x} from pool {:#x}.",
                        function, object_type, handle, pool_type, parent, pool
                    ),
                )
            }
            None => state.log_msg(
                Severity::Error,
                object_type,
                handle,
                invalid_code,
                format!("Invalid {} Object {:#x}.", object_type, handle),
            ),
        }
    }

    /// Drops every `child_type` record allocated from `pool`, as happens
    /// implicitly when a pool is destroyed or reset. Returns how many were
    /// dropped.
    pub fn destroy_pool_children(&self, device: DispatchKey, pool: u64, child_type: ObjectType) -> usize {
        let Some(state) = self.resolve(Context::Device(device)) else {
            return 0;
        };
        let mut lifetime = state.lifetime();
        let children = lifetime.children_of(child_type, pool);
        for &child in &children {
            lifetime.remove(child_type, child);
        }
        children.len()
    }
}
