use ash::vk;
use objtrack_types::{vuid, ObjectStatus, ObjectType};

use super::Tracker;
use crate::directory::{Context, DispatchKey};
use crate::record::{ObjectRecord, QueueInfo};
use crate::report::Severity;

impl Tracker {
    /// Registers a queue retrieved from `device`. Queues are fetched rather
    /// than created, and the same queue may be fetched any number of times.
    pub fn create_queue(&self, device: DispatchKey, queue: u64) {
        let Some(state) = self.resolve(Context::Device(device)) else {
            return;
        };

        let index = {
            let mut lifetime = state.lifetime();
            if lifetime.contains(ObjectType::Queue, queue) {
                return;
            }
            let index = self.next_index();
            lifetime.insert(ObjectRecord::new(ObjectType::Queue, queue, ObjectStatus::NONE, index));
            index
        };

        state.log_msg(
            Severity::Information,
            ObjectType::Queue,
            queue,
            vuid::INFO,
            format!("OBJ[{:#x}] : CREATE {} object {:#x}", index, ObjectType::Queue, queue),
        );
    }

    /// Remembers which family `queue` was retrieved from.
    pub fn add_queue_info(&self, device: DispatchKey, queue_family_index: u32, queue: u64) {
        let Some(state) = self.resolve(Context::Device(device)) else {
            return;
        };
        state.lifetime().set_queue_info(QueueInfo {
            queue,
            queue_family_index,
        });
    }

    /// Records the capabilities of each queue family of the device's
    /// physical device, indexed by family.
    pub fn set_queue_family_properties(&self, device: DispatchKey, flags: Vec<vk::QueueFlags>) {
        let Some(state) = self.resolve(Context::Device(device)) else {
            return;
        };
        state.lifetime().set_queue_family_flags(flags);
    }

    /// Sparse binding must be submitted to a queue whose family supports it.
    /// Queues with unknown family data pass.
    pub fn validate_queue_flags(&self, device: DispatchKey, queue: u64, function: &str) -> bool {
        let Some(state) = self.resolve(Context::Device(device)) else {
            return false;
        };

        let flags = {
            let lifetime = state.lifetime();
            lifetime
                .queue_info(queue)
                .and_then(|info| lifetime.queue_family_flags(info.queue_family_index))
        };

        match flags {
            Some(flags) if !flags.contains(vk::QueueFlags::SPARSE_BINDING) => state.log_msg(
                Severity::Error,
                ObjectType::Queue,
                queue,
                vuid::QUEUE_BIND_SPARSE_QUEUE_TYPE,
                format!(
                    "Attempting {} on a non-memory-management capable queue -- VK_QUEUE_SPARSE_BINDING_BIT not set.",
                    function
                ),
            ),
            _ => false,
        }
    }

    /// Forgets every queue of `device`.
    pub fn destroy_queue_data_structures(&self, device: DispatchKey) {
        let Some(state) = self.resolve(Context::Device(device)) else {
            return;
        };
        let mut lifetime = state.lifetime();
        let queues: Vec<u64> = lifetime.records(ObjectType::Queue).map(|r| r.handle).collect();
        for queue in queues {
            lifetime.remove(ObjectType::Queue, queue);
        }
        lifetime.clear_queue_info();
    }
}
