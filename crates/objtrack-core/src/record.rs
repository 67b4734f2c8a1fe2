use objtrack_types::{ObjectStatus, ObjectType};

/// Bookkeeping for one live handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectRecord {
    pub object_type: ObjectType,
    pub handle: u64,
    pub status: ObjectStatus,
    /// Pool or swapchain the object came from, 0 when it has none
    pub parent_object: u64,
    /// Value of the process-wide creation counter when this record was made
    pub create_index: u64,
}

impl ObjectRecord {
    pub fn new(object_type: ObjectType, handle: u64, status: ObjectStatus, create_index: u64) -> Self {
        Self {
            object_type,
            handle,
            status,
            parent_object: 0,
            create_index,
        }
    }

    pub fn with_parent(mut self, parent_object: u64) -> Self {
        self.parent_object = parent_object;
        self
    }

    pub fn custom_allocator(&self) -> bool {
        self.status.contains(ObjectStatus::CUSTOM_ALLOCATOR)
    }
}

/// Which queue family a retrieved queue belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueInfo {
    pub queue: u64,
    pub queue_family_index: u32,
}
