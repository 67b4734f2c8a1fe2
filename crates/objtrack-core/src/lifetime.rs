use std::collections::HashMap;

use ash::vk;
use objtrack_types::ObjectType;

use crate::record::{ObjectRecord, QueueInfo};

/// The live objects owned by one instance or device.
///
/// `num_objects` and `num_total_objects` always equal the sizes of the
/// corresponding maps; they are adjusted on every insert and removal.
pub struct ObjectLifetime {
    object_map: [HashMap<u64, ObjectRecord>; ObjectType::COUNT],
    num_objects: [u64; ObjectType::COUNT],
    num_total_objects: u64,
    /// Images handed out by swapchains, keyed by image handle
    swapchain_image_map: HashMap<u64, ObjectRecord>,
    queue_info_map: HashMap<u64, QueueInfo>,
    queue_family_flags: Vec<vk::QueueFlags>,
}

impl ObjectLifetime {
    pub fn new() -> Self {
        Self {
            object_map: std::array::from_fn(|_| HashMap::new()),
            num_objects: [0; ObjectType::COUNT],
            num_total_objects: 0,
            swapchain_image_map: HashMap::new(),
            queue_info_map: HashMap::new(),
            queue_family_flags: Vec::new(),
        }
    }

    pub fn get(&self, object_type: ObjectType, handle: u64) -> Option<&ObjectRecord> {
        self.object_map[object_type.index()].get(&handle)
    }

    pub fn contains(&self, object_type: ObjectType, handle: u64) -> bool {
        self.object_map[object_type.index()].contains_key(&handle)
    }

    /// Whether `handle` is known as an object of `object_type`. Images also
    /// match entries of the swapchain image table.
    pub fn is_tracked(&self, object_type: ObjectType, handle: u64) -> bool {
        self.contains(object_type, handle)
            || (object_type == ObjectType::Image && self.swapchain_image_map.contains_key(&handle))
    }

    /// Inserts `record` unless its handle is already tracked under the same
    /// type. Returns whether it was inserted.
    pub fn insert(&mut self, record: ObjectRecord) -> bool {
        let idx = record.object_type.index();
        if self.object_map[idx].contains_key(&record.handle) {
            return false;
        }
        self.object_map[idx].insert(record.handle, record);
        self.num_objects[idx] += 1;
        self.num_total_objects += 1;
        true
    }

    pub fn remove(&mut self, object_type: ObjectType, handle: u64) -> Option<ObjectRecord> {
        let idx = object_type.index();
        let record = self.object_map[idx].remove(&handle)?;
        debug_assert!(self.num_total_objects > 0);
        debug_assert!(self.num_objects[idx] > 0);
        self.num_total_objects = self.num_total_objects.saturating_sub(1);
        self.num_objects[idx] = self.num_objects[idx].saturating_sub(1);
        Some(record)
    }

    pub fn count(&self, object_type: ObjectType) -> u64 {
        self.num_objects[object_type.index()]
    }

    pub fn total(&self) -> u64 {
        self.num_total_objects
    }

    pub fn records(&self, object_type: ObjectType) -> impl Iterator<Item = &ObjectRecord> {
        self.object_map[object_type.index()].values()
    }

    /// Handles of `object_type` whose parent is `parent`.
    pub fn children_of(&self, object_type: ObjectType, parent: u64) -> Vec<u64> {
        self.records(object_type)
            .filter(|r| r.parent_object == parent)
            .map(|r| r.handle)
            .collect()
    }

    /// Removes every record of every type, returning how many there were.
    /// Swapchain images and queue data are cleared as well.
    pub fn drain(&mut self) -> u64 {
        let drained = self.num_total_objects;
        for map in self.object_map.iter_mut() {
            map.clear();
        }
        self.num_objects = [0; ObjectType::COUNT];
        self.num_total_objects = 0;
        self.swapchain_image_map.clear();
        self.queue_info_map.clear();
        drained
    }

    // ── Swapchain images ────────────────────────────────────

    pub fn insert_swapchain_image(&mut self, record: ObjectRecord) -> bool {
        if self.swapchain_image_map.contains_key(&record.handle) {
            return false;
        }
        self.swapchain_image_map.insert(record.handle, record);
        true
    }

    pub fn swapchain_image(&self, image: u64) -> Option<&ObjectRecord> {
        self.swapchain_image_map.get(&image)
    }

    pub fn swapchain_image_count(&self) -> usize {
        self.swapchain_image_map.len()
    }

    /// Drops the images owned by `swapchain`, returning how many were removed.
    pub fn remove_swapchain_images(&mut self, swapchain: u64) -> usize {
        let before = self.swapchain_image_map.len();
        self.swapchain_image_map.retain(|_, r| r.parent_object != swapchain);
        before - self.swapchain_image_map.len()
    }

    // ── Queues ──────────────────────────────────────────────

    pub fn set_queue_info(&mut self, info: QueueInfo) {
        self.queue_info_map.insert(info.queue, info);
    }

    pub fn queue_info(&self, queue: u64) -> Option<&QueueInfo> {
        self.queue_info_map.get(&queue)
    }

    pub fn clear_queue_info(&mut self) {
        self.queue_info_map.clear();
    }

    pub fn set_queue_family_flags(&mut self, flags: Vec<vk::QueueFlags>) {
        self.queue_family_flags = flags;
    }

    pub fn queue_family_flags(&self, queue_family_index: u32) -> Option<vk::QueueFlags> {
        self.queue_family_flags.get(queue_family_index as usize).copied()
    }
}

impl Default for ObjectLifetime {
    fn default() -> Self {
        Self::new()
    }
}
