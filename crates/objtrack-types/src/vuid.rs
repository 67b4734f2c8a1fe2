//! Diagnostic codes emitted by the tracker itself.
//!
//! Codes tied to a particular entry point (`VUID-vkDestroyImage-...`) are
//! supplied by the caller; these are the ones the engine raises on its own.

pub const INFO: &str = "UNASSIGNED-ObjectTracker-Info";
pub const INTERNAL_ERROR: &str = "UNASSIGNED-ObjectTracker-InternalError";
pub const OBJECT_LEAK: &str = "UNASSIGNED-ObjectTracker-ObjectLeak";

pub const FREE_COMMAND_BUFFER_INVALID: &str = "VUID-vkFreeCommandBuffers-pCommandBuffers-00048";
pub const FREE_COMMAND_BUFFER_PARENT: &str = "VUID-vkFreeCommandBuffers-pCommandBuffers-parent";
pub const FREE_DESCRIPTOR_SET_INVALID: &str = "VUID-vkFreeDescriptorSets-pDescriptorSets-00310";
pub const FREE_DESCRIPTOR_SET_PARENT: &str = "VUID-vkFreeDescriptorSets-pDescriptorSets-parent";
pub const QUEUE_BIND_SPARSE_QUEUE_TYPE: &str = "VUID-vkQueueBindSparse-queuetype";
