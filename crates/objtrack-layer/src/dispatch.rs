//! Dispatch-key resolution for dispatchable handles.
//!
//! The Vulkan loader requires that dispatchable handles (VkInstance,
//! VkPhysicalDevice, VkDevice, VkQueue, VkCommandBuffer) have their first
//! `sizeof(void*)` bytes point to a dispatch table. Every handle derived
//! from the same instance or device shares that table, so its address
//! identifies the owning context.

use ash::vk::Handle;
use objtrack_core::DispatchKey;

/// Layout of the loader-visible prefix of a dispatchable handle.
#[repr(C)]
pub struct DispatchableHandle {
    /// Pointer to the loader's dispatch table.
    pub loader_data: usize,
}

impl DispatchableHandle {
    /// Allocate a dispatchable object on the heap whose dispatch table is
    /// `loader_data`.
    pub fn new(loader_data: usize) -> *mut Self {
        Box::into_raw(Box::new(Self { loader_data }))
    }

    /// Free a dispatchable object.
    ///
    /// # Safety
    /// The pointer must have been created by `DispatchableHandle::new`.
    pub unsafe fn destroy(ptr: *mut Self) {
        drop(unsafe { Box::from_raw(ptr) });
    }
}

/// Returns the context identity of a dispatchable handle.
///
/// # Safety
/// `handle` must be a non-null dispatchable handle pointing to a live loader
/// object.
pub unsafe fn dispatch_key<H: Handle>(handle: H) -> DispatchKey {
    let ptr = handle.as_raw() as *const DispatchableHandle;
    DispatchKey(unsafe { (*ptr).loader_data } as u64)
}
