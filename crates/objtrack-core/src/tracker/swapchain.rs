use objtrack_types::{vuid, ObjectStatus, ObjectType};

use super::Tracker;
use crate::directory::{Context, DispatchKey};
use crate::record::ObjectRecord;
use crate::report::Severity;

impl Tracker {
    /// Registers an image handed out by `swapchain`. Such images are never
    /// destroyed by the application, so they live in the swapchain image
    /// table instead of the object map and are not counted as objects.
    pub fn create_swapchain_image_object(&self, device: DispatchKey, image: u64, swapchain: u64) {
        let Some(state) = self.resolve(Context::Device(device)) else {
            return;
        };

        let index = {
            let mut lifetime = state.lifetime();
            if lifetime.swapchain_image(image).is_some() {
                return;
            }
            let index = self.next_index();
            lifetime.insert_swapchain_image(
                ObjectRecord::new(ObjectType::Image, image, ObjectStatus::NONE, index).with_parent(swapchain),
            );
            index
        };

        state.log_msg(
            Severity::Information,
            ObjectType::Image,
            image,
            vuid::INFO,
            format!("OBJ[{:#x}] : CREATE SwapchainImage object {:#x}", index, image),
        );
    }

    /// Forgets the images of a destroyed swapchain. Returns how many were
    /// dropped.
    pub fn destroy_swapchain_images(&self, device: DispatchKey, swapchain: u64) -> usize {
        let Some(state) = self.resolve(Context::Device(device)) else {
            return 0;
        };
        let removed = state.lifetime().remove_swapchain_images(swapchain);
        removed
    }

    pub fn swapchain_image_count(&self, device: DispatchKey) -> usize {
        self.directory
            .resolve_device(device)
            .map_or(0, |s| s.lifetime().swapchain_image_count())
    }
}
