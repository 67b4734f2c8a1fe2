//! Integration test: interception shims
//!
//! Drives the shims the way a dispatch layer would, with fake dispatchable
//! handles standing in for loader objects and closures standing in for the
//! next implementation in the chain.
//!
//! Run with: cargo test --test layer_test -- --nocapture

use std::cell::Cell;
use std::sync::Arc;

use ash::vk;
use ash::vk::Handle;
use objtrack_core::{Context, DispatchKey, MemorySink, ReportSink, TrackerConfig};
use objtrack_layer::dispatch::{dispatch_key, DispatchableHandle};
use objtrack_layer::{ObjectTrackerLayer, SKIPPED};
use objtrack_types::{vuid, ObjectType};

const INSTANCE_TABLE: usize = 0x1000;
const DEVICE_A_TABLE: usize = 0x2000;
const DEVICE_B_TABLE: usize = 0x3000;

const INST: Context = Context::Instance(DispatchKey(INSTANCE_TABLE as u64));
const DEV_A: Context = Context::Device(DispatchKey(DEVICE_A_TABLE as u64));
const DEV_B: Context = Context::Device(DispatchKey(DEVICE_B_TABLE as u64));

/// Owns the heap objects behind fake dispatchable handles.
#[derive(Default)]
struct FakeLoader {
    objects: Vec<*mut DispatchableHandle>,
}

impl FakeLoader {
    fn dispatchable<H: Handle>(&mut self, table: usize) -> H {
        let ptr = DispatchableHandle::new(table);
        self.objects.push(ptr);
        H::from_raw(ptr as u64)
    }
}

impl Drop for FakeLoader {
    fn drop(&mut self) {
        for ptr in self.objects.drain(..) {
            unsafe { DispatchableHandle::destroy(ptr) };
        }
    }
}

struct Fixture {
    layer: ObjectTrackerLayer,
    sink: Arc<MemorySink>,
    loader: FakeLoader,
    instance: vk::Instance,
    physical_device: vk::PhysicalDevice,
    device_a: vk::Device,
    device_b: vk::Device,
}

fn family(flags: vk::QueueFlags) -> vk::QueueFamilyProperties {
    vk::QueueFamilyProperties {
        queue_flags: flags,
        queue_count: 1,
        ..Default::default()
    }
}

/// One instance, one physical device, two devices. Family 0 is a graphics
/// family without sparse binding, family 1 supports sparse binding.
fn setup() -> Fixture {
    let layer = ObjectTrackerLayer::new(TrackerConfig::default());
    let sink = Arc::new(MemorySink::new());
    let mut loader = FakeLoader::default();

    let instance: vk::Instance = loader.dispatchable(INSTANCE_TABLE);
    let physical_device: vk::PhysicalDevice = loader.dispatchable(INSTANCE_TABLE);
    let device_a: vk::Device = loader.dispatchable(DEVICE_A_TABLE);
    let device_b: vk::Device = loader.dispatchable(DEVICE_B_TABLE);
    let families = [
        family(vk::QueueFlags::GRAPHICS | vk::QueueFlags::COMPUTE),
        family(vk::QueueFlags::SPARSE_BINDING),
    ];

    let report_sink: Arc<dyn ReportSink> = sink.clone();
    unsafe {
        layer
            .create_instance(None, Some(report_sink), || Ok(instance))
            .expect("create instance");
        layer
            .enumerate_physical_devices(instance, || Ok(vec![physical_device]))
            .expect("enumerate physical devices");
        layer
            .create_device(physical_device, None, &families, || Ok(device_a))
            .expect("create device A");
        layer
            .create_device(physical_device, None, &families, || Ok(device_b))
            .expect("create device B");
    }

    sink.clear();
    Fixture {
        layer,
        sink,
        loader,
        instance,
        physical_device,
        device_a,
        device_b,
    }
}

#[test]
fn test_dispatch_key_reads_loader_table() {
    let mut loader = FakeLoader::default();
    let device: vk::Device = loader.dispatchable(DEVICE_A_TABLE);
    let queue: vk::Queue = loader.dispatchable(DEVICE_A_TABLE);

    let key = unsafe { dispatch_key(device) };
    assert_eq!(key, DispatchKey(DEVICE_A_TABLE as u64));
    assert_eq!(unsafe { dispatch_key(queue) }, key);
}

#[test]
fn test_setup_registers_contexts() {
    let f = setup();
    let tracker = f.layer.tracker();

    assert_eq!(tracker.directory().instance_count(), 1);
    assert_eq!(tracker.directory().device_count(), 2);
    assert_eq!(tracker.object_count(INST, ObjectType::PhysicalDevice), 1);
    assert_eq!(tracker.object_count(INST, ObjectType::Device), 2);
    assert!(tracker.is_tracked(INST, f.instance.as_raw(), ObjectType::Instance));
    assert_eq!(
        tracker.instance_of(DispatchKey(DEVICE_B_TABLE as u64)),
        Some(DispatchKey(INSTANCE_TABLE as u64))
    );
}

#[test]
fn test_buffer_lifecycle() {
    let f = setup();
    let buffer = vk::Buffer::from_raw(0x100);

    let created = unsafe { f.layer.create_buffer(f.device_a, None, || Ok(buffer)) };
    assert_eq!(created, Ok(buffer));
    assert_eq!(f.layer.tracker().object_count(DEV_A, ObjectType::Buffer), 1);

    let called = Cell::new(false);
    unsafe { f.layer.destroy_buffer(f.device_a, buffer, None, || called.set(true)) };
    assert!(called.get());
    assert_eq!(f.layer.tracker().object_count(DEV_A, ObjectType::Buffer), 0);
    assert!(f.sink.errors().is_empty());

    // Second destroy names a handle that no longer exists
    let called = Cell::new(false);
    unsafe { f.layer.destroy_buffer(f.device_a, buffer, None, || called.set(true)) };
    assert!(!called.get());
    assert_eq!(f.sink.count_code("VUID-vkDestroyBuffer-buffer-parameter"), 1);
}

#[test]
fn test_failed_create_records_nothing() {
    let f = setup();

    let result = unsafe {
        f.layer
            .create_buffer(f.device_a, None, || Err(vk::Result::ERROR_OUT_OF_DEVICE_MEMORY))
    };
    assert_eq!(result, Err(vk::Result::ERROR_OUT_OF_DEVICE_MEMORY));
    assert_eq!(f.layer.tracker().total_object_count(DEV_A), 0);
}

#[test]
fn test_destroy_through_wrong_device() {
    let f = setup();
    let buffer = vk::Buffer::from_raw(0x100);
    unsafe { f.layer.create_buffer(f.device_a, None, || Ok(buffer)) }.expect("create buffer");

    let called = Cell::new(false);
    unsafe { f.layer.destroy_buffer(f.device_b, buffer, None, || called.set(true)) };

    assert!(!called.get());
    assert_eq!(f.sink.count_code("VUID-vkDestroyBuffer-buffer-parent"), 1);
    assert!(f.layer.tracker().is_tracked(DEV_A, buffer.as_raw(), ObjectType::Buffer));
}

#[test]
fn test_allocator_mismatch_blocks_destroy() {
    let f = setup();
    let callbacks = vk::AllocationCallbacks::default();
    let fence = vk::Fence::from_raw(0x200);
    unsafe { f.layer.create_fence(f.device_a, Some(&callbacks), || Ok(fence)) }.expect("create fence");

    let called = Cell::new(false);
    unsafe { f.layer.destroy_fence(f.device_a, fence, None, || called.set(true)) };
    assert!(!called.get());
    assert_eq!(f.sink.count_code("VUID-vkDestroyFence-fence-01121"), 1);

    unsafe { f.layer.destroy_fence(f.device_a, fence, Some(&callbacks), || called.set(true)) };
    assert!(called.get());
    assert_eq!(f.layer.tracker().object_count(DEV_A, ObjectType::Fence), 0);
}

#[test]
fn test_skipped_create_returns_validation_failed() {
    let f = setup();
    let called = Cell::new(false);

    let result = unsafe {
        f.layer.create_image_view(f.device_a, vk::Image::from_raw(0x999), None, || {
            called.set(true);
            Ok(vk::ImageView::from_raw(0x300))
        })
    };

    assert_eq!(result, Err(SKIPPED));
    assert!(!called.get());
    assert_eq!(f.sink.count_code("VUID-VkImageViewCreateInfo-image-parameter"), 1);
    assert_eq!(f.layer.tracker().object_count(DEV_A, ObjectType::ImageView), 0);
}

#[test]
fn test_bind_memory_checks_both_handles() {
    let f = setup();
    let image = unsafe { f.layer.create_image(f.device_a, None, || Ok(vk::Image::from_raw(0x310))) }
        .expect("create image");
    let memory = unsafe {
        f.layer
            .allocate_memory(f.device_b, None, || Ok(vk::DeviceMemory::from_raw(0x320)))
    }
    .expect("allocate memory");

    let result = unsafe { f.layer.bind_image_memory(f.device_a, image, memory, || Ok(())) };
    assert_eq!(result, Err(SKIPPED));
    assert_eq!(f.sink.count_code("VUID-vkBindImageMemory-memory-parent"), 1);
}

#[test]
fn test_swapchain_images_follow_their_swapchain() {
    let f = setup();

    let surface = unsafe {
        f.layer
            .create_surface(f.instance, None, || Ok(vk::SurfaceKHR::from_raw(0x500)))
    }
    .expect("create surface");
    let swapchain = unsafe {
        f.layer.create_swapchain(f.device_a, surface, vk::SwapchainKHR::null(), None, || {
            Ok(vk::SwapchainKHR::from_raw(0x600))
        })
    }
    .expect("create swapchain");
    let images = unsafe {
        f.layer.get_swapchain_images(f.device_a, swapchain, || {
            Ok(vec![vk::Image::from_raw(0x700), vk::Image::from_raw(0x701)])
        })
    }
    .expect("get swapchain images");

    let tracker = f.layer.tracker();
    let device_a_key = DispatchKey(DEVICE_A_TABLE as u64);
    assert_eq!(tracker.swapchain_image_count(device_a_key), 2);
    assert_eq!(tracker.object_count(DEV_A, ObjectType::Image), 0);

    let view = unsafe {
        f.layer
            .create_image_view(f.device_a, images[0], None, || Ok(vk::ImageView::from_raw(0x710)))
    };
    assert!(view.is_ok());
    assert!(f.sink.errors().is_empty());

    let called = Cell::new(false);
    unsafe { f.layer.destroy_swapchain(f.device_a, swapchain, None, || called.set(true)) };
    assert!(called.get());
    assert_eq!(tracker.swapchain_image_count(device_a_key), 0);

    let stale = unsafe {
        f.layer
            .create_image_view(f.device_a, images[1], None, || Ok(vk::ImageView::from_raw(0x711)))
    };
    assert_eq!(stale, Err(SKIPPED));
    assert_eq!(f.sink.count_code("VUID-VkImageViewCreateInfo-image-parameter"), 1);
}

#[test]
fn test_surface_shared_between_devices() {
    let f = setup();
    let surface = unsafe {
        f.layer
            .create_surface(f.instance, None, || Ok(vk::SurfaceKHR::from_raw(0x500)))
    }
    .expect("create surface");

    for (device, handle) in [(f.device_a, 0x600), (f.device_b, 0x601)] {
        let swapchain = unsafe {
            f.layer.create_swapchain(device, surface, vk::SwapchainKHR::null(), None, || {
                Ok(vk::SwapchainKHR::from_raw(handle))
            })
        };
        assert!(swapchain.is_ok());
    }
    assert!(f.sink.errors().is_empty());
    assert_eq!(f.layer.tracker().object_count(DEV_B, ObjectType::SwapchainKhr), 1);
}

#[test]
fn test_command_pool_ownership_and_cascade() {
    let mut f = setup();
    let pool_a = unsafe {
        f.layer
            .create_command_pool(f.device_a, None, || Ok(vk::CommandPool::from_raw(0x800)))
    }
    .expect("create pool A");
    let pool_b = unsafe {
        f.layer
            .create_command_pool(f.device_a, None, || Ok(vk::CommandPool::from_raw(0x801)))
    }
    .expect("create pool B");

    let cb0: vk::CommandBuffer = f.loader.dispatchable(DEVICE_A_TABLE);
    let cb1: vk::CommandBuffer = f.loader.dispatchable(DEVICE_A_TABLE);
    let cbs = unsafe {
        f.layer.allocate_command_buffers(f.device_a, pool_a, vk::CommandBufferLevel::PRIMARY, || {
            Ok(vec![cb0, cb1])
        })
    }
    .expect("allocate command buffers");
    assert_eq!(cbs.len(), 2);
    assert_eq!(f.layer.tracker().object_count(DEV_A, ObjectType::CommandBuffer), 2);

    // Freed through a pool it was not allocated from
    let called = Cell::new(false);
    unsafe { f.layer.free_command_buffers(f.device_a, pool_b, &[cb0], || called.set(true)) };
    assert!(!called.get());
    assert_eq!(f.sink.count_code(vuid::FREE_COMMAND_BUFFER_PARENT), 1);

    unsafe {
        f.layer.free_command_buffers(
            f.device_a,
            pool_a,
            &[cb0, vk::CommandBuffer::null()],
            || called.set(true),
        )
    };
    assert!(called.get());
    assert_eq!(f.layer.tracker().object_count(DEV_A, ObjectType::CommandBuffer), 1);

    unsafe { f.layer.destroy_command_pool(f.device_a, pool_a, None, || {}) };
    assert_eq!(f.layer.tracker().object_count(DEV_A, ObjectType::CommandBuffer), 0);
    assert_eq!(f.layer.tracker().object_count(DEV_A, ObjectType::CommandPool), 1);
}

#[test]
fn test_secondary_command_buffer_inheritance() {
    let mut f = setup();
    let pool = unsafe {
        f.layer
            .create_command_pool(f.device_a, None, || Ok(vk::CommandPool::from_raw(0x800)))
    }
    .expect("create pool");

    let primary: vk::CommandBuffer = f.loader.dispatchable(DEVICE_A_TABLE);
    let secondary: vk::CommandBuffer = f.loader.dispatchable(DEVICE_A_TABLE);
    unsafe {
        f.layer
            .allocate_command_buffers(f.device_a, pool, vk::CommandBufferLevel::PRIMARY, || Ok(vec![primary]))
            .expect("allocate primary");
        f.layer
            .allocate_command_buffers(f.device_a, pool, vk::CommandBufferLevel::SECONDARY, || {
                Ok(vec![secondary])
            })
            .expect("allocate secondary");
    }

    let inheritance = vk::CommandBufferInheritanceInfo::default().framebuffer(vk::Framebuffer::from_raw(0x900));

    // Inheritance info is ignored for primary command buffers
    let result = unsafe { f.layer.begin_command_buffer(primary, Some(&inheritance), || Ok(())) };
    assert_eq!(result, Ok(()));

    let result = unsafe { f.layer.begin_command_buffer(secondary, Some(&inheritance), || Ok(())) };
    assert_eq!(result, Err(SKIPPED));
    assert_eq!(f.sink.count_code("VUID-VkCommandBufferBeginInfo-flags-00055"), 1);
}

#[test]
fn test_descriptor_pool_reset_and_free() {
    let f = setup();
    let layout = unsafe {
        f.layer.create_device_child(
            f.device_a,
            ObjectType::DescriptorSetLayout,
            "VUID-vkCreateDescriptorSetLayout-device-parameter",
            None,
            || Ok(vk::DescriptorSetLayout::from_raw(0xa00)),
        )
    }
    .expect("create layout");
    let pool = unsafe {
        f.layer
            .create_descriptor_pool(f.device_a, None, || Ok(vk::DescriptorPool::from_raw(0xa10)))
    }
    .expect("create descriptor pool");

    let sets = unsafe {
        f.layer.allocate_descriptor_sets(f.device_a, pool, &[layout, layout], || {
            Ok(vec![vk::DescriptorSet::from_raw(0xa20), vk::DescriptorSet::from_raw(0xa21)])
        })
    }
    .expect("allocate descriptor sets");

    let freed = unsafe { f.layer.free_descriptor_sets(f.device_a, pool, &sets[..1], || Ok(())) };
    assert_eq!(freed, Ok(()));
    assert_eq!(f.layer.tracker().object_count(DEV_A, ObjectType::DescriptorSet), 1);

    let reset = unsafe { f.layer.reset_descriptor_pool(f.device_a, pool, || Ok(())) };
    assert_eq!(reset, Ok(()));
    assert_eq!(f.layer.tracker().object_count(DEV_A, ObjectType::DescriptorSet), 0);

    let stale = unsafe { f.layer.free_descriptor_sets(f.device_a, pool, &sets[1..], || Ok(())) };
    assert_eq!(stale, Err(SKIPPED));
    assert_eq!(f.sink.count_code(vuid::FREE_DESCRIPTOR_SET_INVALID), 1);
}

#[test]
fn test_descriptor_layout_from_other_device() {
    let f = setup();
    let foreign_layout = unsafe {
        f.layer.create_device_child(
            f.device_b,
            ObjectType::DescriptorSetLayout,
            "VUID-vkCreateDescriptorSetLayout-device-parameter",
            None,
            || Ok(vk::DescriptorSetLayout::from_raw(0xb00)),
        )
    }
    .expect("create layout");
    let pool = unsafe {
        f.layer
            .create_descriptor_pool(f.device_a, None, || Ok(vk::DescriptorPool::from_raw(0xa10)))
    }
    .expect("create descriptor pool");

    let called = Cell::new(false);
    let result = unsafe {
        f.layer.allocate_descriptor_sets(f.device_a, pool, &[foreign_layout], || {
            called.set(true);
            Ok(vec![vk::DescriptorSet::from_raw(0xa20)])
        })
    };
    assert_eq!(result, Err(SKIPPED));
    assert!(!called.get());
    assert_eq!(f.sink.count_code("VUID-VkDescriptorSetAllocateInfo-commonparent"), 1);
}

#[test]
fn test_queues_and_sparse_binding() {
    let mut f = setup();
    let graphics: vk::Queue = f.loader.dispatchable(DEVICE_A_TABLE);
    let sparse: vk::Queue = f.loader.dispatchable(DEVICE_A_TABLE);

    unsafe {
        assert_eq!(f.layer.get_device_queue(f.device_a, 0, || graphics), graphics);
        assert_eq!(f.layer.get_device_queue(f.device_a, 1, || sparse), sparse);
        // Fetching the same queue again does not register it twice
        f.layer.get_device_queue(f.device_a, 0, || graphics);
    }
    assert_eq!(f.layer.tracker().object_count(DEV_A, ObjectType::Queue), 2);

    let result = unsafe { f.layer.queue_bind_sparse(graphics, vk::Fence::null(), || Ok(())) };
    assert_eq!(result, Err(SKIPPED));
    assert_eq!(f.sink.count_code(vuid::QUEUE_BIND_SPARSE_QUEUE_TYPE), 1);

    let result = unsafe { f.layer.queue_bind_sparse(sparse, vk::Fence::null(), || Ok(())) };
    assert_eq!(result, Ok(()));
}

#[test]
fn test_queue_submit_rejects_foreign_command_buffer() {
    let mut f = setup();
    let queue: vk::Queue = f.loader.dispatchable(DEVICE_A_TABLE);
    unsafe { f.layer.get_device_queue(f.device_a, 0, || queue) };

    let pool_b = unsafe {
        f.layer
            .create_command_pool(f.device_b, None, || Ok(vk::CommandPool::from_raw(0x801)))
    }
    .expect("create pool");
    let foreign: vk::CommandBuffer = f.loader.dispatchable(DEVICE_B_TABLE);
    unsafe {
        f.layer
            .allocate_command_buffers(f.device_b, pool_b, vk::CommandBufferLevel::PRIMARY, || Ok(vec![foreign]))
    }
    .expect("allocate command buffer");

    let command_buffers = [foreign];
    let submits = [vk::SubmitInfo::default().command_buffers(&command_buffers)];
    let called = Cell::new(false);
    let result = unsafe {
        f.layer.queue_submit(queue, &submits, vk::Fence::null(), || {
            called.set(true);
            Ok(())
        })
    };

    assert_eq!(result, Err(SKIPPED));
    assert!(!called.get());
    assert_eq!(f.sink.count_code("VUID-VkSubmitInfo-commonparent"), 1);
}

#[test]
fn test_create_device_from_unknown_physical_device() {
    let mut f = setup();
    let unknown: vk::PhysicalDevice = f.loader.dispatchable(INSTANCE_TABLE);
    let device: vk::Device = f.loader.dispatchable(0x4000);

    let result = unsafe { f.layer.create_device(unknown, None, &[], || Ok(device)) };
    assert_eq!(result, Err(SKIPPED));
    assert_eq!(f.sink.count_code("VUID-vkCreateDevice-physicalDevice-parameter"), 1);
    assert_eq!(f.layer.tracker().directory().device_count(), 2);

    // The enumerated physical device is still accepted
    assert!(f.layer.tracker().is_tracked(INST, f.physical_device.as_raw(), ObjectType::PhysicalDevice));
}

#[test]
fn test_create_device_through_untracked_instance() {
    let mut f = setup();
    // Loader table 0x9000 belongs to an instance created before the layer
    let physical_device: vk::PhysicalDevice = f.loader.dispatchable(0x9000);
    let device: vk::Device = f.loader.dispatchable(0x4000);

    let result = unsafe { f.layer.create_device(physical_device, None, &[], || Ok(device)) };
    assert_eq!(result, Ok(device));
    assert_eq!(f.layer.tracker().directory().device_count(), 2);
    assert_eq!(f.layer.tracker().instance_of(DispatchKey(0x4000)), None);

    // Later calls on the untracked device pass straight through
    let fence = vk::Fence::from_raw(0xc00);
    let created = unsafe { f.layer.create_fence(device, None, || Ok(fence)) };
    assert_eq!(created, Ok(fence));
    let destroyed = Cell::new(false);
    unsafe { f.layer.destroy_fence(device, fence, None, || destroyed.set(true)) };
    assert!(destroyed.get());

    let device_destroyed = Cell::new(false);
    unsafe { f.layer.destroy_device(device, None, || device_destroyed.set(true)) };
    assert!(device_destroyed.get());
    assert!(f.sink.reports().is_empty());
}

#[test]
fn test_destroy_device_reports_leaks() {
    let f = setup();
    let fence = vk::Fence::from_raw(0xb00);
    unsafe { f.layer.create_fence(f.device_a, None, || Ok(fence)) }.expect("create fence");

    let called = Cell::new(false);
    unsafe { f.layer.destroy_device(f.device_a, None, || called.set(true)) };

    assert!(called.get());
    let leaks = f.sink.errors();
    assert_eq!(leaks.len(), 1);
    assert_eq!(leaks[0].code, "VUID-vkDestroyDevice-device-00378");
    assert_eq!(leaks[0].handle, fence.as_raw());

    let tracker = f.layer.tracker();
    assert_eq!(tracker.directory().device_count(), 1);
    assert!(!tracker.is_tracked(INST, f.device_a.as_raw(), ObjectType::Device));
    assert!(tracker.is_tracked(INST, f.device_b.as_raw(), ObjectType::Device));
}

#[test]
fn test_destroy_instance_reports_leaked_devices() {
    let f = setup();
    unsafe {
        f.layer
            .create_fence(f.device_b, None, || Ok(vk::Fence::from_raw(0xb00)))
            .expect("create fence");
        f.layer
            .create_surface(f.instance, None, || Ok(vk::SurfaceKHR::from_raw(0x500)))
            .expect("create surface");
    }

    let called = Cell::new(false);
    unsafe { f.layer.destroy_instance(f.instance, None, || called.set(true)) };

    assert!(called.get());
    assert_eq!(f.sink.count_code(vuid::OBJECT_LEAK), 2);
    // The fence owned by device B and the surface owned by the instance
    assert_eq!(f.sink.count_code("VUID-vkDestroyInstance-instance-00629"), 2);

    let directory = f.layer.tracker().directory();
    assert_eq!(directory.instance_count(), 0);
    assert_eq!(directory.device_count(), 0);
}

#[test]
fn test_null_handles_pass_through() {
    let f = setup();
    let calls = Cell::new(0);

    unsafe {
        f.layer
            .destroy_fence(f.device_a, vk::Fence::null(), None, || calls.set(calls.get() + 1));
        f.layer
            .destroy_device(vk::Device::null(), None, || calls.set(calls.get() + 1));
        f.layer
            .destroy_instance(vk::Instance::null(), None, || calls.set(calls.get() + 1));
    }

    assert_eq!(calls.get(), 3);
    assert!(f.sink.reports().is_empty());
}

#[test]
fn test_debug_report_callback_lifecycle() {
    let f = setup();
    let callback = unsafe {
        f.layer.create_debug_report_callback(f.instance, None, || {
            Ok(vk::DebugReportCallbackEXT::from_raw(0xc00))
        })
    }
    .expect("create callback");
    assert_eq!(f.layer.tracker().object_count(INST, ObjectType::DebugReportCallbackExt), 1);

    let called = Cell::new(false);
    unsafe {
        f.layer
            .destroy_debug_report_callback(f.instance, callback, None, || called.set(true))
    };
    assert!(called.get());
    assert_eq!(f.layer.tracker().object_count(INST, ObjectType::DebugReportCallbackExt), 0);
}

#[test]
fn test_layer_keeps_config() {
    let layer = ObjectTrackerLayer::new(TrackerConfig::default());
    assert!(layer.config().report.skip_on_error);
    assert_eq!(layer.tracker().directory().instance_count(), 0);
}
