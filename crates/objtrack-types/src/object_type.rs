use ash::vk;

/// The closed set of Vulkan object kinds the tracker knows about.
///
/// The discriminant doubles as an index into per-type tables, so the order
/// here is also the order of [`ObjectType::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u32)]
pub enum ObjectType {
    Unknown,
    Buffer,
    Image,
    Instance,
    PhysicalDevice,
    Device,
    Semaphore,
    Queue,
    CommandBuffer,
    Fence,
    DeviceMemory,
    Event,
    QueryPool,
    BufferView,
    ImageView,
    ShaderModule,
    PipelineCache,
    PipelineLayout,
    RenderPass,
    Pipeline,
    DescriptorSetLayout,
    Sampler,
    DescriptorPool,
    DescriptorSet,
    Framebuffer,
    CommandPool,
    SamplerYcbcrConversion,
    DescriptorUpdateTemplate,
    SurfaceKhr,
    SwapchainKhr,
    DisplayKhr,
    DisplayModeKhr,
    DebugReportCallbackExt,
    DebugUtilsMessengerExt,
    ValidationCacheExt,
}

impl ObjectType {
    pub const COUNT: usize = 35;

    pub const ALL: [ObjectType; Self::COUNT] = [
        ObjectType::Unknown,
        ObjectType::Buffer,
        ObjectType::Image,
        ObjectType::Instance,
        ObjectType::PhysicalDevice,
        ObjectType::Device,
        ObjectType::Semaphore,
        ObjectType::Queue,
        ObjectType::CommandBuffer,
        ObjectType::Fence,
        ObjectType::DeviceMemory,
        ObjectType::Event,
        ObjectType::QueryPool,
        ObjectType::BufferView,
        ObjectType::ImageView,
        ObjectType::ShaderModule,
        ObjectType::PipelineCache,
        ObjectType::PipelineLayout,
        ObjectType::RenderPass,
        ObjectType::Pipeline,
        ObjectType::DescriptorSetLayout,
        ObjectType::Sampler,
        ObjectType::DescriptorPool,
        ObjectType::DescriptorSet,
        ObjectType::Framebuffer,
        ObjectType::CommandPool,
        ObjectType::SamplerYcbcrConversion,
        ObjectType::DescriptorUpdateTemplate,
        ObjectType::SurfaceKhr,
        ObjectType::SwapchainKhr,
        ObjectType::DisplayKhr,
        ObjectType::DisplayModeKhr,
        ObjectType::DebugReportCallbackExt,
        ObjectType::DebugUtilsMessengerExt,
        ObjectType::ValidationCacheExt,
    ];

    /// Object kinds owned by a logical device that the application must
    /// destroy before destroying the device. Queues are retrieved, not
    /// created, and are torn down separately.
    pub const DEVICE_CHILDREN: [ObjectType; 25] = [
        ObjectType::CommandBuffer,
        ObjectType::Semaphore,
        ObjectType::Fence,
        ObjectType::DeviceMemory,
        ObjectType::Buffer,
        ObjectType::Event,
        ObjectType::QueryPool,
        ObjectType::BufferView,
        ObjectType::Image,
        ObjectType::ImageView,
        ObjectType::ShaderModule,
        ObjectType::PipelineCache,
        ObjectType::PipelineLayout,
        ObjectType::RenderPass,
        ObjectType::Pipeline,
        ObjectType::DescriptorSetLayout,
        ObjectType::Sampler,
        ObjectType::DescriptorPool,
        ObjectType::DescriptorSet,
        ObjectType::Framebuffer,
        ObjectType::CommandPool,
        ObjectType::SamplerYcbcrConversion,
        ObjectType::DescriptorUpdateTemplate,
        ObjectType::SwapchainKhr,
        ObjectType::ValidationCacheExt,
    ];

    /// Instance-owned kinds with an explicit destroy call. Physical devices
    /// and displays are enumerated, so they never count as leaks.
    pub const INSTANCE_CHILDREN: [ObjectType; 3] = [
        ObjectType::SurfaceKhr,
        ObjectType::DebugReportCallbackExt,
        ObjectType::DebugUtilsMessengerExt,
    ];

    /// Index into per-type tables.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Human-readable name used in diagnostic messages.
    pub const fn name(self) -> &'static str {
        match self {
            ObjectType::Unknown => "Unknown",
            ObjectType::Buffer => "Buffer",
            ObjectType::Image => "Image",
            ObjectType::Instance => "Instance",
            ObjectType::PhysicalDevice => "PhysicalDevice",
            ObjectType::Device => "Device",
            ObjectType::Semaphore => "Semaphore",
            ObjectType::Queue => "Queue",
            ObjectType::CommandBuffer => "CommandBuffer",
            ObjectType::Fence => "Fence",
            ObjectType::DeviceMemory => "DeviceMemory",
            ObjectType::Event => "Event",
            ObjectType::QueryPool => "QueryPool",
            ObjectType::BufferView => "BufferView",
            ObjectType::ImageView => "ImageView",
            ObjectType::ShaderModule => "ShaderModule",
            ObjectType::PipelineCache => "PipelineCache",
            ObjectType::PipelineLayout => "PipelineLayout",
            ObjectType::RenderPass => "RenderPass",
            ObjectType::Pipeline => "Pipeline",
            ObjectType::DescriptorSetLayout => "DescriptorSetLayout",
            ObjectType::Sampler => "Sampler",
            ObjectType::DescriptorPool => "DescriptorPool",
            ObjectType::DescriptorSet => "DescriptorSet",
            ObjectType::Framebuffer => "Framebuffer",
            ObjectType::CommandPool => "CommandPool",
            ObjectType::SamplerYcbcrConversion => "SamplerYcbcrConversion",
            ObjectType::DescriptorUpdateTemplate => "DescriptorUpdateTemplate",
            ObjectType::SurfaceKhr => "SurfaceKHR",
            ObjectType::SwapchainKhr => "SwapchainKHR",
            ObjectType::DisplayKhr => "DisplayKHR",
            ObjectType::DisplayModeKhr => "DisplayModeKHR",
            ObjectType::DebugReportCallbackExt => "DebugReportCallbackEXT",
            ObjectType::DebugUtilsMessengerExt => "DebugUtilsMessengerEXT",
            ObjectType::ValidationCacheExt => "ValidationCacheEXT",
        }
    }

    /// The `VK_EXT_debug_report` object type code for this kind.
    pub fn debug_report_type(self) -> vk::DebugReportObjectTypeEXT {
        use vk::DebugReportObjectTypeEXT as D;
        match self {
            ObjectType::Unknown => D::UNKNOWN,
            ObjectType::Buffer => D::BUFFER,
            ObjectType::Image => D::IMAGE,
            ObjectType::Instance => D::INSTANCE,
            ObjectType::PhysicalDevice => D::PHYSICAL_DEVICE,
            ObjectType::Device => D::DEVICE,
            ObjectType::Semaphore => D::SEMAPHORE,
            ObjectType::Queue => D::QUEUE,
            ObjectType::CommandBuffer => D::COMMAND_BUFFER,
            ObjectType::Fence => D::FENCE,
            ObjectType::DeviceMemory => D::DEVICE_MEMORY,
            ObjectType::Event => D::EVENT,
            ObjectType::QueryPool => D::QUERY_POOL,
            ObjectType::BufferView => D::BUFFER_VIEW,
            ObjectType::ImageView => D::IMAGE_VIEW,
            ObjectType::ShaderModule => D::SHADER_MODULE,
            ObjectType::PipelineCache => D::PIPELINE_CACHE,
            ObjectType::PipelineLayout => D::PIPELINE_LAYOUT,
            ObjectType::RenderPass => D::RENDER_PASS,
            ObjectType::Pipeline => D::PIPELINE,
            ObjectType::DescriptorSetLayout => D::DESCRIPTOR_SET_LAYOUT,
            ObjectType::Sampler => D::SAMPLER,
            ObjectType::DescriptorPool => D::DESCRIPTOR_POOL,
            ObjectType::DescriptorSet => D::DESCRIPTOR_SET,
            ObjectType::Framebuffer => D::FRAMEBUFFER,
            ObjectType::CommandPool => D::COMMAND_POOL,
            ObjectType::SamplerYcbcrConversion => D::SAMPLER_YCBCR_CONVERSION,
            ObjectType::DescriptorUpdateTemplate => D::DESCRIPTOR_UPDATE_TEMPLATE,
            ObjectType::SurfaceKhr => D::SURFACE_KHR,
            ObjectType::SwapchainKhr => D::SWAPCHAIN_KHR,
            ObjectType::DisplayKhr => D::DISPLAY_KHR,
            ObjectType::DisplayModeKhr => D::DISPLAY_MODE_KHR,
            ObjectType::DebugReportCallbackExt => D::DEBUG_REPORT_CALLBACK_EXT,
            // debug_report predates debug_utils and has no code for it
            ObjectType::DebugUtilsMessengerExt => D::UNKNOWN,
            ObjectType::ValidationCacheExt => D::VALIDATION_CACHE_EXT,
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
