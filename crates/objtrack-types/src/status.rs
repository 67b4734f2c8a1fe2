use bitflags::bitflags;

bitflags! {
    /// Per-object status bits kept alongside each tracked handle.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ObjectStatus: u32 {
        /// Command buffer was allocated at `VK_COMMAND_BUFFER_LEVEL_SECONDARY`.
        const COMMAND_BUFFER_SECONDARY = 0x0000_0040;
        /// Object was created with application-supplied allocation callbacks.
        const CUSTOM_ALLOCATOR = 0x0000_0080;
    }
}

impl ObjectStatus {
    pub const NONE: Self = Self::empty();

    pub fn from_allocator(custom_allocator: bool) -> Self {
        if custom_allocator {
            Self::CUSTOM_ALLOCATOR
        } else {
            Self::NONE
        }
    }
}
