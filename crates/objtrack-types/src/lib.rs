pub mod object_type;
pub mod status;
pub mod vuid;

pub use object_type::ObjectType;
pub use status::ObjectStatus;
