//! Business logic services for the application layer.

pub mod code_allocator;
pub mod link_service;
pub mod resolver;

pub use code_allocator::{AllocationPolicy, CodeAllocator, CodeGenerator, RandomCodeGenerator};
pub use link_service::LinkService;
pub use resolver::Resolver;
