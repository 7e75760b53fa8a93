pub mod memory;
pub mod types;

pub use memory::InMemoryRepository;
pub use types::{IdentifierPlugin, IdentifierPluginResolver, ObjectRepository, TenantRepository};
