//! Concrete adapters for checkpoint persistence.

pub mod file_store;
pub mod memory_store;

pub use file_store::FileCheckpointStore;
pub use memory_store::InMemoryCheckpointStore;
