//! Storage backends for the short.est index.

pub mod memory;

pub use memory::InMemoryRepository;
pub use shortest_core::repository::{ReadRepository, Repository};
