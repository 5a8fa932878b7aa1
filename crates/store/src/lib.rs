//! larder-store: in-memory storage collaborator for tests and dev.

pub mod memory;

pub use memory::InMemoryStore;
