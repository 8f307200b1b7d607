//! Key-value store adapters.
//!
//! [`InMemoryKeyValueStore`] backs tests and throwaway deployments;
//! [`DirectoryKeyValueStore`] keeps client state across restarts.

mod directory;
mod memory;

pub use directory::DirectoryKeyValueStore;
pub use memory::InMemoryKeyValueStore;
