//! In-memory persistence.
//!
//! Arena-style store keyed by id, used by tests and by `STORAGE=memory`
//! deployments where durability across restarts is not needed.

pub mod memory_store;

pub use memory_store::{MemoryPersistence, MemoryUnitOfWork};
