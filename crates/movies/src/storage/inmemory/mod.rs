//! In-memory storage backend, used by tests and by `--store memory`.

mod store;

pub use store::MemoryStore;
