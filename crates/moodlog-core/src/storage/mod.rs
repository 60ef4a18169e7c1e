//! Persistence backends for the record document.

pub mod json_file;
pub mod memory;
pub mod traits;

pub use json_file::JsonFileStorage;
pub use memory::MemoryStorage;
pub use traits::RecordStorage;
