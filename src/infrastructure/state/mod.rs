//! Build state persistence

mod lock;
mod memory;
mod toml_store;

pub use lock::StateLock;
pub use memory::MemoryStateStore;
pub use toml_store::{record_file_name, TomlStateStore};
