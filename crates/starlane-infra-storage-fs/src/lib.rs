mod fs_storage;
mod memory;

pub use fs_storage::FsStorage;
pub use memory::MemoryStorage;
