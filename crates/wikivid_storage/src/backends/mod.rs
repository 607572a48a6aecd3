pub mod fs;
pub mod memory;

pub use fs::FsArtifactStore;
pub use memory::MemoryArtifactStore;
