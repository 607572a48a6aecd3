use std::path::PathBuf;
use std::sync::Arc;

use wikivid_core::{ArtifactStore, Error, Result};

pub mod backends;

pub use backends::*;

/// Where rendered videos are kept.
#[derive(Debug, Clone)]
pub enum StoreConfig {
    Filesystem { root: PathBuf },
    Memory,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::Filesystem {
            root: PathBuf::from("videos"),
        }
    }
}

pub fn create_store(config: &StoreConfig) -> Result<Arc<dyn ArtifactStore>> {
    match config {
        StoreConfig::Filesystem { root } => {
            if root.as_os_str().is_empty() {
                return Err(Error::Storage("videos directory must not be empty".to_string()));
            }
            Ok(Arc::new(FsArtifactStore::new(root.clone())))
        }
        StoreConfig::Memory => Ok(Arc::new(MemoryArtifactStore::new())),
    }
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::{create_store, StoreConfig};
}
