//! Per-request scratch space for intermediate audio and video files.
//!
//! Every pipeline run owns one [`ScratchSpace`]. Its directory name embeds a
//! fresh request id, so concurrent runs never share intermediate files, and the
//! directory is removed when the value is dropped whether the run succeeded or
//! not.

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use uuid::Uuid;

use crate::{Error, Result};

pub struct ScratchSpace {
    id: Uuid,
    dir: TempDir,
}

impl ScratchSpace {
    /// Create a scratch directory under the system temp dir, or under `root`
    /// when one is given.
    pub fn new(root: Option<&Path>) -> Result<Self> {
        Self::with_id(Uuid::new_v4(), root)
    }

    pub fn with_id(id: Uuid, root: Option<&Path>) -> Result<Self> {
        let prefix = format!("wikivid-{}-", id);
        let mut builder = tempfile::Builder::new();
        builder.prefix(&prefix);

        let dir = match root {
            Some(root) => {
                std::fs::create_dir_all(root)?;
                builder.tempdir_in(root)
            }
            None => builder.tempdir(),
        }
        .map_err(|e| Error::Storage(format!("failed to create scratch dir: {}", e)))?;

        Ok(Self { id, dir })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path for a named file inside the scratch directory.
    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

impl std::fmt::Debug for ScratchSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScratchSpace")
            .field("id", &self.id)
            .field("path", &self.dir.path())
            .finish()
    }
}
