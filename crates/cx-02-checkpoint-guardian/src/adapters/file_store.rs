//! File-backed checkpoint store.
//!
//! One state file and one metadata file per step under a directory the
//! owning guardian exclusively controls. Every write goes to a temp file,
//! is synced, then renamed into place; the metadata file is renamed last,
//! so a checkpoint only becomes visible once its state is fully on disk.

use crate::domain::CheckpointMetadata;
use crate::error::StoreError;
use crate::ports::outbound::CheckpointStore;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Durable [`CheckpointStore`] persisting under a checkpoint directory.
pub struct FileCheckpointStore {
    dir: PathBuf,
}

impl FileCheckpointStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| StoreError::Io {
            message: format!("creating {}: {e}", dir.display()),
        })?;
        Ok(Self { dir })
    }

    fn state_path(&self, step: u64) -> PathBuf {
        self.dir.join(format!("step-{step:010}.state.json"))
    }

    fn meta_path(&self, step: u64) -> PathBuf {
        self.dir.join(format!("step-{step:010}.meta.json"))
    }

    fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
        let temp_path = path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path).map_err(|e| StoreError::Io {
            message: format!("creating {}: {e}", temp_path.display()),
        })?;
        file.write_all(bytes).map_err(|e| StoreError::Io {
            message: format!("writing {}: {e}", temp_path.display()),
        })?;
        file.sync_all().map_err(|e| StoreError::Io {
            message: format!("syncing {}: {e}", temp_path.display()),
        })?;
        fs::rename(&temp_path, path).map_err(|e| StoreError::Io {
            message: format!("renaming into {}: {e}", path.display()),
        })?;
        Ok(())
    }

    fn read_optional(path: &Path) -> Result<Option<Vec<u8>>, StoreError> {
        match fs::read(path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io {
                message: format!("reading {}: {e}", path.display()),
            }),
        }
    }

    fn step_from_meta_filename(name: &str) -> Option<u64> {
        name.strip_prefix("step-")?
            .strip_suffix(".meta.json")?
            .parse()
            .ok()
    }
}

impl CheckpointStore for FileCheckpointStore {
    fn put(
        &self,
        step: u64,
        state_bytes: &[u8],
        metadata: &CheckpointMetadata,
    ) -> Result<(), StoreError> {
        let meta_bytes = serde_json::to_vec_pretty(metadata).map_err(|e| StoreError::Io {
            message: format!("encoding metadata for step {step}: {e}"),
        })?;
        Self::write_atomic(&self.state_path(step), state_bytes)?;
        Self::write_atomic(&self.meta_path(step), &meta_bytes)
    }

    fn state(&self, step: u64) -> Result<Option<Vec<u8>>, StoreError> {
        Self::read_optional(&self.state_path(step))
    }

    fn metadata(&self, step: u64) -> Result<Option<CheckpointMetadata>, StoreError> {
        match Self::read_optional(&self.meta_path(step))? {
            None => Ok(None),
            Some(bytes) => serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|e| StoreError::Corrupt {
                    step,
                    reason: e.to_string(),
                }),
        }
    }

    fn list_metadata(&self) -> Result<Vec<CheckpointMetadata>, StoreError> {
        let entries = fs::read_dir(&self.dir).map_err(|e| StoreError::Io {
            message: format!("listing {}: {e}", self.dir.display()),
        })?;

        let mut result = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::Io {
                message: e.to_string(),
            })?;
            let name = entry.file_name();
            let Some(step) = Self::step_from_meta_filename(&name.to_string_lossy()) else {
                continue;
            };
            if let Some(metadata) = self.metadata(step)? {
                result.push(metadata);
            }
        }
        Ok(result)
    }

    fn contains(&self, step: u64) -> Result<bool, StoreError> {
        Ok(self.meta_path(step).exists())
    }
}
