//! Local-filesystem store adapter.
//!
//! Keys map to files under a root directory; a key may contain `/`
//! separators, in which case parent directories are created on demand.
//!
//! Writes follow the write-to-temp, fsync, rename pattern so that a writer
//! crashing mid-write never leaves a partial object behind. The rename
//! replaces any existing object, matching the overwrite semantics the
//! [`ObjectStore`](super::ObjectStore) contract requires.

use super::ObjectStore;
use crate::error::StoreError;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Filesystem-backed object store rooted at a directory.
#[derive(Debug, Clone)]
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    /// Create an adapter rooted at `root`. The directory itself is created
    /// lazily on the first write.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// The absolute path an object key maps to.
    pub fn object_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl ObjectStore for FsObjectStore {
    fn exists(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.object_path(key).exists())
    }

    fn create(&self, key: &str, content: &str) -> Result<(), StoreError> {
        let path = self.object_path(key);

        if let Some(parent) = path.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let temp_path = temp_path_for(&path)?;
        write_and_sync(&temp_path, content.as_bytes())?;

        // Atomic on POSIX when temp and target share a filesystem, which
        // they do since the temp file lives next to the target.
        fs::rename(&temp_path, &path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            StoreError::Io(e)
        })
    }

    fn read(&self, key: &str) -> Result<String, StoreError> {
        fs::read_to_string(self.object_path(key)).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                StoreError::NotFound(key.to_string())
            } else {
                StoreError::Io(e)
            }
        })
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        fs::remove_file(self.object_path(key)).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                StoreError::NotFound(key.to_string())
            } else {
                StoreError::Io(e)
            }
        })
    }
}

/// Temp file path in the same directory as the target: `.{filename}.tmp`.
fn temp_path_for(target: &Path) -> Result<PathBuf, StoreError> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| StoreError::Backend(format!("invalid object path '{}'", target.display())))?;

    Ok(parent.join(format!(".{}.tmp", filename)))
}

fn write_and_sync(path: &Path, content: &[u8]) -> Result<(), StoreError> {
    let mut file = File::create(path)?;

    file.write_all(content).map_err(|e| {
        let _ = fs::remove_file(path);
        StoreError::Io(e)
    })?;

    file.sync_all().map_err(|e| {
        let _ = fs::remove_file(path);
        StoreError::Io(e)
    })?;

    Ok(())
}
