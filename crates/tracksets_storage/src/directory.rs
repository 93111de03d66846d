//! Directory-based shard backend for persistent storage.
//!
//! Layout:
//!
//! ```text
//! <shard_dir>/
//! ├─ LOCK                # Advisory lock held by the writer
//! ├─ trackset_0.bin
//! ├─ trackset_1.bin
//! └─ ...
//! ```

use crate::backend::{contiguous_count, ShardBackend, ShardIndex};
use crate::error::{StorageError, StorageResult};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

const LOCK_FILE: &str = "LOCK";
const SHARD_PREFIX: &str = "trackset_";
const SHARD_SUFFIX: &str = ".bin";
const TEMP_SUFFIX: &str = ".tmp";

/// A shard backend storing one file per shard in a directory.
///
/// # Durability
///
/// Shards are written with the write-then-rename pattern:
/// 1. Write to `trackset_<n>.bin.tmp`
/// 2. Sync the temporary file
/// 3. Rename over `trackset_<n>.bin`
/// 4. Sync the directory
///
/// # Example
///
/// ```no_run
/// use tracksets_storage::{DirectoryBackend, ShardBackend};
/// use std::path::Path;
///
/// let mut backend = DirectoryBackend::open_for_write(Path::new("data/tracksets")).unwrap();
/// backend.write_shard(0, b"payload").unwrap();
/// ```
#[derive(Debug)]
pub struct DirectoryBackend {
    path: PathBuf,
    /// Held for the lifetime of a writer.
    _lock_file: Option<File>,
}

impl DirectoryBackend {
    /// Opens an existing shard directory for reading.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotADirectory`] if `path` is not a directory.
    pub fn open(path: &Path) -> StorageResult<Self> {
        if !path.is_dir() {
            return Err(StorageError::NotADirectory(path.display().to_string()));
        }

        Ok(Self {
            path: path.to_path_buf(),
            _lock_file: None,
        })
    }

    /// Opens or creates a shard directory and takes the writer lock.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Locked`] if another writer holds the lock,
    /// or an I/O error if the directory cannot be created.
    pub fn open_for_write(path: &Path) -> StorageResult<Self> {
        fs::create_dir_all(path)?;
        if !path.is_dir() {
            return Err(StorageError::NotADirectory(path.display().to_string()));
        }

        let lock_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path.join(LOCK_FILE))?;

        if lock_file.try_lock_exclusive().is_err() {
            return Err(StorageError::Locked);
        }

        Ok(Self {
            path: path.to_path_buf(),
            _lock_file: Some(lock_file),
        })
    }

    /// Returns the shard directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the path of shard `index`.
    #[must_use]
    pub fn shard_path(&self, index: ShardIndex) -> PathBuf {
        self.path.join(shard_file_name(index))
    }

    fn shard_indices(&self) -> StorageResult<Vec<ShardIndex>> {
        let mut indices = Vec::new();
        for entry in fs::read_dir(&self.path)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(index) = entry.file_name().to_str().and_then(parse_shard_file_name) {
                indices.push(index);
            }
        }
        Ok(indices)
    }

    #[cfg(unix)]
    fn sync_directory(&self) -> StorageResult<()> {
        File::open(&self.path)?.sync_all()?;
        Ok(())
    }

    #[cfg(not(unix))]
    fn sync_directory(&self) -> StorageResult<()> {
        // NTFS journals metadata; directory handles cannot be fsynced.
        Ok(())
    }
}

impl ShardBackend for DirectoryBackend {
    fn write_shard(&mut self, index: ShardIndex, data: &[u8]) -> StorageResult<()> {
        let final_path = self.shard_path(index);
        let temp_path = self
            .path
            .join(format!("{}{TEMP_SUFFIX}", shard_file_name(index)));

        let mut file = File::create(&temp_path)?;
        if let Err(e) = file.write_all(data).and_then(|()| file.sync_all()) {
            drop(file);
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }
        drop(file);

        fs::rename(&temp_path, &final_path)?;
        self.sync_directory()
    }

    fn read_shard(&self, index: ShardIndex) -> StorageResult<Vec<u8>> {
        match fs::read(self.shard_path(index)) {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StorageError::ShardNotFound { index }),
            Err(e) => Err(e.into()),
        }
    }

    fn shard_count(&self) -> StorageResult<ShardIndex> {
        contiguous_count(self.shard_indices()?)
    }

    fn clear(&mut self) -> StorageResult<usize> {
        let indices = self.shard_indices()?;
        for &index in &indices {
            fs::remove_file(self.shard_path(index))?;
        }
        if !indices.is_empty() {
            self.sync_directory()?;
        }
        Ok(indices.len())
    }
}

fn shard_file_name(index: ShardIndex) -> String {
    format!("{SHARD_PREFIX}{index}{SHARD_SUFFIX}")
}

fn parse_shard_file_name(name: &str) -> Option<ShardIndex> {
    name.strip_prefix(SHARD_PREFIX)?
        .strip_suffix(SHARD_SUFFIX)?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn open_for_write_creates_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tracksets");

        let backend = DirectoryBackend::open_for_write(&path).unwrap();
        assert!(path.is_dir());
        assert_eq!(backend.shard_count().unwrap(), 0);
    }

    #[test]
    fn open_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let result = DirectoryBackend::open(&dir.path().join("nope"));
        assert!(matches!(result, Err(StorageError::NotADirectory(_))));
    }

    #[test]
    fn write_and_read_shards() {
        let dir = tempdir().unwrap();
        let mut backend = DirectoryBackend::open_for_write(dir.path()).unwrap();

        backend.write_shard(0, b"zero").unwrap();
        backend.write_shard(1, b"one").unwrap();

        assert!(dir.path().join("trackset_0.bin").exists());
        assert!(dir.path().join("trackset_1.bin").exists());
        assert!(!dir.path().join("trackset_0.bin.tmp").exists());

        let reader = DirectoryBackend::open(dir.path()).unwrap();
        assert_eq!(reader.shard_count().unwrap(), 2);
        assert_eq!(reader.read_shard(0).unwrap(), b"zero");
        assert_eq!(reader.read_shard(1).unwrap(), b"one");
    }

    #[test]
    fn unrelated_files_are_ignored() {
        let dir = tempdir().unwrap();
        let mut backend = DirectoryBackend::open_for_write(dir.path()).unwrap();
        backend.write_shard(0, b"zero").unwrap();

        fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        fs::write(dir.path().join("trackset_1.bin.tmp"), b"partial").unwrap();
        fs::write(dir.path().join("trackset_x.bin"), b"x").unwrap();

        assert_eq!(backend.shard_count().unwrap(), 1);
    }

    #[test]
    fn gap_in_directory_is_reported() {
        let dir = tempdir().unwrap();
        let mut backend = DirectoryBackend::open_for_write(dir.path()).unwrap();
        backend.write_shard(0, b"zero").unwrap();
        backend.write_shard(2, b"two").unwrap();

        assert!(matches!(
            backend.shard_count(),
            Err(StorageError::MissingShard {
                found: 2,
                missing: 1
            })
        ));
    }

    #[test]
    fn read_missing_shard() {
        let dir = tempdir().unwrap();
        let backend = DirectoryBackend::open_for_write(dir.path()).unwrap();
        assert!(matches!(
            backend.read_shard(7),
            Err(StorageError::ShardNotFound { index: 7 })
        ));
    }

    #[test]
    fn clear_removes_only_shards() {
        let dir = tempdir().unwrap();
        let mut backend = DirectoryBackend::open_for_write(dir.path()).unwrap();
        backend.write_shard(0, b"zero").unwrap();
        backend.write_shard(1, b"one").unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();

        assert_eq!(backend.clear().unwrap(), 2);
        assert_eq!(backend.shard_count().unwrap(), 0);
        assert!(dir.path().join("notes.txt").exists());
    }

    #[test]
    fn second_writer_is_locked_out() {
        let dir = tempdir().unwrap();
        let _writer = DirectoryBackend::open_for_write(dir.path()).unwrap();

        let result = DirectoryBackend::open_for_write(dir.path());
        assert!(matches!(result, Err(StorageError::Locked)));
    }

    #[test]
    fn parse_file_names() {
        assert_eq!(parse_shard_file_name("trackset_0.bin"), Some(0));
        assert_eq!(parse_shard_file_name("trackset_42.bin"), Some(42));
        assert_eq!(parse_shard_file_name("trackset_42.bin.tmp"), None);
        assert_eq!(parse_shard_file_name("LOCK"), None);
    }
}
