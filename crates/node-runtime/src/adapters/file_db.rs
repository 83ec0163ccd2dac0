//! Filesystem-backed [`StateDatabase`].
//!
//! One file per key, named by the key's hex. Writes go to a temporary file
//! first and are renamed into place, so a crash leaves either the old or the
//! new snapshot.

use dp_01_state_store::{StateDatabase, StateError};
use fs2::{available_space, total_space};
use shared_types::Hash;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub struct FileStateDb {
    dir: PathBuf,
    min_disk_space_percent: u8,
}

impl FileStateDb {
    /// Open `dir`, creating it if missing.
    pub fn open(dir: impl Into<PathBuf>, min_disk_space_percent: u8) -> Result<Self, StateError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| io_error(&dir, e))?;
        Ok(Self {
            dir,
            min_disk_space_percent,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Free space on the data volume as a percentage of its size.
    pub fn available_disk_space_percent(&self) -> Result<u8, StateError> {
        let available = available_space(&self.dir).map_err(|e| io_error(&self.dir, e))?;
        let total = total_space(&self.dir).map_err(|e| io_error(&self.dir, e))?;

        if total == 0 {
            return Err(StateError::DatabaseError(
                "Unable to determine disk space".to_string(),
            ));
        }
        Ok(((available as f64 / total as f64) * 100.0) as u8)
    }

    fn path(&self, key: &Hash) -> PathBuf {
        self.dir.join(format!("{}.bin", hex::encode(key)))
    }

    fn check_disk_space(&self) -> Result<(), StateError> {
        if self.min_disk_space_percent == 0 {
            return Ok(());
        }
        let percent = self.available_disk_space_percent()?;
        if percent < self.min_disk_space_percent {
            return Err(StateError::DatabaseError(format!(
                "Disk space below {}% ({}% free)",
                self.min_disk_space_percent, percent
            )));
        }
        Ok(())
    }
}

impl StateDatabase for FileStateDb {
    fn get(&self, key: &Hash) -> Result<Option<Vec<u8>>, StateError> {
        let path = self.path(key);
        match fs::read(&path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(&path, e)),
        }
    }

    fn put(&self, key: Hash, data: Vec<u8>) -> Result<(), StateError> {
        self.check_disk_space()?;

        let path = self.path(&key);
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, &data).map_err(|e| io_error(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| io_error(&path, e))?;

        tracing::debug!("[node] Wrote {} bytes to {:?}", data.len(), path);
        Ok(())
    }

    fn delete(&self, key: &Hash) -> Result<(), StateError> {
        let path = self.path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(&path, e)),
        }
    }
}

fn io_error(path: &Path, e: std::io::Error) -> StateError {
    StateError::DatabaseError(format!("{}: {}", path.display(), e))
}
