//! Atomic TOML documents.
//!
//! Writes go through a per-writer temporary file, are fsynced and renamed
//! over the target. Read-modify-write cycles hold an exclusive lock on a
//! sibling lock file that is never removed, so every writer locks the
//! same inode.

use carter_core::CarterError;
use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

/// Errors that can occur during atomic TOML operations.
#[derive(Debug, Error)]
pub enum AtomicTomlError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("TOML serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Lock error: {0}")]
    Lock(String),
}

impl From<AtomicTomlError> for CarterError {
    fn from(err: AtomicTomlError) -> Self {
        match err {
            AtomicTomlError::Io(e) => e.into(),
            AtomicTomlError::Parse(e) => e.into(),
            AtomicTomlError::Serialize(e) => e.into(),
            AtomicTomlError::Lock(message) => CarterError::data_access(message),
        }
    }
}

/// Handle to a TOML file holding one document of type `T`.
#[derive(Debug, Clone)]
pub struct AtomicTomlFile<T> {
    path: PathBuf,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> AtomicTomlFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and deserializes the document.
    ///
    /// Returns `Ok(None)` when the file is missing or blank.
    pub fn load(&self) -> Result<Option<T>, AtomicTomlError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(toml::from_str(&content)?))
    }

    /// Serializes `data` and atomically replaces the file.
    pub fn save(&self, data: &T) -> Result<(), AtomicTomlError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(data)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(toml_string.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Runs `f` against the current document under an exclusive lock.
    ///
    /// `default_value` stands in for a missing file. The document is written
    /// back only when `f` succeeds; its return value is passed through.
    pub fn update<R, E, F>(&self, default_value: T, f: F) -> Result<R, E>
    where
        F: FnOnce(&mut T) -> Result<R, E>,
        E: From<AtomicTomlError>,
    {
        let _lock = FileLock::acquire(&self.path)?;

        let mut data = self.load()?.unwrap_or(default_value);
        let output = f(&mut data)?;
        self.save(&data)?;

        Ok(output)
    }

    fn temp_path(&self) -> Result<PathBuf, AtomicTomlError> {
        let invalid = |msg: &str| {
            AtomicTomlError::Io(std::io::Error::new(std::io::ErrorKind::InvalidInput, msg.to_string()))
        };
        let parent = self
            .path
            .parent()
            .ok_or_else(|| invalid("Path has no parent directory"))?;
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| invalid("Path has no file name"))?;

        static NEXT_WRITER: AtomicU64 = AtomicU64::new(0);
        let writer = NEXT_WRITER.fetch_add(1, Ordering::Relaxed);

        Ok(parent.join(format!(
            ".{}.{}.{}.tmp",
            file_name.to_string_lossy(),
            std::process::id(),
            writer
        )))
    }
}

/// Exclusive lock on `<file>.lock`, released on drop.
///
/// The lock file itself stays on disk.
struct FileLock {
    file: File,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self, AtomicTomlError> {
        let lock_path = path.with_extension("lock");
        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        use fs2::FileExt;
        file.lock_exclusive()
            .map_err(|e| AtomicTomlError::Lock(format!("Failed to acquire lock: {}", e)))?;

        Ok(FileLock { file })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs2::FileExt::unlock(&self.file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    struct Counter {
        name: String,
        count: u32,
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Counter>::new(temp_dir.path().join("counter.toml"));

        let counter = Counter {
            name: "visits".to_string(),
            count: 42,
        };
        file.save(&counter).unwrap();

        assert_eq!(file.load().unwrap(), Some(counter));
    }

    #[test]
    fn test_load_missing_and_blank_files() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("counter.toml");
        let file = AtomicTomlFile::<Counter>::new(path.clone());
        assert!(file.load().unwrap().is_none());

        fs::write(&path, "   \n").unwrap();
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_update_accumulates_and_returns_value() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Counter>::new(temp_dir.path().join("counter.toml"));

        let after_first: u32 = file
            .update(Counter::default(), |c| {
                c.count += 10;
                Ok::<_, AtomicTomlError>(c.count)
            })
            .unwrap();
        let after_second: u32 = file
            .update(Counter::default(), |c| {
                c.count += 5;
                Ok::<_, AtomicTomlError>(c.count)
            })
            .unwrap();

        assert_eq!(after_first, 10);
        assert_eq!(after_second, 15);
        assert_eq!(file.load().unwrap().unwrap().count, 15);
    }

    #[test]
    fn test_failed_update_is_not_persisted() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Counter>::new(temp_dir.path().join("counter.toml"));
        file.save(&Counter::default()).unwrap();

        let result: Result<(), CarterError> = file.update(Counter::default(), |c| {
            c.count = 99;
            Err(CarterError::internal("rejected"))
        });

        assert!(result.is_err());
        assert_eq!(file.load().unwrap().unwrap().count, 0);
    }

    #[test]
    fn test_no_temp_file_left_and_lock_file_kept() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("counter.toml");
        let file = AtomicTomlFile::<Counter>::new(path.clone());

        for _ in 0..3 {
            file.update(Counter::default(), |c| {
                c.count += 1;
                Ok::<_, AtomicTomlError>(())
            })
            .unwrap();
        }

        let leftovers: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty(), "left behind: {:?}", leftovers);
        assert!(temp_dir.path().join("counter.lock").exists());
    }

    #[test]
    fn test_temp_paths_are_unique_per_write() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Counter>::new(temp_dir.path().join("counter.toml"));

        assert_ne!(file.temp_path().unwrap(), file.temp_path().unwrap());
    }

    #[test]
    fn test_concurrent_updates_are_not_lost() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("counter.toml");

        let writers: Vec<_> = (0..8)
            .map(|_| {
                let file = AtomicTomlFile::<Counter>::new(path.clone());
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        file.update(Counter::default(), |c| {
                            c.count += 1;
                            Ok::<_, AtomicTomlError>(())
                        })
                        .unwrap();
                    }
                })
            })
            .collect();
        for writer in writers {
            writer.join().unwrap();
        }

        let file = AtomicTomlFile::<Counter>::new(path);
        assert_eq!(file.load().unwrap().unwrap().count, 200);
    }
}
