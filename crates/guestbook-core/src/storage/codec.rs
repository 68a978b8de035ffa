//! JSON file codec shared by the stores.
//!
//! A store file holds one pretty-printed JSON object mapping record id to
//! record. It is read once on open and rewritten in full on every mutation.

use std::collections::BTreeMap;
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{GuestbookError, Result};

/// In-memory form of a store file.
pub type Records<T> = BTreeMap<Uuid, T>;

/// Handle to a JSON store file holding records of type `T`.
#[derive(Debug)]
pub struct JsonFile<T> {
    path: PathBuf,
    _records: PhantomData<fn() -> T>,
}

impl<T> JsonFile<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Open a store file that must already exist and decode its records.
    ///
    /// # Errors
    ///
    /// Returns `GuestbookError::NotFound` if the file does not exist,
    /// `GuestbookError::Storage` if it cannot be read, and
    /// `GuestbookError::Validation` if it is not a valid record map.
    pub fn open_existing(path: impl Into<PathBuf>) -> Result<(Self, Records<T>)> {
        let file = Self::at(path);
        if !file.path.exists() {
            return Err(GuestbookError::NotFound(format!(
                "Store file {} does not exist",
                file.path.display()
            )));
        }
        let records = file.load()?;
        Ok((file, records))
    }

    /// Open a store file, creating it (and its parent directories) with an
    /// empty record map if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `GuestbookError::Storage` if the file or its directory cannot
    /// be created or read, and `GuestbookError::Validation` on bad contents.
    pub fn open_or_create(path: impl Into<PathBuf>) -> Result<(Self, Records<T>)> {
        let file = Self::at(path);
        if !file.path.exists() {
            file.create_empty()?;
        }
        let records = file.load()?;
        Ok((file, records))
    }

    /// Create a new, empty store file.
    ///
    /// # Errors
    ///
    /// Returns `GuestbookError::Conflict` if the file already exists.
    pub fn create_new(path: impl Into<PathBuf>) -> Result<Self> {
        let file = Self::at(path);
        if file.path.exists() {
            return Err(GuestbookError::Conflict(format!(
                "Store file {} already exists",
                file.path.display()
            )));
        }
        file.create_empty()?;
        Ok(file)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrite the whole file from `records`.
    ///
    /// The write goes through a temp file and a rename, so a fresh reader sees
    /// either the previous complete map or this one.
    pub fn persist(&self, records: &Records<T>) -> Result<()> {
        let json = serde_json::to_vec_pretty(records)
            .map_err(|e| GuestbookError::Storage(format!("Failed to encode records: {}", e)))?;
        crate::fs::write_atomic(&self.path, &json)
    }

    fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _records: PhantomData,
        }
    }

    fn create_empty(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    GuestbookError::Storage(format!(
                        "Failed to create directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }
        self.persist(&Records::new())
    }

    fn load(&self) -> Result<Records<T>> {
        let data = fs::read(&self.path).map_err(|e| {
            GuestbookError::Storage(format!("Failed to read {}: {}", self.path.display(), e))
        })?;
        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Records::new());
        }
        serde_json::from_slice(&data).map_err(|e| {
            GuestbookError::Validation(format!("Invalid store file {}: {}", self.path.display(), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::types::GuestbookEntry;
    use tempfile::tempdir;

    #[test]
    fn test_open_existing_missing_file_fails() {
        let dir = tempdir().unwrap();
        let result = JsonFile::<GuestbookEntry>::open_existing(dir.path().join("entries.json"));
        assert!(matches!(result, Err(GuestbookError::NotFound(_))));
    }

    #[test]
    fn test_open_or_create_writes_empty_map() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("users.json");

        let (_file, records) = JsonFile::<GuestbookEntry>::open_or_create(&path).unwrap();

        assert!(records.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap().trim(), "{}");
    }

    #[test]
    fn test_empty_file_decodes_as_empty_map() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("entries.json");
        fs::write(&path, "").unwrap();

        let (_file, records) = JsonFile::<GuestbookEntry>::open_existing(&path).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_persist_then_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("entries.json");
        let file = JsonFile::<GuestbookEntry>::create_new(&path).unwrap();

        let id = Uuid::new_v4();
        let mut records = Records::new();
        records.insert(id, GuestbookEntry::new("John Doe", "hello").with_id(id));
        file.persist(&records).unwrap();

        let (_file, loaded) = JsonFile::<GuestbookEntry>::open_existing(&path).unwrap();
        assert_eq!(loaded, records);
        assert!(fs::read_to_string(&path).unwrap().contains("\n  "));
    }

    #[test]
    fn test_create_new_refuses_existing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("entries.json");
        fs::write(&path, "{}").unwrap();

        let result = JsonFile::<GuestbookEntry>::create_new(&path);
        assert!(matches!(result, Err(GuestbookError::Conflict(_))));
    }

    #[test]
    fn test_corrupt_file_is_validation_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("entries.json");
        fs::write(&path, "[1, 2").unwrap();

        let result = JsonFile::<GuestbookEntry>::open_existing(&path);
        assert!(matches!(result, Err(GuestbookError::Validation(_))));
    }
}
