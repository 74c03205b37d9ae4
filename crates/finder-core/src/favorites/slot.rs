use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use super::error::StorageError;

/// A single named value holding serialized text.
///
/// The favorites list lives in exactly one slot; implementations decide
/// where that slot is kept.
pub trait Slot {
    /// Reads the stored text, `None` when nothing has been stored yet.
    fn load(&self) -> Result<Option<String>, StorageError>;

    /// Replaces the stored text.
    fn store(&self, value: &str) -> Result<(), StorageError>;

    /// Deletes the stored text. Clearing an empty slot is not an error.
    fn clear(&self) -> Result<(), StorageError>;
}

/// Slot backed by a file on disk.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensures the parent directory exists.
    fn ensure_parent_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
            }
        }
        Ok(())
    }
}

impl Slot for FileSlot {
    fn load(&self) -> Result<Option<String>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&self.path).map_err(|e| StorageError::io(&self.path, e))?;
        let content = String::from_utf8(bytes).map_err(|_| StorageError::NotText {
            path: self.path.clone(),
        })?;
        Ok(Some(content))
    }

    fn store(&self, value: &str) -> Result<(), StorageError> {
        self.ensure_parent_dir()?;
        fs::write(&self.path, value).map_err(|e| StorageError::io(&self.path, e))
    }

    fn clear(&self) -> Result<(), StorageError> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| StorageError::io(&self.path, e))?;
        }
        Ok(())
    }
}

/// Slot held in process memory. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemorySlot {
    value: RefCell<Option<String>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a slot that already holds the given text.
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: RefCell::new(Some(value.into())),
        }
    }
}

impl Slot for MemorySlot {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.value.borrow().clone())
    }

    fn store(&self, value: &str) -> Result<(), StorageError> {
        *self.value.borrow_mut() = Some(value.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.value.borrow_mut().take();
        Ok(())
    }
}
