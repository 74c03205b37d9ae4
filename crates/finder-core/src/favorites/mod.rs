//! Saved analysis results.
//!
//! The whole list is stored as one JSON array in a single [`Slot`] and every
//! operation is a full read-modify-write. The list is a personal one and
//! stays small.

mod error;
mod slot;

pub use error::StorageError;
pub use slot::{FileSlot, MemorySlot, Slot};

use std::path::PathBuf;

use crate::analysis::AnalysisResult;
use crate::config::StorageConfig;

/// Repository of favorited analysis results, keyed by project name.
///
/// Persistence failures are logged and absorbed; none of these operations
/// fail from the caller's point of view. When the stored list cannot be
/// read, `add` and `remove` write nothing and return an empty list.
pub trait FavoritesRepository {
    /// All favorites in insertion order.
    fn list(&self) -> Vec<AnalysisResult>;

    /// Appends the result unless one with the same project name exists.
    /// Returns the resulting list.
    fn add(&self, result: &AnalysisResult) -> Vec<AnalysisResult>;

    /// Removes every result with this project name. Returns the resulting list.
    fn remove(&self, project_name: &str) -> Vec<AnalysisResult>;

    /// Whether a result with this project name is saved.
    fn contains(&self, project_name: &str) -> bool;
}

/// Blanket implementation for boxed trait objects.
impl FavoritesRepository for Box<dyn FavoritesRepository> {
    fn list(&self) -> Vec<AnalysisResult> {
        (**self).list()
    }

    fn add(&self, result: &AnalysisResult) -> Vec<AnalysisResult> {
        (**self).add(result)
    }

    fn remove(&self, project_name: &str) -> Vec<AnalysisResult> {
        (**self).remove(project_name)
    }

    fn contains(&self, project_name: &str) -> bool {
        (**self).contains(project_name)
    }
}

/// [`FavoritesRepository`] over any [`Slot`].
#[derive(Debug)]
pub struct Favorites<S: Slot> {
    slot: S,
}

/// Favorites kept in a JSON file.
pub type FileFavorites = Favorites<FileSlot>;

/// Favorites kept in memory.
pub type MemoryFavorites = Favorites<MemorySlot>;

impl<S: Slot> Favorites<S> {
    pub fn new(slot: S) -> Self {
        Self { slot }
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    /// Reads the list, discarding the slot when it cannot be decoded.
    ///
    /// Any other read failure is returned so callers never overwrite a
    /// list they could not see.
    fn read(&self) -> Result<Vec<AnalysisResult>, StorageError> {
        let stored = match self.slot.load() {
            Ok(Some(text)) => text,
            Ok(None) => return Ok(Vec::new()),
            Err(e @ StorageError::NotText { .. }) => {
                self.discard(&e);
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        match serde_json::from_str(&stored) {
            Ok(favorites) => Ok(favorites),
            Err(e) => {
                self.discard(&e);
                Ok(Vec::new())
            }
        }
    }

    fn discard(&self, reason: &dyn std::fmt::Display) {
        tracing::warn!("Failed to parse favorites, clearing corrupted data: {}", reason);
        if let Err(e) = self.slot.clear() {
            tracing::warn!("Failed to clear corrupted favorites: {}", e);
        }
    }

    /// Reads for display; failures show as an empty list.
    fn read_or_empty(&self) -> Vec<AnalysisResult> {
        self.read().unwrap_or_else(|e| {
            tracing::warn!("Failed to read favorites: {}", e);
            Vec::new()
        })
    }

    fn save(&self, favorites: &[AnalysisResult]) {
        let result = serde_json::to_string_pretty(favorites)
            .map_err(StorageError::from)
            .and_then(|json| self.slot.store(&json));

        if let Err(e) = result {
            tracing::warn!("Failed to save favorites: {}", e);
        }
    }
}

impl FileFavorites {
    /// Favorites stored at the given file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self::new(FileSlot::new(path))
    }

    /// Favorites stored where the storage config points.
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::at(config.favorites_path())
    }
}

impl MemoryFavorites {
    pub fn in_memory() -> Self {
        Self::new(MemorySlot::new())
    }
}

impl<S: Slot> FavoritesRepository for Favorites<S> {
    fn list(&self) -> Vec<AnalysisResult> {
        self.read_or_empty()
    }

    fn add(&self, result: &AnalysisResult) -> Vec<AnalysisResult> {
        let mut favorites = match self.read() {
            Ok(favorites) => favorites,
            Err(e) => {
                tracing::warn!("Failed to read favorites, not adding {}: {}", result.project_name, e);
                return Vec::new();
            }
        };
        if favorites.iter().any(|f| f.project_name == result.project_name) {
            return favorites;
        }

        favorites.push(result.clone());
        self.save(&favorites);
        tracing::debug!(project = %result.project_name, "added favorite");
        favorites
    }

    fn remove(&self, project_name: &str) -> Vec<AnalysisResult> {
        let mut favorites = match self.read() {
            Ok(favorites) => favorites,
            Err(e) => {
                tracing::warn!("Failed to read favorites, not removing {}: {}", project_name, e);
                return Vec::new();
            }
        };
        favorites.retain(|f| f.project_name != project_name);
        self.save(&favorites);
        favorites
    }

    fn contains(&self, project_name: &str) -> bool {
        self.read_or_empty().iter().any(|f| f.project_name == project_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_is_case_sensitive() {
        let favorites = MemoryFavorites::in_memory();
        favorites.add(&AnalysisResult::new("Foo"));
        favorites.add(&AnalysisResult::new("foo"));
        assert_eq!(favorites.list().len(), 2);
        assert!(favorites.contains("Foo"));
        assert!(!favorites.contains("FOO"));
    }

    #[test]
    fn test_remove_drops_every_match() {
        let duplicated = serde_json::to_string(&vec![
            AnalysisResult::new("X"),
            AnalysisResult::new("Y"),
            AnalysisResult::new("X"),
        ])
        .unwrap();
        let favorites = Favorites::new(MemorySlot::with_value(duplicated));

        let remaining = favorites.remove("X");
        assert_eq!(remaining, vec![AnalysisResult::new("Y")]);
    }

    #[test]
    fn test_boxed_repository() {
        let favorites: Box<dyn FavoritesRepository> = Box::new(MemoryFavorites::in_memory());
        favorites.add(&AnalysisResult::new("Boxed"));
        assert!(favorites.contains("Boxed"));
    }
}
