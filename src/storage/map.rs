//! In-memory storage.

use std::io;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::Storage;

/// A simple map-based storage.
///
/// Provides a convenient way to work with documents that never touch the
/// disk, such as generated sources and tests.
///
/// # Example
///
/// ```ignore
/// use latex_scan::{Document, MapStorage};
///
/// let storage = MapStorage::new();
/// storage.insert("main.tex", r"\input{intro}");
/// storage.insert("intro.tex", "Hello.");
///
/// let doc = Document::load(&storage, "main.tex")?;
/// let full = doc.substitute_all_inclusions(&storage)?;
/// assert_eq!(full.raw_text(), "Hello.");
/// ```
#[derive(Debug, Default)]
pub struct MapStorage {
    files: RwLock<FxHashMap<PathBuf, String>>,
}

impl MapStorage {
    /// Create a new empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a file.
    pub fn insert(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files.write().insert(path.into(), content.into());
    }

    /// Remove a file.
    pub fn remove(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.write().remove(path.as_ref())
    }

    /// Get a copy of a file's content.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.read().get(path.as_ref()).cloned()
    }

    /// Get the number of files.
    pub fn len(&self) -> usize {
        self.files.read().len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.files.read().is_empty()
    }

    /// All stored paths.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.read().keys().cloned().collect()
    }
}

impl Storage for MapStorage {
    fn load(&self, path: &Path) -> io::Result<String> {
        self.get(path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )
        })
    }

    fn save(&self, path: &Path, text: &str) -> io::Result<()> {
        self.insert(path, text);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.read().contains_key(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let storage = MapStorage::new();
        assert!(storage.is_empty());
        storage.save(Path::new("a.tex"), "A").unwrap();
        assert_eq!(storage.load(Path::new("a.tex")).unwrap(), "A");
        assert!(storage.exists(Path::new("a.tex")));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_not_found_kind() {
        let err = MapStorage::new().load(Path::new("missing.tex")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_remove() {
        let storage = MapStorage::new();
        storage.insert("a.tex", "A");
        assert_eq!(storage.remove("a.tex").as_deref(), Some("A"));
        assert!(storage.paths().is_empty());
    }
}
