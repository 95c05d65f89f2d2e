//! Loading and saving document text.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Storage Access Flow                      │
//! ├─────────────────────────────────────────────────────────────┤
//! │                                                             │
//! │  Document::load(storage, path)                              │
//! │  Document::substitute_all_inclusions(storage)               │
//! │                    │                                        │
//! │                    ├─► DiskStorage                          │
//! │                    │   └─► read_disk() + decode_utf8()      │
//! │                    │                                        │
//! │                    └─► MapStorage                           │
//! │                        └─► in-memory path → text map        │
//! │                                                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Scanning never touches storage; only document construction, persistence
//! and inclusion expansion do.

mod disk;
mod map;

use std::io;
use std::path::Path;

pub use disk::{decode_utf8, DiskStorage};
pub use map::MapStorage;

/// Source of document text.
///
/// `load` must report a missing file with [`io::ErrorKind::NotFound`]; inclusion
/// expansion treats that kind as recoverable and every other error as fatal.
pub trait Storage: Send + Sync {
    /// Read the full text at `path`.
    fn load(&self, path: &Path) -> io::Result<String>;

    /// Replace the text at `path`.
    fn save(&self, path: &Path, text: &str) -> io::Result<()>;

    /// Whether `path` can be loaded.
    fn exists(&self, path: &Path) -> bool {
        self.load(path).is_ok()
    }
}

impl<S: Storage + ?Sized> Storage for &S {
    fn load(&self, path: &Path) -> io::Result<String> {
        (**self).load(path)
    }

    fn save(&self, path: &Path, text: &str) -> io::Result<()> {
        (**self).save(path, text)
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }
}
