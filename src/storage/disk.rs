//! File system storage.

use std::fs;
use std::io;
use std::path::Path;

use super::Storage;

/// Reads and writes documents on the local file system.
///
/// Text is decoded as UTF-8 with any byte order mark stripped.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskStorage;

impl Storage for DiskStorage {
    fn load(&self, path: &Path) -> io::Result<String> {
        let bytes = read_disk(path)?;
        decode_utf8(&bytes).map(str::to_owned)
    }

    fn save(&self, path: &Path, text: &str) -> io::Result<()> {
        fs::write(path, text)
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// Decode bytes as UTF-8, stripping BOM if present.
pub fn decode_utf8(buf: &[u8]) -> io::Result<&str> {
    let buf = buf.strip_prefix(b"\xef\xbb\xbf").unwrap_or(buf);
    std::str::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Read file from disk.
fn read_disk(path: &Path) -> io::Result<Vec<u8>> {
    let metadata = fs::metadata(path)?;
    if metadata.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is a directory", path.display()),
        ));
    }
    fs::read(path)
}
