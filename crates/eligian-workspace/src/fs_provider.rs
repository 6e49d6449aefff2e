//! Abstraction over file-system access (spec §4.2), substitutable for tests.

use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    pub len: u64,
}

/// Disk access used by the workspace builder to resolve library imports and
/// load asset files. Real disk I/O and an in-memory fake share this trait so
/// tests never touch the file system (spec §4.2: "substitutable for tests").
pub trait FileSystemProvider: Send + Sync {
    fn read_file(&self, path: &Path) -> std::io::Result<String>;
    fn exists(&self, path: &Path) -> bool;
    fn stat(&self, path: &Path) -> std::io::Result<FileStat>;
    fn read_directory(&self, path: &Path) -> std::io::Result<Vec<PathBuf>>;
}

/// Reads straight from the real file system.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystemProvider;

impl FileSystemProvider for RealFileSystemProvider {
    fn read_file(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn stat(&self, path: &Path) -> std::io::Result<FileStat> {
        std::fs::metadata(path).map(|m| FileStat { len: m.len() })
    }

    fn read_directory(&self, path: &Path) -> std::io::Result<Vec<PathBuf>> {
        let mut out = Vec::new();
        for entry in std::fs::read_dir(path)? {
            out.push(entry?.path());
        }
        Ok(out)
    }
}

/// An in-memory file system used by tests and by the LSP for unsaved buffers.
#[derive(Debug, Default)]
pub struct InMemoryFileSystemProvider {
    files: RwLock<FxHashMap<PathBuf, String>>,
}

impl InMemoryFileSystemProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_file(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.files.write().unwrap().insert(path.into(), contents.into());
    }

    pub fn remove_file(&self, path: &Path) {
        self.files.write().unwrap().remove(path);
    }
}

impl FileSystemProvider for InMemoryFileSystemProvider {
    fn read_file(&self, path: &Path) -> std::io::Result<String> {
        self.files
            .read()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, path.display().to_string()))
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.read().unwrap().contains_key(path)
    }

    fn stat(&self, path: &Path) -> std::io::Result<FileStat> {
        self.read_file(path).map(|s| FileStat { len: s.len() as u64 })
    }

    fn read_directory(&self, path: &Path) -> std::io::Result<Vec<PathBuf>> {
        let files = self.files.read().unwrap();
        Ok(files.keys().filter(|p| p.parent() == Some(path)).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_provider_round_trips() {
        let fs = InMemoryFileSystemProvider::new();
        fs.set_file("/a/b.eligian", "timeline \"t\" {}");
        assert!(fs.exists(Path::new("/a/b.eligian")));
        assert_eq!(fs.read_file(Path::new("/a/b.eligian")).unwrap(), "timeline \"t\" {}");
        assert!(fs.read_file(Path::new("/missing")).is_err());
    }
}
