//! Directory-backed flat storage
//!
//! Maps the device's absolute storage paths (`/bases/...`) onto a data
//! directory on the host filesystem.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use embolos_hal::fs::{FlatStorage, FsError};

/// `FlatStorage` rooted at a host directory
#[derive(Debug)]
pub struct DirFs {
    root: PathBuf,
}

impl DirFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

fn map_err(err: std::io::Error) -> FsError {
    match err.kind() {
        ErrorKind::NotFound => FsError::NotFound,
        _ => FsError::Io,
    }
}

impl FlatStorage for DirFs {
    fn mount(&mut self) -> Result<(), FsError> {
        fs::create_dir_all(&self.root).map_err(map_err)
    }

    fn format(&mut self) -> Result<(), FsError> {
        if self.root.exists() {
            fs::remove_dir_all(&self.root).map_err(map_err)?;
        }
        fs::create_dir_all(&self.root).map_err(map_err)
    }

    fn make_dir(&mut self, path: &str) -> Result<(), FsError> {
        fs::create_dir_all(self.resolve(path)).map_err(map_err)
    }

    fn read(&mut self, path: &str) -> Result<Vec<u8>, FsError> {
        fs::read(self.resolve(path)).map_err(map_err)
    }

    fn write(&mut self, path: &str, data: &[u8]) -> Result<(), FsError> {
        fs::write(self.resolve(path), data).map_err(map_err)
    }

    fn remove(&mut self, path: &str) -> Result<(), FsError> {
        fs::remove_file(self.resolve(path)).map_err(map_err)
    }

    fn rename(&mut self, from: &str, to: &str) -> Result<(), FsError> {
        // std::fs::rename replaces an existing destination file
        fs::rename(self.resolve(from), self.resolve(to)).map_err(map_err)
    }

    fn list_dir(&mut self, path: &str) -> Result<Vec<String>, FsError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(self.resolve(path)).map_err(map_err)? {
            let entry = entry.map_err(map_err)?;
            if entry.file_type().map_err(map_err)?.is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        Ok(names)
    }
}
