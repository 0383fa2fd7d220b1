//! Directory-backed save store: one `<key>.json` file per key.
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use mathquest_game::SaveStorage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileStorageError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("failed to delete {}: {source}", path.display())]
    Delete { path: PathBuf, source: io::Error },
}

#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SaveStorage for FileStorage {
    type Error = FileStorageError;

    fn load(&self, key: &str) -> Result<Option<String>, Self::Error> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(FileStorageError::Read { path, source }),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        let path = self.path_for(key);
        fs::create_dir_all(&self.dir)
            .and_then(|()| fs::write(&path, value))
            .map_err(|source| FileStorageError::Write { path, source })
    }

    fn delete(&self, key: &str) -> Result<(), Self::Error> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(FileStorageError::Delete { path, source }),
        }
    }
}
