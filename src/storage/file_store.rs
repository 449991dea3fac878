use crate::storage::{BlobStore, StorageError};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

/// Blob store backed by one `<key>.json` file per key inside a directory.
///
/// Every write goes to a sibling `.<key>.json.tmp` file that is then renamed over
/// the target, so a reader sees either the old or the new payload. There is no
/// locking, so two processes writing the same key race and the last writer wins.
pub struct FileBlobStore {
    directory: PathBuf
}

impl FileBlobStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into()
        }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let is_valid = !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

        if !is_valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        Ok(self.directory.join(format!("{key}.json")))
    }

    fn staging_path_for(&self, key: &str) -> PathBuf {
        self.directory.join(format!(".{key}.json.tmp"))
    }
}

impl BlobStore for FileBlobStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;

        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read { key: key.to_string(), path, source })
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let staging_path = self.staging_path_for(key);

        let result = fs::create_dir_all(&self.directory)
            .and_then(|_| fs::write(&staging_path, value))
            .and_then(|_| fs::rename(&staging_path, &path));

        if let Err(source) = result {
            // Staging files are never read back.
            let _ = fs::remove_file(&staging_path);
            return Err(StorageError::Write { key: key.to_string(), path, source });
        }

        debug!("Wrote {} bytes for key [{key}] to {}", value.len(), path.display());

        Ok(())
    }
}
