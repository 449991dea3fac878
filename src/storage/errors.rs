use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage error: could not read key [{key}] at [{}]: {source}", .path.display())]
    Read {
        key: String,
        path: PathBuf,
        #[source]
        source: io::Error
    },
    #[error("Storage error: could not write key [{key}] at [{}]: {source}", .path.display())]
    Write {
        key: String,
        path: PathBuf,
        #[source]
        source: io::Error
    },
    #[error("Storage error: key [{0}] is not a valid blob name")]
    InvalidKey(String)
}
