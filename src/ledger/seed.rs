use std::fs;
use std::future::Future;
use std::io::ErrorKind;
use std::path::PathBuf;

use tokio::task::spawn_blocking;

use crate::ledger::SeedError;

/// Source of the bundled dataset used when nothing has been persisted yet.
pub trait SeedSource {
    fn fetch(&self) -> impl Future<Output = Result<String, SeedError>> + Send;
}

/// Reads the seed dataset from a file on a blocking worker thread.
pub struct FileSeedSource {
    path: PathBuf
}

impl FileSeedSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into()
        }
    }
}

impl SeedSource for FileSeedSource {
    async fn fetch(&self) -> Result<String, SeedError> {
        let path = self.path.clone();

        spawn_blocking(move || match fs::read_to_string(&path) {
            Ok(payload) => Ok(payload),
            Err(error) if error.kind() == ErrorKind::NotFound => Err(SeedError::Missing(path)),
            Err(error) => Err(SeedError::Io(error))
        }).await?
    }
}
