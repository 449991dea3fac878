mod errors;
mod file_store;
mod memory_store;

pub use errors::StorageError;
pub use file_store::FileBlobStore;
pub use memory_store::MemoryBlobStore;

/// Key-value storage of text blobs that the ledger persists into.
///
/// An absent key is a valid state and reads as `Ok(None)`.
pub trait BlobStore: Send + Sync + 'static {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
