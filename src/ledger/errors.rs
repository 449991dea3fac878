use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tokio::task::JoinError;

use crate::models::TransactionRecord;
use crate::storage::StorageError;
use crate::types::RecordId;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Record [{record_id}] already exists in the ledger")]
    DuplicateRecord {
        record_id: RecordId
    },
    #[error("Ledger could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Ledger could not be persisted: {0}")]
    Persistence(#[from] StorageError)
}

impl StoreError {
    pub fn duplicate_record(record: &TransactionRecord) -> Self {
        Self::DuplicateRecord { record_id: record.id.clone() }
    }
}

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Seed dataset not found at [{}]", .0.display())]
    Missing(PathBuf),
    #[error("Seed dataset could not be read: {0}")]
    Io(#[from] io::Error),
    #[error("Seed fetch did not complete: {0}")]
    Task(#[from] JoinError)
}
