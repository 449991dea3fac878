use std::iter::once;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, error};

use crate::ledger::StoreError;
use crate::models::TransactionRecord;
use crate::reporting::{aggregate, LedgerStats};
use crate::storage::BlobStore;

/// Blob store key holding the whole serialized record sequence.
pub const RECORDS_KEY: &str = "pi_transactions";

/// Ordered, write-through collection of confirmed records.
///
/// Records are kept newest-first in insertion order. Every mutation serializes
/// the full updated sequence and writes it under [`RECORDS_KEY`] before the
/// in-memory state changes, so a failed write leaves the store untouched.
/// Subscribers observe a revision counter that is bumped after each successful
/// mutation.
pub struct RecordStore<B: BlobStore> {
    blob_store: Arc<B>,
    records: Vec<TransactionRecord>,
    revision: watch::Sender<u64>
}

impl<B: BlobStore> RecordStore<B> {
    /// Creates an empty store. Nothing is written until the first mutation.
    pub fn new(blob_store: Arc<B>) -> Self {
        Self::hydrate(blob_store, Vec::new())
    }

    /// Creates a store holding previously created records verbatim.
    pub fn hydrate(blob_store: Arc<B>, records: Vec<TransactionRecord>) -> Self {
        let (revision, _) = watch::channel(0);

        Self {
            blob_store,
            records,
            revision
        }
    }

    pub fn list(&self) -> &[TransactionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, record_id: &str) -> Option<&TransactionRecord> {
        self.records.iter().find(|record| record.id == record_id)
    }

    /// Prepends `record` and persists the new sequence.
    ///
    /// # Errors
    /// Returns `StoreError` if:
    /// - A record with the same id is already stored.
    /// - The sequence cannot be serialized or written.
    pub fn add(&mut self, record: TransactionRecord) -> Result<(), StoreError> {
        if self.get(&record.id).is_some() {
            return Err(StoreError::duplicate_record(&record))
        }

        let updated: Vec<&TransactionRecord> = once(&record).chain(self.records.iter()).collect();
        self.persist(&updated)?;

        debug!("Record [{}] added, ledger now holds {} records", record.id, self.records.len() + 1);

        self.records.insert(0, record);
        self.notify();

        Ok(())
    }

    /// Removes every record with `record_id` and returns how many were removed.
    ///
    /// An unknown id is a no-op: nothing is written and subscribers are not notified.
    pub fn remove(&mut self, record_id: &str) -> Result<usize, StoreError> {
        let retained: Vec<&TransactionRecord> = self.records.iter()
            .filter(|record| record.id != record_id)
            .collect();
        let removed = self.records.len() - retained.len();

        if removed == 0 {
            debug!("Record [{record_id}] not found, nothing to remove");
            return Ok(0)
        }

        self.persist(&retained)?;
        self.records.retain(|record| record.id != record_id);

        debug!("Record [{record_id}] removed, ledger now holds {} records", self.records.len());

        self.notify();

        Ok(removed)
    }

    /// Summary and daily series over the current records.
    pub fn stats(&self) -> LedgerStats {
        aggregate(&self.records)
    }

    /// Receiver whose value changes after every successful mutation.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    fn persist(&self, records: &[&TransactionRecord]) -> Result<(), StoreError> {
        let payload = serde_json::to_string(records)?;

        self.blob_store.write(RECORDS_KEY, &payload).map_err(|storage_error| {
            error!("Ledger write-through failed: {storage_error}");
            StoreError::from(storage_error)
        })
    }

    fn notify(&self) {
        self.revision.send_modify(|revision| *revision += 1);
    }
}
