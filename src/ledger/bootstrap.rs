use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::ledger::{RecordStore, SeedSource, StoreError, RECORDS_KEY};
use crate::models::TransactionRecord;
use crate::storage::BlobStore;

/// Parses a serialized record sequence as written by the store or the JSON export.
pub fn parse_records(payload: &str) -> Result<Vec<TransactionRecord>, serde_json::Error> {
    serde_json::from_str(payload)
}

/// Start-up hydration of the ledger.
///
/// The blob store is authoritative once it has ever been written. The seed dataset
/// is only consulted when nothing usable is persisted, and a seed that loads is
/// written back so later start-ups skip it. No failure here is fatal: the worst
/// case is an empty ledger.
pub struct BootstrapLoader<B: BlobStore, S: SeedSource> {
    blob_store: Arc<B>,
    seed: S
}

impl<B: BlobStore, S: SeedSource> BootstrapLoader<B, S> {
    pub fn new(blob_store: Arc<B>, seed: S) -> Self {
        Self {
            blob_store,
            seed
        }
    }

    /// Resolves the initial record sequence.
    pub async fn load(&self) -> Vec<TransactionRecord> {
        if let Some(records) = self.load_persisted() {
            return records
        }

        self.load_seed().await
    }

    /// Loads the initial sequence and hands it to a new store over the same blob store.
    pub async fn into_store(self) -> RecordStore<B> {
        let records = self.load().await;
        RecordStore::hydrate(self.blob_store, records)
    }

    fn load_persisted(&self) -> Option<Vec<TransactionRecord>> {
        let payload = match self.blob_store.read(RECORDS_KEY) {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                debug!("No persisted ledger under key [{RECORDS_KEY}]");
                return None
            }
            Err(error) => {
                warn!("Persisted ledger could not be read, treating it as absent: {error}");
                return None
            }
        };

        match parse_records(&payload) {
            Ok(records) => {
                info!("Hydrated {} records from storage", records.len());
                Some(records)
            }
            Err(error) => {
                warn!("Persisted ledger could not be parsed, treating it as absent: {error}");
                None
            }
        }
    }

    async fn load_seed(&self) -> Vec<TransactionRecord> {
        let payload = match self.seed.fetch().await {
            Ok(payload) => payload,
            Err(error) => {
                info!("No seed dataset available, starting with an empty ledger: {error}");
                return Vec::new()
            }
        };

        let records = match parse_records(&payload) {
            Ok(records) => records,
            Err(error) => {
                warn!("Seed dataset is malformed, starting with an empty ledger: {error}");
                return Vec::new()
            }
        };

        if let Err(error) = self.write_back(&records) {
            error!("Seed dataset could not be written to storage: {error}");
        }

        info!("Hydrated {} records from the seed dataset", records.len());

        records
    }

    fn write_back(&self, records: &[TransactionRecord]) -> Result<(), StoreError> {
        let payload = serde_json::to_string(records)?;
        self.blob_store.write(RECORDS_KEY, &payload)?;
        Ok(())
    }
}
