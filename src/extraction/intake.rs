use std::fmt::Display;

use chrono::{DateTime, TimeZone};
use tracing::{debug, info, warn};

use crate::extraction::{Extractor, ImagePayload};
use crate::ledger::{RecordStore, StoreError};
use crate::models::{ExtractedRecord, TransactionRecord};
use crate::storage::BlobStore;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum IntakeState {
    #[default]
    Idle,
    /// An extraction call is in flight.
    Loading,
    /// Extraction finished and waits for the user to confirm it.
    Review(ExtractedRecord),
    /// Extraction failed; holds the message shown to the user.
    Failed(String)
}

/// One receipt submission at a time: extract, review, confirm.
///
/// Nothing reaches the ledger until a reviewed extraction is confirmed, so a
/// failed or abandoned submission never leaves a partial record behind.
#[derive(Debug, Default)]
pub struct Intake {
    state: IntakeState
}

impl Intake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &IntakeState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == IntakeState::Loading
    }

    /// Runs the extractor on `image`, replacing any previous review or failure.
    pub async fn submit<E: Extractor>(&mut self, extractor: &E, image: &ImagePayload) -> &IntakeState {
        self.state = IntakeState::Loading;

        self.state = match extractor.extract(image).await {
            Ok(extracted) => {
                info!("Receipt extracted, awaiting confirmation");
                IntakeState::Review(extracted)
            }
            Err(error) => {
                warn!("{error}");
                IntakeState::Failed(format!("The receipt could not be read ({error}). Please try again with another image."))
            }
        };

        &self.state
    }

    /// Stores the reviewed extraction as a new record stamped at `now`.
    ///
    /// Returns `Ok(None)` when there is nothing under review. On a store error the
    /// review is kept so the user can retry.
    pub fn confirm<B, Tz>(&mut self, store: &mut RecordStore<B>, now: &DateTime<Tz>) -> Result<Option<TransactionRecord>, StoreError>
    where
        B: BlobStore,
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let IntakeState::Review(extracted) = &self.state else {
            debug!("No reviewed extraction to confirm");
            return Ok(None)
        };

        let record = extracted.clone().confirm(now);
        store.add(record.clone())?;

        info!("Record [{}] confirmed", record.id);

        self.state = IntakeState::Idle;

        Ok(Some(record))
    }

    pub fn reset(&mut self) {
        self.state = IntakeState::Idle;
    }
}
