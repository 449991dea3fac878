use super::{parse_response, ExtractionError, Extractor, ImagePayload, Intake, IntakeState, RecordedExtractor};

use std::io;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use chrono::Local;

use crate::ledger::{RecordStore, StoreError};
use crate::models::{ExtractedRecord, FALLBACK_TYPE};
use crate::storage::{BlobStore, MemoryBlobStore, StorageError};

const COMPLETE_RESPONSE: &str = r#"{
    "type": "PI to USDT conversion",
    "status": "Converted ✅",
    "piAmount": 26.28416566,
    "usdtAmount": 5.61671067,
    "fee": "No fee",
    "sourceAccount": "Trading account",
    "exchangeRate": "1 PI ≈ 0.2136918 USDT",
    "timestamp": "14:03:27 – 05/11/2025"
}"#;

struct UnavailableExtractor;

impl Extractor for UnavailableExtractor {
    async fn extract(&self, _image: &ImagePayload) -> Result<ExtractedRecord, ExtractionError> {
        Err(ExtractionError::Service("quota exceeded".to_string()))
    }
}

struct ReadOnlyBlobStore;

impl BlobStore for ReadOnlyBlobStore {
    fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn write(&self, key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Write {
            key: key.to_string(),
            path: "read-only".into(),
            source: io::Error::other("read-only")
        })
    }
}

#[test]
fn test_image_payload_splits_data_url() {
    let payload = ImagePayload::from_data_url("data:image/png;base64,iVBORw0KGgo=");

    assert_eq!(payload.mime_type(), "image/png");
    assert_eq!(payload.data(), "iVBORw0KGgo=");
}

#[test]
fn test_image_payload_accepts_bare_data() {
    let payload = ImagePayload::from_data_url("/9j/4AAQSkZJRg==");

    assert_eq!(payload.mime_type(), "image/jpeg");
    assert_eq!(payload.data(), "/9j/4AAQSkZJRg==");
    assert!(ImagePayload::default().is_empty());
}

#[test]
fn test_parse_response_accepts_complete_response() -> Result<()> {
    let extracted = parse_response(COMPLETE_RESPONSE)?;

    assert_eq!(extracted.source_amount, Some(26.28416566));
    assert_eq!(extracted.exchange_rate.as_deref(), Some("1 PI ≈ 0.2136918 USDT"));

    Ok(())
}

#[test]
fn test_parse_response_rejects_missing_required_fields() {
    let result = parse_response(r#"{"piAmount": 5}"#);

    assert!(matches!(
        result,
        Err(ExtractionError::MissingFields(ref fields)) if fields == &vec!["type", "status", "usdtAmount", "timestamp"]
    ));
}

#[test]
fn test_parse_response_keeps_amounts_of_any_magnitude() -> Result<()> {
    let extracted = parse_response(r#"{
        "type": "PI to USDT",
        "status": "Done",
        "piAmount": 1e30,
        "usdtAmount": -0.000000001,
        "timestamp": "14:03:27 – 05/11/2025"
    }"#)?;

    assert_eq!(extracted.source_amount, Some(1e30));
    assert_eq!(extracted.target_amount, Some(-0.000000001));

    Ok(())
}

#[test]
fn test_parse_response_rejects_empty_and_invalid_payloads() {
    assert!(matches!(parse_response("  "), Err(ExtractionError::EmptyResponse)));
    assert!(matches!(parse_response("not json"), Err(ExtractionError::Malformed(_))));
    assert!(matches!(parse_response(r#"{"piAmount": "lots"}"#), Err(ExtractionError::Malformed(_))));
}

#[tokio::test]
async fn test_intake_confirms_reviewed_extraction_into_store() -> Result<()> {
    let blob_store = Arc::new(MemoryBlobStore::new());
    let mut store = RecordStore::new(blob_store);
    let mut intake = Intake::new();
    let extractor = RecordedExtractor::new(COMPLETE_RESPONSE);

    let state = intake.submit(&extractor, &ImagePayload::from_data_url("data:image/jpeg;base64,AAAA")).await;

    assert!(matches!(state, IntakeState::Review(_)));

    let record = intake.confirm(&mut store, &Local::now())?.ok_or_else(|| anyhow!("nothing confirmed"))?;

    assert_eq!(intake.state(), &IntakeState::Idle);
    assert_eq!(store.list(), &[record.clone()]);
    assert_eq!(record.target_amount, 5.61671067);
    assert_eq!(record.timestamp, "14:03:27 – 05/11/2025");

    Ok(())
}

#[tokio::test]
async fn test_intake_failure_surfaces_message_and_creates_nothing() -> Result<()> {
    let blob_store = Arc::new(MemoryBlobStore::new());
    let mut store = RecordStore::new(blob_store.clone());
    let mut intake = Intake::new();

    intake.submit(&UnavailableExtractor, &ImagePayload::default()).await;

    assert!(!intake.is_loading());
    assert!(matches!(intake.state(), IntakeState::Failed(message) if message.contains("quota exceeded")));
    assert!(intake.confirm(&mut store, &Local::now())?.is_none());
    assert!(store.is_empty());
    assert!(blob_store.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_intake_can_retry_after_malformed_response() -> Result<()> {
    let mut store = RecordStore::new(Arc::new(MemoryBlobStore::new()));
    let mut intake = Intake::new();

    intake.submit(&RecordedExtractor::new(r#"{"piAmount": 5}"#), &ImagePayload::default()).await;

    assert!(matches!(intake.state(), IntakeState::Failed(_)));

    intake.submit(&RecordedExtractor::new(COMPLETE_RESPONSE), &ImagePayload::default()).await;

    assert!(intake.confirm(&mut store, &Local::now())?.is_some());
    assert_eq!(store.len(), 1);
    assert_eq!(store.list()[0].conversion_type, FALLBACK_TYPE);

    Ok(())
}

#[tokio::test]
async fn test_intake_keeps_review_when_store_rejects_record() -> Result<()> {
    let mut store = RecordStore::new(Arc::new(ReadOnlyBlobStore));
    let mut intake = Intake::new();

    intake.submit(&RecordedExtractor::new(COMPLETE_RESPONSE), &ImagePayload::default()).await;

    assert!(matches!(intake.confirm(&mut store, &Local::now()), Err(StoreError::Persistence(_))));
    assert!(matches!(intake.state(), IntakeState::Review(_)));
    assert!(store.is_empty());

    intake.reset();

    assert_eq!(intake.state(), &IntakeState::Idle);

    Ok(())
}
