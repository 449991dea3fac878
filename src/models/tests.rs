use super::{
    newest_first, oldest_first, ExtractedRecord, TransactionRecord, FALLBACK_ACCOUNT, FALLBACK_FEE,
    FALLBACK_STATUS, FALLBACK_TYPE,
};

use anyhow::Result;
use chrono::{Local, Utc};

fn create_record(id: &str, created_at: i64) -> TransactionRecord {
    TransactionRecord {
        id: id.to_string(),
        conversion_type: FALLBACK_TYPE.to_string(),
        status: FALLBACK_STATUS.to_string(),
        source_amount: 1.0,
        target_amount: 1.0,
        fee: FALLBACK_FEE.to_string(),
        source_account: FALLBACK_ACCOUNT.to_string(),
        exchange_rate: String::new(),
        timestamp: "10:00:00 – 01/02/2025".to_string(),
        created_at
    }
}

#[test]
fn test_record_deserializes_from_persisted_payload() -> Result<()> {
    let payload = r#"{
        "id": "a1",
        "type": "PI to USDT conversion",
        "status": "Converted ✅",
        "piAmount": 26.28416566,
        "usdtAmount": 5.61671067,
        "fee": "No fee",
        "sourceAccount": "Trading account",
        "exchangeRate": "1 PI ≈ 0,2136918 USDT",
        "timestamp": "14:03:27 – 05/11/2025",
        "createdAt": 1762351407000
    }"#;

    let record: TransactionRecord = serde_json::from_str(payload)?;

    assert_eq!(record.id, "a1");
    assert_eq!(record.source_amount, 26.28416566);
    assert_eq!(record.target_amount, 5.61671067);
    assert_eq!(record.exchange_rate, "1 PI ≈ 0,2136918 USDT");
    assert_eq!(record.created_at, 1762351407000);
    assert_eq!(record.display_parts(), ("14:03:27", "05/11/2025"));

    Ok(())
}

#[test]
fn test_record_treats_missing_and_null_amounts_as_zero() -> Result<()> {
    let payload = r#"[
        {"id": "a", "createdAt": 1, "piAmount": null},
        {"id": "b", "createdAt": 2, "sourceAmount": 3, "targetAmount": 1.5}
    ]"#;

    let records: Vec<TransactionRecord> = serde_json::from_str(payload)?;

    assert_eq!(records[0].source_amount, 0.0);
    assert_eq!(records[0].target_amount, 0.0);
    assert_eq!(records[1].source_amount, 3.0);
    assert_eq!(records[1].target_amount, 1.5);

    Ok(())
}

#[test]
fn test_record_serializes_amounts_as_numbers_with_wire_names() -> Result<()> {
    let mut record = create_record("a1", 42);
    record.source_amount = 10.5;

    let value = serde_json::to_value(&record)?;

    assert_eq!(value["piAmount"], serde_json::json!(10.5));
    assert_eq!(value["usdtAmount"], serde_json::json!(1.0));
    assert_eq!(value["type"], serde_json::json!(FALLBACK_TYPE));
    assert_eq!(value["createdAt"], serde_json::json!(42));
    assert!(value.get("sourceAmount").is_none());

    Ok(())
}

#[test]
fn test_ordering_helpers_sort_by_created_at() {
    let records = vec![create_record("b", 20), create_record("c", 30), create_record("a", 10)];

    let ascending: Vec<&str> = oldest_first(&records).iter().map(|record| record.id.as_str()).collect();
    let descending: Vec<&str> = newest_first(&records).iter().map(|record| record.id.as_str()).collect();

    assert_eq!(ascending, vec!["a", "b", "c"]);
    assert_eq!(descending, vec!["c", "b", "a"]);
}

#[test]
fn test_confirm_with_only_source_amount_applies_every_fallback() -> Result<()> {
    let extracted: ExtractedRecord = serde_json::from_str(r#"{"piAmount": 5}"#)?;
    let before = Utc::now().timestamp_millis();
    let now = Local::now();

    let record = extracted.confirm(&now);

    assert_eq!(record.source_amount, 5.0);
    assert_eq!(record.target_amount, 0.0);
    assert_eq!(record.conversion_type, FALLBACK_TYPE);
    assert_eq!(record.status, FALLBACK_STATUS);
    assert_eq!(record.fee, FALLBACK_FEE);
    assert_eq!(record.source_account, FALLBACK_ACCOUNT);
    assert_eq!(record.exchange_rate, "");
    assert_eq!(record.timestamp, now.format("%H:%M:%S – %d/%m/%Y").to_string());
    assert_eq!(record.created_at, now.timestamp_millis());
    assert!(record.created_at >= before);
    assert!(!record.id.is_empty());

    Ok(())
}

#[test]
fn test_confirm_keeps_extracted_values_and_replaces_blanks() -> Result<()> {
    let extracted: ExtractedRecord = serde_json::from_str(r#"{
        "type": "PI to USDT",
        "status": "",
        "piAmount": 26.28416566,
        "usdtAmount": 5.61671067,
        "fee": "0.01 PI",
        "sourceAccount": "Main wallet",
        "exchangeRate": "1 PI ≈ 0.2136918 USDT",
        "timestamp": "14:03:27 – 05/11/2025"
    }"#)?;

    let record = extracted.confirm(&Utc::now());

    assert_eq!(record.conversion_type, "PI to USDT");
    assert_eq!(record.status, FALLBACK_STATUS);
    assert_eq!(record.target_amount, 5.61671067);
    assert_eq!(record.fee, "0.01 PI");
    assert_eq!(record.source_account, "Main wallet");
    assert_eq!(record.exchange_rate, "1 PI ≈ 0.2136918 USDT");
    assert_eq!(record.timestamp, "14:03:27 – 05/11/2025");

    Ok(())
}

#[test]
fn test_confirm_generates_distinct_ids() {
    let now = Utc::now();
    let first = ExtractedRecord::default().confirm(&now);
    let second = ExtractedRecord::default().confirm(&now);

    assert_ne!(first.id, second.id);
}

#[test]
fn test_missing_required_fields_lists_wire_names() -> Result<()> {
    let extracted: ExtractedRecord = serde_json::from_str(r#"{"type": "x", "piAmount": 1, "timestamp": " "}"#)?;

    assert_eq!(extracted.missing_required_fields(), vec!["status", "usdtAmount", "timestamp"]);
    assert_eq!(ExtractedRecord::default().missing_required_fields().len(), 5);

    Ok(())
}
