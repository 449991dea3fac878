use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{split_display_timestamp, EpochMillis, RecordId};

/// A single confirmed currency conversion.
///
/// Serialized field names follow the persisted `pi_transactions` payload and the
/// bundled `data.json`, so both load without translation. Amounts are kept as
/// the JSON numbers they arrived as; any finite number is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// Identity key, unique within a store.
    pub id: RecordId,
    /// Free-text classification, e.g. "PI to USDT conversion".
    #[serde(rename = "type", default)]
    pub conversion_type: String,
    /// Free-text completion state, display only.
    #[serde(default)]
    pub status: String,
    /// Quantity debited in the source currency.
    #[serde(
        rename = "piAmount",
        alias = "sourceAmount",
        default,
        deserialize_with = "amount_or_zero"
    )]
    pub source_amount: f64,
    /// Quantity credited in the target currency.
    #[serde(
        rename = "usdtAmount",
        alias = "targetAmount",
        default,
        deserialize_with = "amount_or_zero"
    )]
    pub target_amount: f64,
    #[serde(default)]
    pub fee: String,
    #[serde(default)]
    pub source_account: String,
    /// Rate as printed on the receipt. Not derived from the amounts.
    #[serde(default)]
    pub exchange_rate: String,
    /// Receipt time as displayed, `HH:MM:SS – DD/MM/YYYY` when well-formed.
    #[serde(default)]
    pub timestamp: String,
    /// Confirmation instant, the only field used for ordering and bucketing.
    pub created_at: EpochMillis
}

impl TransactionRecord {
    /// Time and date parts of the display timestamp.
    pub fn display_parts(&self) -> (&str, &str) {
        split_display_timestamp(&self.timestamp)
    }
}

/// Records ordered by `created_at` ascending. Ties keep their stored order.
pub fn oldest_first(records: &[TransactionRecord]) -> Vec<&TransactionRecord> {
    let mut ordered: Vec<&TransactionRecord> = records.iter().collect();
    ordered.sort_by_key(|record| record.created_at);
    ordered
}

/// Records ordered by `created_at` descending. Ties keep their stored order.
pub fn newest_first(records: &[TransactionRecord]) -> Vec<&TransactionRecord> {
    let mut ordered: Vec<&TransactionRecord> = records.iter().collect();
    ordered.sort_by_key(|record| std::cmp::Reverse(record.created_at));
    ordered
}

// Stored payloads written by older clients may carry `null` amounts.
fn amount_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}
