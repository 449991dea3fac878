use std::fmt::Display;

use chrono::{DateTime, TimeZone};
use serde::Deserialize;
use uuid::Uuid;

use crate::models::TransactionRecord;
use crate::types::format_display_timestamp;

pub const FALLBACK_TYPE: &str = "PI to USDT conversion";
pub const FALLBACK_STATUS: &str = "Converted ✅";
pub const FALLBACK_FEE: &str = "No fee";
pub const FALLBACK_ACCOUNT: &str = "Trading account";

/// Wire names the extraction service must always return.
pub const REQUIRED_FIELDS: [&str; 5] = ["type", "status", "piAmount", "usdtAmount", "timestamp"];

/// Best-effort output of the extraction service. Any field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedRecord {
    #[serde(rename = "type", default)]
    pub conversion_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "piAmount", alias = "sourceAmount", default)]
    pub source_amount: Option<f64>,
    #[serde(rename = "usdtAmount", alias = "targetAmount", default)]
    pub target_amount: Option<f64>,
    #[serde(default)]
    pub fee: Option<String>,
    #[serde(default)]
    pub source_account: Option<String>,
    #[serde(default)]
    pub exchange_rate: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>
}

impl ExtractedRecord {
    /// Wire names of required fields that are absent or blank.
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        let present = [
            is_present(&self.conversion_type),
            is_present(&self.status),
            self.source_amount.is_some(),
            self.target_amount.is_some(),
            is_present(&self.timestamp)
        ];

        REQUIRED_FIELDS.iter()
            .zip(present)
            .filter(|(_, present)| !present)
            .map(|(field, _)| *field)
            .collect()
    }

    /// Turns the extraction into a record stamped at `now`.
    ///
    /// Absent or blank fields take their fallback; a missing timestamp becomes
    /// `now` in display form. A fresh id is generated on every call.
    pub fn confirm<Tz: TimeZone>(self, now: &DateTime<Tz>) -> TransactionRecord
    where
        Tz::Offset: Display,
    {
        TransactionRecord {
            id: Uuid::new_v4().to_string(),
            conversion_type: or_fallback(self.conversion_type, FALLBACK_TYPE),
            status: or_fallback(self.status, FALLBACK_STATUS),
            source_amount: self.source_amount.unwrap_or_default(),
            target_amount: self.target_amount.unwrap_or_default(),
            fee: or_fallback(self.fee, FALLBACK_FEE),
            source_account: or_fallback(self.source_account, FALLBACK_ACCOUNT),
            exchange_rate: or_fallback(self.exchange_rate, ""),
            timestamp: self.timestamp
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| format_display_timestamp(now)),
            created_at: now.timestamp_millis()
        }
    }
}

fn is_present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|value| !value.trim().is_empty())
}

fn or_fallback(value: Option<String>, fallback: &str) -> String {
    value.filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}
