use std::fmt::Display;

use chrono::{DateTime, TimeZone, Utc};

use crate::types::EpochMillis;

/// Separator between the time part and the date part of a display timestamp.
pub const DISPLAY_DELIMITER: &str = " – ";

const DISPLAY_FORMAT: &str = "%H:%M:%S – %d/%m/%Y";
const DAY_LABEL_FORMAT: &str = "%d/%m";

pub fn now_millis() -> EpochMillis {
    Utc::now().timestamp_millis()
}

/// Renders an instant the way receipts print it, e.g. `14:03:27 – 05/11/2025`.
pub fn format_display_timestamp<Tz: TimeZone>(instant: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    instant.format(DISPLAY_FORMAT).to_string()
}

/// Splits a display timestamp into its time and date parts.
///
/// Timestamps come from receipts and are never machine-parsed, so a value
/// without the delimiter is returned whole as the time part with an empty date.
pub fn split_display_timestamp(timestamp: &str) -> (&str, &str) {
    match timestamp.split_once(DISPLAY_DELIMITER) {
        Some((time, date)) => (time, date),
        None => (timestamp, "")
    }
}

/// Day/month bucket label (`DD/MM`) for an epoch-millisecond instant in `timezone`.
///
/// The year is not part of the label, so the same day in different years shares a label.
pub fn day_label<Tz: TimeZone>(created_at: EpochMillis, timezone: &Tz) -> Option<String>
where
    Tz::Offset: Display,
{
    timezone.timestamp_millis_opt(created_at)
        .single()
        .map(|instant| instant.format(DAY_LABEL_FORMAT).to_string())
}
