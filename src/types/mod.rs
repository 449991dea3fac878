mod timestamp;

pub use timestamp::{
    day_label, format_display_timestamp, now_millis, split_display_timestamp, DISPLAY_DELIMITER,
};

pub type RecordId = String;
pub type EpochMillis = i64;
